//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They contain no business logic, only
//! display-ready data: sorted and paginated rows, header markers, dialog
//! contents and highlight ranges.

use crate::app::notification::Severity;
use crate::domain::PetField;
use crate::filter::Highlights;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Table columns in display order.
    pub columns: Vec<ColumnInfo>,

    /// Rows of the current page, already sorted.
    pub rows: Vec<DisplayRow>,

    pub paginator: PaginatorInfo,

    /// Set when no record passes the filters.
    pub empty_state: Option<EmptyState>,

    /// The "Pet Details" dialog, when an editing session is open.
    pub dialog: Option<DialogInfo>,

    /// The delete confirmation dialog, when open.
    pub confirm: Option<ConfirmInfo>,

    /// Live notifications, oldest first. Filled in by the runtime.
    pub toasts: Vec<ToastInfo>,

    pub footer: FooterInfo,
}

/// Title bar with the global search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Mirror of the global search input text.
    pub global_search: String,
}

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub field: PetField,
    pub header: String,
    /// `" ▲"`, `" ▼"` or empty.
    pub sort_marker: &'static str,
    /// Active column filter, rendered as `mode: value`.
    pub filter: Option<String>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Cell texts, one per column.
    pub cells: Vec<String>,
    pub is_selected: bool,
    /// Global-search match ranges, in characters.
    pub highlights: Highlights,
}

impl DisplayRow {
    /// Highlight range for the cell of `field`, if any.
    #[must_use]
    pub fn highlight(&self, field: PetField) -> Option<(usize, usize)> {
        self.highlights
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, range)| *range)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatorInfo {
    /// `Showing {first} to {last} of {total} pets`.
    pub report: String,
    /// One-based page number.
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// Contents of the "Pet Details" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogInfo {
    pub title: String,
    pub name: String,
    pub description: String,
    /// Inline messages; empty until a save was attempted.
    pub violations: Vec<(PetField, String)>,
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmInfo {
    pub title: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInfo {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

/// Command hints for the current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
