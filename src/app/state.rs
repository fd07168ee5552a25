//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single owner of every piece of
//! console state: the record store, the filter rules, the selection, the open
//! editing session and the open delete confirmation. The event handler is the
//! only writer; everything else reads through the read-model accessors.
//!
//! # State Components
//!
//! - **Store**: Authoritative record list (see [`crate::store`])
//! - **Filters**: Rule values plus the engine that evaluates them
//! - **Visible**: Indices of records passing the filters, recomputed by
//!   [`AppState::refresh`] after every store or filter change
//! - **Selection / Editing / Delete confirmation**: Transient interaction state
//! - **Sort / Pagination**: Presentation-only table state
//!
//! # Example
//!
//! ```
//! use petdesk::app::{AppState, ConsolePhase};
//! use petdesk::ui::Theme;
//!
//! let state = AppState::new(Theme::default());
//! assert_eq!(state.phase(), ConsolePhase::Idle);
//! assert!(state.visible_records().is_empty());
//! ```

use crate::app::modes::ConsolePhase;
use crate::app::notification::{self, Notification};
use crate::app::selection::{DeleteConfirmation, Selection};
use crate::app::session::EditingSession;
use crate::domain::validation::{default_rules, ValidationRule};
use crate::domain::{Pet, PetField, PetId};
use crate::filter::{FilterEngine, FilterState};
use crate::gateway::SessionTicket;
use crate::store::RecordStore;
use crate::ui::table::{Pagination, SortState};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnInfo, ConfirmInfo, DialogInfo, DisplayRow, EmptyState, FooterInfo, HeaderInfo,
    PaginatorInfo, UIViewModel,
};
use std::time::Duration;

/// Title shown in the header.
pub const TITLE: &str = "Pet Shop Demo";

/// Message shown when no record passes the filters.
pub const EMPTY_MESSAGE: &str = "No Pets found.";

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authoritative record list.
    pub store: RecordStore,

    /// Filter rule values keyed by `global` or field.
    pub filters: FilterState,

    /// Evaluates `filters` against the store.
    pub engine: FilterEngine,

    /// Text of the global search input. Kept alongside the global rule so the
    /// input can show what was typed even when the rule normalizes it away.
    pub global_filter_value: String,

    /// Indices into the store of records passing the filters.
    pub visible: Vec<usize>,

    pub selection: Selection,

    /// Open "Pet Details" dialog, if any.
    pub editing: Option<EditingSession>,

    /// Open delete confirmation, if any.
    pub delete_confirmation: Option<DeleteConfirmation>,

    pub sort: SortState,

    pub pagination: Pagination,

    /// Color scheme for rendering.
    pub theme: Theme,

    /// Rules applied to every editing session.
    pub rules: Vec<ValidationRule>,

    /// Lifetime of notifications raised by the handler.
    pub notification_life: Duration,

    last_ticket: SessionTicket,
}

impl AppState {
    /// Creates an empty state with default filters, rules and pagination.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            store: RecordStore::new(),
            filters: FilterState::default(),
            engine: FilterEngine::default(),
            global_filter_value: String::new(),
            visible: Vec::new(),
            selection: Selection::default(),
            editing: None,
            delete_confirmation: None,
            sort: SortState::default(),
            pagination: Pagination::default(),
            theme,
            rules: default_rules(),
            notification_life: notification::DEFAULT_LIFE,
            last_ticket: 0,
        }
    }

    /// Current interaction phase, derived from the dialog and selection fields.
    #[must_use]
    pub fn phase(&self) -> ConsolePhase {
        if self.editing.is_some() {
            ConsolePhase::Editing
        } else if self.delete_confirmation.is_some() {
            ConsolePhase::ConfirmingDelete
        } else if self.selection.current(&self.store).is_some() {
            ConsolePhase::Selected
        } else {
            ConsolePhase::Idle
        }
    }

    /// Recomputes visibility and keeps the current page in range.
    pub fn refresh(&mut self) {
        self.visible = self.engine.visible(&self.filters, self.store.pets());
        self.pagination.clamp(self.visible.len());
    }

    fn issue_ticket(&mut self) -> SessionTicket {
        self.last_ticket += 1;
        self.last_ticket
    }

    /// Every record in store order.
    #[must_use]
    pub fn records(&self) -> &[Pet] {
        self.store.pets()
    }

    /// Records passing the filters, in store order.
    #[must_use]
    pub fn visible_records(&self) -> Vec<&Pet> {
        self.visible
            .iter()
            .filter_map(|index| self.store.pets().get(*index))
            .collect()
    }

    #[must_use]
    pub const fn editing_session(&self) -> Option<&EditingSession> {
        self.editing.as_ref()
    }

    /// The selected record, if it is still in the store.
    #[must_use]
    pub fn selected(&self) -> Option<&Pet> {
        self.selection.current(&self.store)
    }

    #[must_use]
    pub const fn filter_state(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub const fn delete_confirm_state(&self) -> Option<&DeleteConfirmation> {
        self.delete_confirmation.as_ref()
    }

    /// Opens an editing session for a new record.
    ///
    /// Returns `false` if a dialog is already open.
    pub fn open_new(&mut self) -> bool {
        if self.phase().is_modal() {
            tracing::debug!(phase = ?self.phase(), "new ignored while a dialog is open");
            return false;
        }
        let ticket = self.issue_ticket();
        self.selection.clear();
        self.editing = Some(EditingSession::new_record(ticket, self.rules.clone()));
        tracing::debug!(ticket, "editing session opened for new record");
        true
    }

    /// Opens an editing session for `id`, only if it is the current selection.
    pub fn request_edit(&mut self, id: &PetId) -> bool {
        if self.phase() != ConsolePhase::Selected || !self.selection.is_selected(id, &self.store) {
            tracing::debug!(pet_id = %id, phase = ?self.phase(), "edit request ignored");
            return false;
        }
        let Some(source) = self.store.get(id).cloned() else {
            return false;
        };
        let ticket = self.issue_ticket();
        self.selection.clear();
        self.editing = Some(EditingSession::edit_record(&source, ticket, self.rules.clone()));
        tracing::debug!(pet_id = %id, ticket, "editing session opened");
        true
    }

    /// Opens the delete confirmation for `id`, only if it is the current selection.
    pub fn request_delete(&mut self, id: &PetId) -> bool {
        if self.phase() != ConsolePhase::Selected || !self.selection.is_selected(id, &self.store) {
            tracing::debug!(pet_id = %id, phase = ?self.phase(), "delete request ignored");
            return false;
        }
        let Some(target) = self.store.get(id).cloned() else {
            return false;
        };
        self.selection.clear();
        self.delete_confirmation = Some(DeleteConfirmation { target });
        true
    }

    /// Closes the confirmation and removes its target from the store.
    ///
    /// Returns the removed id so the caller can ask the service to delete it.
    /// The store is mutated before the service has been contacted.
    pub fn confirm_delete(&mut self) -> Option<PetId> {
        let confirmation = self.delete_confirmation.take()?;
        let id = confirmation.target.id?;
        let removed = self.store.remove(&id);
        tracing::debug!(pet_id = %id, removed = removed.is_some(), "record removed locally");
        self.refresh();
        Some(id)
    }

    /// Closes the confirmation without touching the store.
    pub fn cancel_delete(&mut self) -> bool {
        self.delete_confirmation.take().is_some()
    }

    /// Closes the editing session if it carries `ticket`.
    pub fn close_session(&mut self, ticket: SessionTicket) -> bool {
        if self.editing.as_ref().is_some_and(|s| s.ticket() == ticket) {
            self.editing = None;
            true
        } else {
            tracing::debug!(ticket, "response for a session that is no longer open");
            false
        }
    }

    /// Notification with the configured lifetime.
    #[must_use]
    pub fn success(&self, detail: &str) -> Notification {
        Notification::success(detail, self.notification_life)
    }

    #[must_use]
    pub fn unexpected_error(&self) -> Notification {
        Notification::unexpected_error(self.notification_life)
    }

    /// Visible rows after sorting, as store indices.
    #[must_use]
    pub fn sorted_rows(&self) -> Vec<usize> {
        let mut rows = self.visible.clone();
        self.sort.apply(self.store.pets(), &mut rows);
        rows
    }

    /// Computes a renderable view model from the current state.
    ///
    /// Toasts are left empty; the runtime owns notification lifetimes and
    /// fills them in.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", visible = self.visible.len()).entered();

        let rows = self.sorted_rows();
        let total = rows.len();
        let selected = self.selected().and_then(|pet| pet.id.clone());

        let display_rows = rows[self.pagination.range(total)]
            .iter()
            .filter_map(|index| self.store.pets().get(*index))
            .map(|pet| DisplayRow {
                cells: PetField::ALL.iter().map(|f| pet.field(*f).into_owned()).collect(),
                is_selected: selected.as_ref().is_some_and(|id| pet.has_id(id)),
                highlights: self.engine.highlights(&self.filters, pet),
            })
            .collect();

        UIViewModel {
            header: HeaderInfo {
                title: TITLE.to_string(),
                global_search: self.global_filter_value.clone(),
            },
            columns: self.compute_columns(),
            rows: display_rows,
            paginator: PaginatorInfo {
                report: self.pagination.report(total),
                page: self.pagination.page() + 1,
                page_count: self.pagination.page_count(total),
                page_size: self.pagination.page_size(),
            },
            empty_state: (total == 0).then(|| EmptyState {
                message: EMPTY_MESSAGE.to_string(),
            }),
            dialog: self.editing.as_ref().map(|session| DialogInfo {
                title: "Pet Details".to_string(),
                name: session.record.name.clone(),
                description: session.record.description.clone(),
                violations: session
                    .visible_violations()
                    .into_iter()
                    .map(|v| (v.field, v.message))
                    .collect(),
                is_new: session.is_new,
            }),
            confirm: self.delete_confirmation.as_ref().map(|confirmation| ConfirmInfo {
                title: "Confirm".to_string(),
                prompt: confirmation.prompt(),
            }),
            toasts: Vec::new(),
            footer: self.compute_footer(),
        }
    }

    fn compute_columns(&self) -> Vec<ColumnInfo> {
        PetField::ALL
            .iter()
            .map(|field| ColumnInfo {
                field: *field,
                header: field.header().to_string(),
                sort_marker: self.sort.marker(*field),
                filter: self
                    .filters
                    .rule(crate::filter::FilterKey::Field(*field))
                    .and_then(|rule| {
                        rule.active_value()
                            .map(|value| format!("{}: {value}", rule.match_mode))
                    }),
            })
            .collect()
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.phase() {
            ConsolePhase::Idle => "select <id>  new  search <text>  sort <field>  next/prev  export csv|pdf  quit",
            ConsolePhase::Selected => "edit  delete  unselect  new  search <text>  sort <field>  quit",
            ConsolePhase::Editing => "set name|description <value>  save  cancel",
            ConsolePhase::ConfirmingDelete => "yes  no",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(pets: Vec<Pet>) -> AppState {
        let mut state = AppState::new(Theme::default());
        state.store.replace_all(pets);
        state.refresh();
        state
    }

    fn two_pets() -> AppState {
        loaded(vec![
            Pet::new("Fido", "dog").with_id(1),
            Pet::new("Rex", "cat").with_id(2),
        ])
    }

    #[test]
    fn edit_and_delete_require_current_selection() {
        let mut state = two_pets();
        let before = state.clone();

        assert!(!state.request_edit(&PetId::Number(2)));
        assert!(!state.request_delete(&PetId::Number(2)));

        state.selection.select(Some(PetId::Number(1)));
        assert!(!state.request_edit(&PetId::Number(2)));
        assert!(!state.request_delete(&PetId::Number(2)));

        assert!(state.editing.is_none());
        assert!(state.delete_confirmation.is_none());
        assert_eq!(state.store, before.store);
    }

    #[test]
    fn phase_follows_selection_and_dialogs() {
        let mut state = two_pets();
        assert_eq!(state.phase(), ConsolePhase::Idle);

        state.selection.select(Some(PetId::Number(2)));
        assert_eq!(state.phase(), ConsolePhase::Selected);

        assert!(state.request_delete(&PetId::Number(2)));
        assert_eq!(state.phase(), ConsolePhase::ConfirmingDelete);

        assert!(state.cancel_delete());
        assert_eq!(state.phase(), ConsolePhase::Idle);
        assert_eq!(state.store.len(), 2);
    }

    #[test]
    fn confirm_delete_removes_captured_target() {
        let mut state = two_pets();
        state.selection.select(Some(PetId::Number(1)));
        state.request_delete(&PetId::Number(1));

        assert_eq!(state.confirm_delete(), Some(PetId::Number(1)));
        assert!(state.delete_confirmation.is_none());
        assert_eq!(state.visible_records().len(), 1);
        assert!(!state.store.contains(&PetId::Number(1)));
    }

    #[test]
    fn stale_tickets_do_not_close_newer_sessions() {
        let mut state = two_pets();
        state.open_new();
        let first = state.editing.as_ref().unwrap().ticket();
        state.editing = None;
        state.open_new();

        assert!(!state.close_session(first));
        assert!(state.editing.is_some());
    }

    #[test]
    fn viewmodel_paginates_sorted_rows() {
        let pets = (1..=12_i64)
            .map(|i| Pet::new(format!("Pet{i:02}"), "").with_id(i))
            .collect();
        let mut state = loaded(pets);
        state.pagination.set_page_size(5).unwrap();
        state.sort.cycle(PetField::Name);
        state.sort.cycle(PetField::Name);

        let vm = state.compute_viewmodel();

        assert_eq!(vm.rows.len(), 5);
        assert_eq!(vm.rows[0].cells[1], "Pet12");
        assert_eq!(vm.paginator.report, "Showing 1 to 5 of 12 pets");
        assert_eq!(vm.columns[1].sort_marker, " ▼");
        assert_eq!(state.records()[0].name, "Pet01");
    }

    #[test]
    fn viewmodel_reports_empty_state() {
        let state = loaded(vec![]);
        let vm = state.compute_viewmodel();

        assert_eq!(vm.empty_state.unwrap().message, "No Pets found.");
        assert_eq!(vm.paginator.report, "Showing 0 to 0 of 0 pets");
    }
}
