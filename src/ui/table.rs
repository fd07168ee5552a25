//! Presentation-only table state: sorting and client-side pagination.
//!
//! Both operate on row indices produced by the filter engine. Neither ever
//! reorders or slices the record store itself.

use crate::domain::error::{PetdeskError, Result};
use crate::domain::{Pet, PetField, PetId};
use std::cmp::Ordering;
use std::ops::Range;

/// Rows-per-page choices offered by the paginator.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Removable single-column sort.
///
/// Sorting the same column repeatedly cycles ascending, descending, unsorted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    column: Option<(PetField, SortOrder)>,
}

impl SortState {
    #[must_use]
    pub const fn column(&self) -> Option<(PetField, SortOrder)> {
        self.column
    }

    /// Advances the sort cycle for `field`.
    pub fn cycle(&mut self, field: PetField) {
        self.column = match self.column {
            Some((current, SortOrder::Ascending)) if current == field => {
                Some((field, SortOrder::Descending))
            }
            Some((current, SortOrder::Descending)) if current == field => None,
            _ => Some((field, SortOrder::Ascending)),
        };
        tracing::debug!(sort = ?self.column, "sort changed");
    }

    /// Marker shown next to a column header.
    #[must_use]
    pub fn marker(&self, field: PetField) -> &'static str {
        match self.column {
            Some((current, SortOrder::Ascending)) if current == field => " ▲",
            Some((current, SortOrder::Descending)) if current == field => " ▼",
            _ => "",
        }
    }

    /// Stable-sorts `rows` (indices into `pets`) by the active column.
    ///
    /// Numeric ids compare numerically; everything else compares as text.
    pub fn apply(&self, pets: &[Pet], rows: &mut [usize]) {
        let Some((field, order)) = self.column else {
            return;
        };

        rows.sort_by(|a, b| {
            let ordering = compare_field(&pets[*a], &pets[*b], field);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }
}

fn compare_field(a: &Pet, b: &Pet, field: PetField) -> Ordering {
    if field == PetField::Id {
        if let (Some(PetId::Number(x)), Some(PetId::Number(y))) = (&a.id, &b.id) {
            return x.cmp(y);
        }
    }
    a.field(field).cmp(&b.field(field))
}

/// Client-side paginator over the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Creates a paginator on the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Config`] if `page_size` is not one of
    /// [`PAGE_SIZE_OPTIONS`].
    pub fn new(page_size: usize) -> Result<Self> {
        let mut pagination = Self::default();
        pagination.set_page_size(page_size)?;
        Ok(pagination)
    }

    /// Zero-based current page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` rows (at least one).
    #[must_use]
    pub const fn page_count(&self, total: usize) -> usize {
        if total == 0 {
            1
        } else {
            total.div_ceil(self.page_size)
        }
    }

    /// Moves to `page`, clamped to the last page.
    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.min(self.page_count(total) - 1);
    }

    /// Changes rows per page and returns to the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Config`] if `page_size` is not one of
    /// [`PAGE_SIZE_OPTIONS`].
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(PetdeskError::Config(format!(
                "page size must be one of {PAGE_SIZE_OPTIONS:?}, got {page_size}"
            )));
        }
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    /// Keeps the current page valid after the row count changed.
    pub fn clamp(&mut self, total: usize) {
        self.set_page(self.page, total);
    }

    /// Row positions shown on the current page.
    #[must_use]
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    /// Paginator report, e.g. `Showing 1 to 10 of 42 pets`.
    #[must_use]
    pub fn report(&self, total: usize) -> String {
        let range = self.range(total);
        let first = if range.is_empty() { 0 } else { range.start + 1 };
        format!("Showing {first} to {} of {total} pets", range.end)
    }
}
