//! Table component renderer.
//!
//! Renders the column header line and one line per row. The first column is
//! the single-selection marker; the remaining columns come from the view
//! model in display order.

use crate::domain::PetField;
use crate::ui::helpers::{self, padding, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnInfo, DisplayRow};
use std::fmt::Write;

const MARKER_WIDTH: usize = 4;
const GAP: usize = 2;

/// Column widths for a terminal `cols` wide.
///
/// Id and Name get fixed shares; Description takes the rest.
fn column_widths(columns: &[ColumnInfo], cols: usize) -> Vec<usize> {
    let available = cols.saturating_sub(MARKER_WIDTH + GAP * columns.len().saturating_sub(1));
    let mut remaining = available;
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|column| {
            let width = match column.field {
                PetField::Id => 8,
                PetField::Name => (available / 3).max(10),
                PetField::Description => 0,
            }
            .min(remaining);
            remaining -= width;
            width
        })
        .collect();

    if let Some(index) = columns.iter().position(|c| c.field == PetField::Description) {
        widths[index] = remaining;
    }
    widths
}

/// Renders column headers with sort markers and active column filters.
pub fn render_table_headers(out: &mut String, columns: &[ColumnInfo], theme: &Theme, cols: usize) {
    let widths = column_widths(columns, cols);

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&" ".repeat(MARKER_WIDTH));
    for (index, (column, width)) in columns.iter().zip(&widths).enumerate() {
        if index > 0 {
            out.push_str(&" ".repeat(GAP));
        }
        let label = column.filter.as_ref().map_or_else(
            || format!("{}{}", column.header, column.sort_marker),
            |filter| format!("{}{} [{filter}]", column.header, column.sort_marker),
        );
        out.push_str(&helpers::fit(&label, *width));
    }
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(&Theme::fg(&theme.colors.border));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Renders every row of the current page.
pub fn render_table_rows(
    out: &mut String,
    columns: &[ColumnInfo],
    rows: &[DisplayRow],
    theme: &Theme,
    cols: usize,
) {
    let widths = column_widths(columns, cols);
    for row in rows {
        render_table_row(out, columns, &widths, row, theme);
    }
}

/// Renders one row.
///
/// # Styling Precedence
///
/// 1. Selection colors (if `is_selected`)
/// 2. Global search highlights (unless selected)
/// 3. Normal text color
fn render_table_row(
    out: &mut String,
    columns: &[ColumnInfo],
    widths: &[usize],
    row: &DisplayRow,
    theme: &Theme,
) {
    if row.is_selected {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }

    let _ = write!(out, "{:<width$}", if row.is_selected { "(•)" } else { "( )" }, width = MARKER_WIDTH);

    for (index, ((column, width), cell)) in columns.iter().zip(widths).zip(&row.cells).enumerate() {
        if index > 0 {
            out.push_str(&" ".repeat(GAP));
        }
        let text = truncate(cell, *width);
        helpers::push_highlighted(out, &text, row.highlight(column.field), theme, row.is_selected);
        out.push_str(&padding(&text, *width));
    }

    out.push_str(Theme::reset());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnInfo> {
        PetField::ALL
            .iter()
            .map(|field| ColumnInfo {
                field: *field,
                header: field.header().to_string(),
                sort_marker: "",
                filter: None,
            })
            .collect()
    }

    #[test]
    fn description_takes_remaining_width() {
        let widths = column_widths(&columns(), 80);
        assert_eq!(widths.iter().sum::<usize>() + MARKER_WIDTH + 2 * GAP, 80);
        assert_eq!(widths[0], 8);
    }

    #[test]
    fn narrow_terminals_do_not_underflow() {
        let widths = column_widths(&columns(), 6);
        assert!(widths.iter().all(|w| *w <= 6));
    }
}
