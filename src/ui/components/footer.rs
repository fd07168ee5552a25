//! Footer component renderer: paginator and command hints.

use crate::ui::helpers::{center, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, PaginatorInfo};
use std::fmt::Write;

/// Renders the paginator line and the dimmed command hints.
///
/// # Layout
///
/// ```text
/// Showing 1 to 10 of 42 pets   Page 1 of 5   Rows: 10 (5|10|25)
///            edit  delete  unselect  new  quit
/// ```
pub fn render_footer(
    out: &mut String,
    paginator: &PaginatorInfo,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) {
    let line = format!(
        "{}   Page {} of {}   Rows: {} (5|10|25)",
        paginator.report, paginator.page, paginator.page_count, paginator.page_size
    );
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    let _ = writeln!(out, "{}", truncate(&line, cols));
    out.push_str(Theme::dim());
    out.push_str(&center(&footer.keybindings, cols));
    out.push_str(Theme::reset());
    out.push('\n');
}
