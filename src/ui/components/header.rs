//! Header component renderer.
//!
//! Renders the centered title and the toolbar line with the global search
//! input mirror.

use crate::ui::helpers::{center, padding, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use std::fmt::Write;

const TOOLBAR_ACTIONS: &str = "[+ New] [Excel] [PDF]";

/// Renders the title line followed by the toolbar line.
///
/// # Layout
///
/// ```text
///                 Pet Shop Demo
/// [Clear] Search: do_                 [+ New] [Excel] [PDF]
/// ```
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    let title = center(&header.title, cols);
    out.push_str(&title);
    out.push_str(&padding(&title, cols));
    out.push_str(Theme::reset());
    out.push('\n');

    let search = if header.global_search.is_empty() {
        "Global Search...".to_string()
    } else {
        header.global_search.clone()
    };
    let left = format!("[Clear] Search: {}", truncate(&search, cols / 2));

    out.push_str(&Theme::fg(&theme.colors.text_normal));
    let _ = write!(out, "{left}{}{TOOLBAR_ACTIONS}", padding(&left, cols.saturating_sub(TOOLBAR_ACTIONS.len())));
    out.push_str(Theme::reset());
    out.push('\n');
}
