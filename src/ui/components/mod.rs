//! Composable UI component renderers.
//!
//! Each component appends the lines for one part of the screen to a shared
//! `String` buffer, so the whole frame can be written to the terminal in a
//! single call (or inspected in tests).
//!
//! # Components
//!
//! - [`header`]: Title and toolbar with the global search mirror
//! - [`table`]: Column headers and the rows of the current page
//! - [`empty`]: "No Pets found." in place of the rows
//! - [`footer`]: Paginator and command hints
//! - [`dialog`]: "Pet Details" and the delete confirmation
//! - [`toast`]: Success and error notifications

mod dialog;
mod empty;
mod footer;
mod header;
mod table;
mod toast;

pub use dialog::{render_confirm, render_dialog};
pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::render_header;
pub use table::{render_table_headers, render_table_rows};
pub use toast::render_toasts;

use crate::ui::theme::Theme;

/// Appends a horizontal separator line.
pub fn render_border(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}
