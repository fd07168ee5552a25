//! Top-level rendering coordinator.
//!
//! Layout, top to bottom:
//!
//! ```text
//! [Header]
//! [Toolbar]
//! [Border]
//! [Table Headers]
//! [Table Rows | Empty State]
//! [Border]
//! [Paginator]
//! [Footer hints]
//! [Dialog | Confirm]      (only when open)
//! [Toasts]                (only when live)
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders a view model into an ANSI-styled frame.
///
/// The frame is plain lines; no cursor positioning or screen clearing.
#[must_use]
pub fn render(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();

    components::render_header(&mut out, &vm.header, theme, cols);
    components::render_border(&mut out, &theme.colors.border, cols);
    components::render_table_headers(&mut out, &vm.columns, theme, cols);

    if let Some(empty) = &vm.empty_state {
        components::render_empty_state(&mut out, empty, theme, cols);
    } else {
        components::render_table_rows(&mut out, &vm.columns, &vm.rows, theme, cols);
    }

    components::render_border(&mut out, &theme.colors.border, cols);
    components::render_footer(&mut out, &vm.paginator, &vm.footer, theme, cols);

    if let Some(dialog) = &vm.dialog {
        components::render_dialog(&mut out, dialog, theme, cols);
    }
    if let Some(confirm) = &vm.confirm {
        components::render_confirm(&mut out, confirm, theme, cols);
    }
    components::render_toasts(&mut out, &vm.toasts, theme, cols);

    out
}

/// Computes the view model of `state` and renders it.
#[must_use]
pub fn render_state(state: &AppState, cols: usize) -> String {
    render(&state.compute_viewmodel(), &state.theme, cols)
}
