//! Dialog component renderers: "Pet Details" and the delete confirmation.

use crate::domain::PetField;
use crate::ui::helpers::{fit, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ConfirmInfo, DialogInfo};

fn frame_top(out: &mut String, title: &str, theme: &Theme, width: usize) {
    let label = format!("┌ {title} ");
    out.push_str(&Theme::fg(&theme.colors.dialog_border));
    out.push_str(Theme::bold());
    out.push_str(&label);
    out.push_str(&"─".repeat(width.saturating_sub(label.chars().count())));
    out.push_str(Theme::reset());
    out.push('\n');
}

fn frame_line(out: &mut String, text: &str, color: &str, theme: &Theme, width: usize) {
    out.push_str(&Theme::fg(&theme.colors.dialog_border));
    out.push_str("│ ");
    out.push_str(&Theme::fg(color));
    out.push_str(&fit(text, width.saturating_sub(2)));
    out.push_str(Theme::reset());
    out.push('\n');
}

fn frame_bottom(out: &mut String, buttons: &str, theme: &Theme) {
    out.push_str(&Theme::fg(&theme.colors.dialog_border));
    out.push_str("└ ");
    out.push_str(buttons);
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Renders the editing dialog with its inline validation messages.
///
/// ```text
/// ┌ Pet Details ───────────────
/// │ Name: _
/// │   Name is required.
/// │ Description: dog
/// └ [Cancel] [Save]
/// ```
pub fn render_dialog(out: &mut String, dialog: &DialogInfo, theme: &Theme, cols: usize) {
    let width = cols.min(60);
    frame_top(out, &dialog.title, theme, width);

    for (field, value) in [
        (PetField::Name, &dialog.name),
        (PetField::Description, &dialog.description),
    ] {
        let shown = if value.is_empty() { "_" } else { value.as_str() };
        let line = format!("{}: {}", field.header(), truncate(shown, width));
        frame_line(out, &line, &theme.colors.text_normal, theme, width);

        for (_, message) in dialog.violations.iter().filter(|(f, _)| *f == field) {
            frame_line(out, &format!("  {message}"), &theme.colors.error_fg, theme, width);
        }
    }

    frame_bottom(out, "[Cancel] [Save]", theme);
}

/// Renders the delete confirmation.
///
/// ```text
/// ┌ Confirm ───────────────────
/// │ Are you sure you want to delete Rex?
/// └ [No] [Yes]
/// ```
pub fn render_confirm(out: &mut String, confirm: &ConfirmInfo, theme: &Theme, cols: usize) {
    let width = cols.min(60);
    frame_top(out, &confirm.title, theme, width);
    frame_line(out, &confirm.prompt, &theme.colors.text_normal, theme, width);
    frame_bottom(out, "[No] [Yes]", theme);
}
