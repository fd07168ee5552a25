//! Notification (toast) renderer.

use crate::app::notification::Severity;
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

/// Renders one line per live notification.
pub fn render_toasts(out: &mut String, toasts: &[ToastInfo], theme: &Theme, cols: usize) {
    for toast in toasts {
        let (icon, color) = match toast.severity {
            Severity::Success => ("✔", &theme.colors.success_fg),
            Severity::Error => ("✖", &theme.colors.error_fg),
        };
        let line = format!("{icon} {}: {}", toast.summary, toast.detail);
        out.push_str(&Theme::fg(color));
        out.push_str(&truncate(&line, cols));
        out.push_str(Theme::reset());
        out.push('\n');
    }
}
