//! Transient user notifications (toasts).

use std::time::Duration;

/// Default time a notification stays visible.
pub const DEFAULT_LIFE: Duration = Duration::from_millis(3000);

pub const SAVED: &str = "Pet has been successfully saved.";
pub const UPDATED: &str = "Pet has been successfully updated.";
pub const DELETED: &str = "Pet has been successfully deleted.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occured.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A toast message with its display lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub life: Duration,
}

impl Notification {
    #[must_use]
    pub fn success(detail: impl Into<String>, life: Duration) -> Self {
        Self {
            severity: Severity::Success,
            summary: "Successful".to_string(),
            detail: detail.into(),
            life,
        }
    }

    #[must_use]
    pub fn error(detail: impl Into<String>, life: Duration) -> Self {
        Self {
            severity: Severity::Error,
            summary: "Error!".to_string(),
            detail: detail.into(),
            life,
        }
    }

    /// The generic failure toast shown for any failed save or delete.
    #[must_use]
    pub fn unexpected_error(life: Duration) -> Self {
        Self::error(UNEXPECTED_ERROR, life)
    }
}
