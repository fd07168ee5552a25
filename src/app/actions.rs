//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` after each
//! event and the runtime carries them out: gateway requests become async
//! tasks, notifications are queued for display, exports are written to disk.
//!
//! # Example
//!
//! ```
//! use petdesk::app::Action;
//! use petdesk::gateway::GatewayRequest;
//!
//! let actions = vec![Action::Gateway(GatewayRequest::List)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::app::notification::Notification;
use crate::export::ExportFormat;
use crate::gateway::GatewayRequest;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Starts a remote call. Its outcome comes back as
    /// [`Event::Gateway`](crate::app::Event::Gateway).
    Gateway(GatewayRequest),

    /// Shows a transient notification.
    Notify(Notification),

    /// Writes the current store snapshot to an export file.
    Export(ExportFormat),
}
