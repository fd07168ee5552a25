//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime (command loop and gateway tasks) and
//! the domain, store and filter layers. It implements the event-driven core
//! of the console.
//!
//! # Architecture
//!
//! ```text
//! User Intent → Event → handle_event → State Mutations → Actions → Side Effects
//!                            ↑                                         ↓
//!                            └──────────── Gateway Responses ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Console phase state machine
//! - [`notification`]: Toast messages
//! - [`selection`]: Row selection and delete confirmation
//! - [`session`]: The record being created or edited
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod notification;
pub mod selection;
pub mod session;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::ConsolePhase;
pub use notification::{Notification, Severity};
pub use selection::{DeleteConfirmation, Selection};
pub use session::EditingSession;
pub use state::AppState;
