//! Remote gateway to the pet service.
//!
//! # Organization
//!
//! - [`backend`]: The [`Gateway`] trait
//! - [`http`]: JSON-over-HTTP implementation
//! - [`memory`]: In-process implementation for offline use and tests
//! - [`messages`]: Request/response types exchanged with the runtime
//! - [`dispatch`]: Turns a request into a response future

pub mod backend;
pub mod dispatch;
pub mod http;
pub mod memory;
pub mod messages;

pub use backend::Gateway;
pub use dispatch::execute;
pub use http::HttpGateway;
pub use memory::MemoryGateway;
pub use messages::{GatewayOp, GatewayRequest, GatewayResponse, SessionTicket};
