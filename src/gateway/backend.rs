//! Gateway abstraction over the remote pet service.
//!
//! This module defines the [`Gateway`] trait that abstracts over how the remote
//! collection is reached. The trait is minimal and maps one method to each
//! resource endpoint; it carries no client-side state.
//!
//! Every method returns a `'static` boxed future. Implementations capture what
//! they need (a cloned HTTP client, a shared handle) up front, so a call can be
//! started, stored, and awaited later without borrowing the gateway or the
//! application state.

use crate::domain::error::Result;
use crate::domain::{Pet, PetId};
use futures_util::future::BoxFuture;

/// Abstraction over the remote resource endpoints.
///
/// # Implementations
///
/// - [`HttpGateway`](crate::gateway::HttpGateway): JSON over HTTP (default)
/// - [`MemoryGateway`](crate::gateway::MemoryGateway): in-process collection
///
/// # Examples
///
/// ```no_run
/// use petdesk::gateway::{Gateway, HttpGateway};
///
/// # async fn run() -> petdesk::Result<()> {
/// let gateway = HttpGateway::new("http://localhost:8080/api/v1", "pet");
/// let pets = gateway.list().await?;
/// # Ok(())
/// # }
/// ```
pub trait Gateway: Send + Sync {
    /// Fetches the full collection (`GET /pet`).
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Transport`](crate::PetdeskError::Transport) on
    /// any failure.
    fn list(&self) -> BoxFuture<'static, Result<Vec<Pet>>>;

    /// Creates a record (`POST /pet` with `{name, description}`).
    ///
    /// Resolves to the created record including its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Transport`](crate::PetdeskError::Transport) on
    /// any failure.
    fn create(&self, candidate: &Pet) -> BoxFuture<'static, Result<Pet>>;

    /// Replaces a record (`PUT /pet/id/{id}` with the full record).
    ///
    /// The response body, if any, is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Transport`](crate::PetdeskError::Transport) on
    /// any failure, including a record without an id.
    fn update(&self, pet: &Pet) -> BoxFuture<'static, Result<()>>;

    /// Deletes a record (`DELETE /pet/id/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Transport`](crate::PetdeskError::Transport) on
    /// any failure.
    fn delete(&self, id: &PetId) -> BoxFuture<'static, Result<()>>;
}
