//! Executes gateway requests as asynchronous tasks.
//!
//! [`execute`] starts the remote call for a [`GatewayRequest`] and returns a
//! future resolving to the matching [`GatewayResponse`]. The future never
//! fails: transport errors become [`GatewayResponse::Failed`] so the runtime
//! can feed every outcome back into the event handler uniformly.

use crate::domain::error::Result;
use crate::gateway::backend::Gateway;
use crate::gateway::messages::{GatewayOp, GatewayRequest, GatewayResponse, SessionTicket};
use futures_util::future::BoxFuture;
use tracing::Instrument;

/// Maps a gateway result to a response with consistent logging.
///
/// Every remote operation goes through this helper so that success and
/// failure are logged the same way.
fn handle_gateway_result<T, F>(
    op: GatewayOp,
    ticket: Option<SessionTicket>,
    result: Result<T>,
    on_success: F,
) -> GatewayResponse
where
    F: FnOnce(T) -> GatewayResponse,
{
    match result {
        Ok(value) => {
            tracing::debug!(op = %op, "gateway operation successful");
            on_success(value)
        }
        Err(e) => {
            tracing::warn!(op = %op, error = %e, "gateway operation failed");
            GatewayResponse::Failed {
                op,
                ticket,
                message: e.to_string(),
            }
        }
    }
}

/// Starts the remote call for `request`.
///
/// The call is started eagerly against `gateway` (which is only borrowed for
/// the duration of this function); the returned future owns everything it
/// needs and may be polled from any task.
///
/// # Example
///
/// ```
/// use petdesk::gateway::{execute, GatewayRequest, GatewayResponse, MemoryGateway};
///
/// # tokio_test_block(async {
/// let gateway = MemoryGateway::sample();
/// let response = execute(&gateway, GatewayRequest::List).await;
/// assert!(matches!(response, GatewayResponse::Listed { .. }));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub fn execute<G>(gateway: &G, request: GatewayRequest) -> BoxFuture<'static, GatewayResponse>
where
    G: Gateway + ?Sized,
{
    let op = request.op();
    let span = tracing::debug_span!("gateway_call", op = %op, ticket = ?request.ticket());

    let task: BoxFuture<'static, GatewayResponse> = match request {
        GatewayRequest::List => {
            let call = gateway.list();
            Box::pin(async move {
                handle_gateway_result(op, None, call.await, |pets| {
                    tracing::debug!(pet_count = pets.len(), "collection fetched");
                    GatewayResponse::Listed { pets }
                })
            })
        }
        GatewayRequest::Create { candidate, ticket } => {
            let call = gateway.create(&candidate);
            Box::pin(async move {
                handle_gateway_result(op, Some(ticket), call.await, |pet| {
                    GatewayResponse::Created { pet, ticket }
                })
            })
        }
        GatewayRequest::Update { pet, ticket } => {
            let call = gateway.update(&pet);
            Box::pin(async move {
                handle_gateway_result(op, Some(ticket), call.await, |()| {
                    GatewayResponse::Updated { pet, ticket }
                })
            })
        }
        GatewayRequest::Delete { id } => {
            let call = gateway.delete(&id);
            Box::pin(async move {
                handle_gateway_result(op, None, call.await, |()| GatewayResponse::Deleted { id })
            })
        }
    };

    Box::pin(task.instrument(span))
}
