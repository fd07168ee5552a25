//! Request and response types exchanged with the gateway executor.
//!
//! The application layer never awaits the remote service directly. It emits a
//! [`GatewayRequest`] as an action; the runtime turns it into an asynchronous
//! task, and the task's outcome comes back as a [`GatewayResponse`] event.
//! Responses are applied in whatever order the tasks complete.

use crate::domain::{Pet, PetId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the editing session that issued a create or update.
///
/// A response only closes the session whose ticket it carries, so a late
/// response cannot close a session the user opened afterwards.
pub type SessionTicket = u64;

/// Kind of remote operation, used to route failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GatewayOp {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for GatewayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Remote operations requested by the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayRequest {
    /// Fetch the full collection.
    List,

    /// Create a record from a candidate (its id is ignored).
    Create {
        candidate: Pet,
        ticket: SessionTicket,
    },

    /// Replace a record with the full working copy.
    Update {
        pet: Pet,
        ticket: SessionTicket,
    },

    /// Delete a record that has already been removed locally.
    Delete {
        id: PetId,
    },
}

impl GatewayRequest {
    /// Operation kind of this request.
    #[must_use]
    pub const fn op(&self) -> GatewayOp {
        match self {
            Self::List => GatewayOp::List,
            Self::Create { .. } => GatewayOp::Create,
            Self::Update { .. } => GatewayOp::Update,
            Self::Delete { .. } => GatewayOp::Delete,
        }
    }

    /// Session ticket carried by create and update requests.
    #[must_use]
    pub const fn ticket(&self) -> Option<SessionTicket> {
        match self {
            Self::Create { ticket, .. } | Self::Update { ticket, .. } => Some(*ticket),
            Self::List | Self::Delete { .. } => None,
        }
    }
}

/// Outcomes of remote operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayResponse {
    /// The collection was fetched.
    Listed {
        pets: Vec<Pet>,
    },

    /// The service created a record and assigned its id.
    Created {
        pet: Pet,
        ticket: SessionTicket,
    },

    /// The service accepted the update; `pet` is the record that was sent.
    Updated {
        pet: Pet,
        ticket: SessionTicket,
    },

    /// The service confirmed a deletion.
    Deleted {
        id: PetId,
    },

    /// The operation failed.
    Failed {
        op: GatewayOp,
        ticket: Option<SessionTicket>,
        message: String,
    },
}
