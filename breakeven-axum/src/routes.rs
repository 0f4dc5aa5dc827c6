//! The REST endpoints, grouped by the resource they act on.

use breakeven_core::models::Role;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub(crate) mod admin;
pub(crate) mod analytics;
pub(crate) mod auth;
pub(crate) mod campaigns;
pub(crate) mod users;

/// Path parameter for client-specific endpoints.
#[derive(Deserialize, JsonSchema)]
struct Id<T> {
    /// The unique identifier of the client
    client_id: T,
}

/// A human-readable acknowledgement.
#[derive(Serialize, Deserialize, JsonSchema)]
pub(crate) struct Message {
    /// What happened
    pub message: String,
}

impl Message {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The public part of an account, returned on login.
#[derive(Serialize, Deserialize, JsonSchema)]
pub(crate) struct AccountSummary<ClientId> {
    /// The account's identifier
    pub id: ClientId,
    /// The account's (normalized) email
    pub email: String,
    /// What the account is allowed to do
    pub role: Role,
}
