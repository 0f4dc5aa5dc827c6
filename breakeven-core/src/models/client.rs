use crate::models::BusinessParametersDto;
use std::{fmt::Display, str::FromStr};
use time::OffsetDateTime;

/// The kind of account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Role {
    /// A business owner recording their own campaigns
    Client,
    /// An operator with access to every client
    Admin,
}

impl Role {
    /// The canonical lower-case name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized role name
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// A stored account, without its credentials.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ClientRecord<ClientId> {
    /// The account's unique identifier
    pub id: ClientId,
    /// Normalized (trimmed, lower-case) login email
    pub email: String,
    /// The kind of account
    pub role: Role,
    /// Blocked accounts cannot log in
    pub is_blocked: bool,
    /// The most recent successful login, if any
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "time::serde::rfc3339::option")
    )]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    pub last_seen: Option<OffsetDateTime>,
    /// When the account was registered
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    pub created_at: OffsetDateTime,
    /// The account's cost structure, as far as it has been filled in
    #[cfg_attr(feature = "serde", serde(default))]
    pub business: BusinessParametersDto,
}

/// An account together with its stored password hash.
///
/// This is only ever produced for the login flow and is never serialized.
#[derive(Clone, Debug)]
pub struct Credentials<ClientId> {
    /// The account
    pub client: ClientRecord<ClientId>,
    /// The password hash exactly as stored
    pub password_hash: String,
}

/// The authenticated principal behind a request.
#[derive(Clone, Debug, PartialEq)]
pub struct Identity<ClientId> {
    /// The account making the request
    pub client_id: ClientId,
    /// The account's role at the time the credential was issued
    pub role: Role,
}

impl<ClientId> Identity<ClientId> {
    /// Returns `true` for administrators
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
