use super::{CampaignRepository, ClientRepository, Repository};
use crate::models::{ClientRecord, Identity};
use time::OffsetDateTime;

/// Errors raised while producing credentials
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The password could not be hashed
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// A token could not be signed
    #[error("token signing failed: {0}")]
    Token(String),
}

/// An application ties a storage backend to everything that is specific to a
/// deployment: the clock, identifier generation, password hashing and the
/// token scheme used to authenticate requests.
///
/// Password hashing is explicit. Whoever persists a password calls
/// [`hash_password`](Self::hash_password) first and hands the result to the
/// repository; nothing is transformed implicitly on save.
pub trait Application {
    /// Per-request information used to authenticate the caller, such as a
    /// bearer token.
    type Context;

    /// The storage backend.
    type Repository: ClientRepository + CampaignRepository;

    /// Access the storage backend
    fn database(&self) -> &Self::Repository;

    /// The current time
    fn now(&self) -> OffsetDateTime;

    /// Generate an identifier for a new client account
    fn generate_client_id(&self) -> <Self::Repository as Repository>::ClientId;

    /// Generate an identifier for a new campaign
    fn generate_campaign_id(&self) -> <Self::Repository as Repository>::CampaignId;

    /// Hash a plain-text password for storage
    fn hash_password(&self, password: &str) -> Result<String, CredentialError>;

    /// Check a plain-text password against a stored hash
    fn verify_password(&self, password: &str, password_hash: &str) -> bool;

    /// Issue a credential that [`authenticate`](Self::authenticate) will
    /// later accept for this account
    fn issue_token(
        &self,
        client: &ClientRecord<<Self::Repository as Repository>::ClientId>,
    ) -> Result<String, CredentialError>;

    /// Determine who is making a request, if anyone
    fn authenticate(
        &self,
        context: &Self::Context,
    ) -> impl Future<Output = Option<Identity<<Self::Repository as Repository>::ClientId>>> + Send;
}
