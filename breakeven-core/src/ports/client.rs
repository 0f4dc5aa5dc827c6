use crate::models::{BusinessParameters, ClientRecord, Credentials, Role};
use time::OffsetDateTime;

/// Repository interface for client accounts.
///
/// Password hashes are accepted and returned verbatim: hashing is the
/// caller's job (see [`Application::hash_password`](super::Application::hash_password)),
/// and only [`get_credentials`](Self::get_credentials) ever exposes a stored
/// hash.
pub trait ClientRepository: super::Repository {
    /// Register a new account.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) if the account was created
    /// - Ok(None) if the email is already registered
    /// - Err otherwise
    fn create_client(
        &self,
        client_id: Self::ClientId,
        email: String,
        password_hash: String,
        role: Role,
        as_of: OffsetDateTime,
    ) -> impl Future<Output = Result<Option<ClientRecord<Self::ClientId>>, Self::Error>> + Send;

    /// Retrieve an account by id.
    fn get_client(
        &self,
        client_id: Self::ClientId,
    ) -> impl Future<Output = Result<Option<ClientRecord<Self::ClientId>>, Self::Error>> + Send;

    /// Retrieve an account and its password hash by (normalized) email.
    fn get_credentials(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Credentials<Self::ClientId>>, Self::Error>> + Send;

    /// List every account with the given role, oldest first.
    fn query_clients(
        &self,
        role: Role,
    ) -> impl Future<Output = Result<Vec<ClientRecord<Self::ClientId>>, Self::Error>> + Send;

    /// Replace the account's cost structure.
    ///
    /// # Returns
    ///
    /// The updated record, or None if no such account exists.
    fn update_business(
        &self,
        client_id: Self::ClientId,
        business: BusinessParameters,
    ) -> impl Future<Output = Result<Option<ClientRecord<Self::ClientId>>, Self::Error>> + Send;

    /// Replace the account's password hash.
    ///
    /// # Returns
    ///
    /// - Ok(true) if successful
    /// - Ok(false) if no such account exists
    /// - Err otherwise
    fn update_password(
        &self,
        client_id: Self::ClientId,
        password_hash: String,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Block or unblock an account. Returns false if no such account exists.
    fn set_blocked(
        &self,
        client_id: Self::ClientId,
        blocked: bool,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Record a successful login. Returns false if no such account exists.
    fn record_login(
        &self,
        client_id: Self::ClientId,
        as_of: OffsetDateTime,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Remove an account together with all of its campaigns.
    ///
    /// # Returns
    ///
    /// - Ok(true) if the account existed and was removed
    /// - Ok(false) if no such account exists
    /// - Err otherwise
    fn delete_client(
        &self,
        client_id: Self::ClientId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
