use super::Permissions;
use breakeven_core::{
    models::{ClientRecord, Identity, Role},
    ports::{Application, CredentialError},
};
use breakeven_sqlite::{
    Db,
    types::{CampaignId, ClientId},
};
use headers::{Authorization, authorization::Bearer};

#[derive(Clone)]
pub struct TestApp(pub Db);

impl TestApp {
    /// Read the plain-text permissions out of the authorization header.
    fn permissions(&self, context: &Authorization<Bearer>) -> Option<Permissions> {
        context.0.token().parse().ok()
    }
}

impl Application for TestApp {
    // We will stuff plain-text declarations of the permissions in the token
    type Context = Authorization<Bearer>;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn now(&self) -> time::OffsetDateTime {
        time::OffsetDateTime::now_utc()
    }

    fn generate_client_id(&self) -> ClientId {
        ClientId(uuid::Uuid::new_v4())
    }

    fn generate_campaign_id(&self) -> CampaignId {
        CampaignId(uuid::Uuid::new_v4())
    }

    // Hashing is irrelevant to the endpoints, so a reversible marker will do
    fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        Ok(format!("plain:{password}"))
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        password_hash.strip_prefix("plain:") == Some(password)
    }

    fn issue_token(&self, client: &ClientRecord<ClientId>) -> Result<String, CredentialError> {
        Ok(Permissions {
            client_id: client.id,
            admin: client.role == Role::Admin,
        }
        .to_string())
    }

    async fn authenticate(&self, context: &Self::Context) -> Option<Identity<ClientId>> {
        self.permissions(context).map(|p| Identity {
            client_id: p.client_id,
            role: if p.admin { Role::Admin } else { Role::Client },
        })
    }
}
