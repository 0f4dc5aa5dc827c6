//! Application implementation with JWT-based authentication.
//!
//! This module provides the concrete implementation of the Application trait,
//! tying the SQLite store to argon2 password hashing and HS256-signed bearer
//! tokens.

use crate::AdminAccount;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use breakeven_core::{
    models::{ClientRecord, Identity, Role},
    ports::{Application, ClientRepository as _, CredentialError},
};
use breakeven_sqlite::{
    Db,
    types::{CampaignId, ClientId},
};
use headers::{Authorization, authorization::Bearer};
use jwt_simple::{
    claims::{Claims, JWTClaims},
    prelude::{HS256Key, MACLike},
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Main application implementation combining all system components.
///
/// Tokens carry the account id as their subject. Every request re-reads the
/// account, so a token stops working as soon as its account is blocked or
/// deleted, and the role is always the stored one.
#[derive(Clone)]
pub struct AnalyticsApp {
    /// Database connection for persistent storage
    pub db: Db,
    /// HMAC key for signing and verifying tokens
    pub key: HS256Key,
    /// How long an issued token stays valid
    pub token_ttl: std::time::Duration,
}

impl AnalyticsApp {
    /// Extract and verify JWT claims from the authorization header.
    fn claims(&self, context: &Authorization<Bearer>) -> Option<JWTClaims<CustomJWTClaims>> {
        let token = context.0.token();
        self.key.verify_token::<CustomJWTClaims>(token, None).ok()
    }

    /// Create the configured administrator unless the email is already taken.
    pub async fn seed_admin(&self, admin: &AdminAccount) -> anyhow::Result<()> {
        let email = admin.email.trim().to_lowercase();
        let password_hash = self.hash_password(&admin.password)?;

        let created = self
            .db
            .create_client(
                self.generate_client_id(),
                email.clone(),
                password_hash,
                Role::Admin,
                self.now(),
            )
            .await?;

        match created {
            Some(_) => tracing::info!(email, "created administrator account"),
            None => tracing::debug!(email, "administrator account already exists"),
        }
        Ok(())
    }
}

impl Application for AnalyticsApp {
    type Context = Authorization<Bearer>;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> time::OffsetDateTime {
        time::OffsetDateTime::now_utc()
    }

    fn generate_client_id(&self) -> ClientId {
        ClientId(Uuid::now_v7())
    }

    fn generate_campaign_id(&self) -> CampaignId {
        CampaignId(Uuid::now_v7())
    }

    fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        let mut salt = [0u8; 16];
        rand::rng().fill_bytes(&mut salt);
        let salt =
            SaltString::encode_b64(&salt).map_err(|err| CredentialError::Hash(err.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialError::Hash(err.to_string()))
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        // an unparseable hash matches nothing
        PasswordHash::new(password_hash)
            .map(|hash| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    fn issue_token(&self, client: &ClientRecord<ClientId>) -> Result<String, CredentialError> {
        let custom = CustomJWTClaims {
            admin: client.role == Role::Admin,
        };
        let valid_for = jwt_simple::prelude::Duration::from_secs(self.token_ttl.as_secs());
        let claims = Claims::with_custom_claims(custom, valid_for).with_subject(client.id);

        self.key
            .authenticate(claims)
            .map_err(|err| CredentialError::Token(err.to_string()))
    }

    async fn authenticate(&self, context: &Self::Context) -> Option<Identity<ClientId>> {
        let client_id: ClientId = self.claims(context)?.subject?.parse().ok()?;

        let client = match self.db.get_client(client_id).await {
            Ok(client) => client?,
            Err(err) => {
                tracing::error!(err = err.to_string(), "failed to authenticate");
                return None;
            }
        };

        if client.is_blocked {
            return None;
        }

        Some(Identity {
            client_id: client.id,
            role: client.role,
        })
    }
}

/// Custom claims structure for JWT tokens.
///
/// Contains application-specific claims beyond standard JWT claims.
#[derive(Serialize, Deserialize)]
pub struct CustomJWTClaims {
    /// Whether the token was issued to an administrator. Front-ends may use
    /// it to adapt their views; authorization always uses the stored role.
    #[serde(default)]
    pub admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakeven_sqlite::config::SqliteConfig;

    async fn create_test_app() -> AnalyticsApp {
        let db = Db::open(&SqliteConfig::default()).await.unwrap();
        AnalyticsApp {
            db,
            key: HS256Key::generate(),
            token_ttl: std::time::Duration::from_secs(60 * 60),
        }
    }

    fn bearer(token: &str) -> Authorization<Bearer> {
        Authorization::bearer(token).unwrap()
    }

    async fn register(app: &AnalyticsApp, email: &str, role: Role) -> ClientRecord<ClientId> {
        let hash = app.hash_password("secret123").unwrap();
        app.db
            .create_client(app.generate_client_id(), email.into(), hash, role, app.now())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_password_hashing() {
        let app = create_test_app().await;
        let hash = app.hash_password("secret123").unwrap();

        assert_ne!(hash, "secret123");
        assert!(hash.starts_with("$argon2"));
        assert!(app.verify_password("secret123", &hash));
        assert!(!app.verify_password("secret124", &hash));
        assert!(!app.verify_password("secret123", "not a hash"));

        // salted, so hashing twice differs
        assert_ne!(hash, app.hash_password("secret123").unwrap());
    }

    #[tokio::test]
    async fn test_token_roundtrip() {
        let app = create_test_app().await;
        let client = register(&app, "owner@example.com", Role::Client).await;
        let admin = register(&app, "admin@example.com", Role::Admin).await;

        let token = app.issue_token(&client).unwrap();
        let identity = app.authenticate(&bearer(&token)).await.unwrap();
        assert_eq!(identity.client_id, client.id);
        assert!(!identity.is_admin());

        let token = app.issue_token(&admin).unwrap();
        let identity = app.authenticate(&bearer(&token)).await.unwrap();
        assert!(identity.is_admin());
    }

    #[tokio::test]
    async fn test_rejected_tokens() {
        let app = create_test_app().await;
        let client = register(&app, "owner@example.com", Role::Client).await;
        let token = app.issue_token(&client).unwrap();

        assert!(app.authenticate(&bearer("garbage")).await.is_none());

        // signed with another key
        let other = AnalyticsApp {
            key: HS256Key::generate(),
            ..app.clone()
        };
        assert!(other.authenticate(&bearer(&token)).await.is_none());

        // blocked, then unblocked
        app.db.set_blocked(client.id, true).await.unwrap();
        assert!(app.authenticate(&bearer(&token)).await.is_none());
        app.db.set_blocked(client.id, false).await.unwrap();
        assert!(app.authenticate(&bearer(&token)).await.is_some());

        // deleted
        app.db.delete_client(client.id).await.unwrap();
        assert!(app.authenticate(&bearer(&token)).await.is_none());
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let app = create_test_app().await;
        let admin = AdminAccount {
            email: " Admin@Example.com".into(),
            password: "change-me".into(),
        };

        app.seed_admin(&admin).await.unwrap();
        app.seed_admin(&admin).await.unwrap();

        let credentials = app
            .db
            .get_credentials("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(credentials.client.role, Role::Admin);
        assert!(app.verify_password("change-me", &credentials.password_hash));
    }
}
