//! REST API endpoints for account registration and authentication.
//!
//! Passwords are hashed by the application before they reach the database,
//! and a successful registration or login returns a bearer token that the
//! remaining endpoints accept.

use aide::axum::{ApiRouter, routing::post};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use breakeven_core::{
    models::Role,
    ports::{ClientRepository as _, Repository},
};
use headers::{Authorization, authorization::Bearer};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

use super::{AccountSummary, Message};
use crate::{ApiApplication, authenticated};

/// Passwords shorter than this are rejected.
pub(crate) const MIN_PASSWORD_LENGTH: usize = 6;

/// Creates a router with authentication endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/register", post(register::<T>), |route| {
            route.tag("auth")
        })
        .api_route_with("/login", post(login::<T>), |route| route.tag("auth"))
        .api_route_with("/change-password", post(change_password::<T>), |route| {
            route.security_requirement("jwt").tag("auth")
        })
}

/// Request body for registration and login.
#[derive(Deserialize, JsonSchema)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    /// The normalized email and the password, provided both are present.
    fn into_parts(self) -> Result<(String, String), (StatusCode, String)> {
        let email = normalize_email(&self.email);
        if email.is_empty() || self.password.is_empty() {
            Err((
                StatusCode::BAD_REQUEST,
                "email and password are required".to_string(),
            ))
        } else {
            Ok((email, self.password))
        }
    }
}

/// Request body for a password change.
#[derive(Deserialize, JsonSchema)]
struct PasswordRequest {
    #[serde(default)]
    password: String,
}

/// A bearer token together with the account it was issued for.
#[derive(Serialize, Deserialize, JsonSchema)]
struct AuthResponse<ClientId> {
    token: String,
    user: AccountSummary<ClientId>,
}

/// Emails are matched case-insensitively and without surrounding whitespace.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_password(password: &str) -> Result<(), (StatusCode, String)> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        Err((
            StatusCode::BAD_REQUEST,
            format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ))
    } else {
        Ok(())
    }
}

/// Register a new client account.
///
/// # Returns
///
/// - `201 Created`: Account created, returns a token
/// - `400 Bad Request`: Missing fields, short password or email already registered
/// - `500 Internal Server Error`: Hashing, signing or database operation failed
async fn register<T: ApiApplication>(
    State(app): State<T>,
    Json(body): Json<LoginRequest>,
) -> Result<
    (
        StatusCode,
        Json<AuthResponse<<T::Repository as Repository>::ClientId>>,
    ),
    (StatusCode, String),
> {
    let (email, password) = body.into_parts()?;
    check_password(&password)?;

    let password_hash = app.hash_password(&password).map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to register account".to_string(),
        )
    })?;

    let client = app
        .database()
        .create_client(
            app.generate_client_id(),
            email,
            password_hash,
            Role::Client,
            app.now(),
        )
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to register account".to_string(),
            )
        })?
        .ok_or((
            StatusCode::BAD_REQUEST,
            "an account with this email already exists".to_string(),
        ))?;

    let token = app.issue_token(&client).map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to issue token".to_string(),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: AccountSummary {
                id: client.id,
                email: client.email,
                role: client.role,
            },
        }),
    ))
}

/// Exchange an email and password for a token.
///
/// A successful login is recorded as the account's last visit.
///
/// # Returns
///
/// - `200 OK`: Returns a token
/// - `400 Bad Request`: Missing fields or wrong credentials
/// - `403 Forbidden`: The account has been blocked
/// - `500 Internal Server Error`: Signing or database operation failed
async fn login<T: ApiApplication>(
    State(app): State<T>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse<<T::Repository as Repository>::ClientId>>, (StatusCode, String)> {
    let (email, password) = body.into_parts()?;
    let db = app.database();

    let invalid = || {
        (
            StatusCode::BAD_REQUEST,
            "invalid email or password".to_string(),
        )
    };

    let credentials = db
        .get_credentials(&email)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to log in".to_string(),
            )
        })?
        .ok_or_else(invalid)?;

    // the password is checked first, so a blocked account is only revealed
    // to someone who knows its password
    if !app.verify_password(&password, &credentials.password_hash) {
        return Err(invalid());
    }
    let client = credentials.client;
    if client.is_blocked {
        return Err((StatusCode::FORBIDDEN, "account is blocked".to_string()));
    }

    db.record_login(client.id.clone(), app.now())
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to log in".to_string(),
            )
        })?;

    let token = app.issue_token(&client).map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to issue token".to_string(),
        )
    })?;

    Ok(Json(AuthResponse {
        token,
        user: AccountSummary {
            id: client.id,
            email: client.email,
            role: client.role,
        },
    }))
}

/// Replace the caller's password.
///
/// # Returns
///
/// - `200 OK`: Password changed
/// - `400 Bad Request`: Password too short
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: The account no longer exists
/// - `500 Internal Server Error`: Hashing or database operation failed
async fn change_password<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(body): Json<PasswordRequest>,
) -> Result<Json<Message>, (StatusCode, String)> {
    let identity = authenticated(&app, &auth).await?;
    check_password(&body.password)?;

    let password_hash = app.hash_password(&body.password).map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to change password".to_string(),
        )
    })?;

    let updated = app
        .database()
        .update_password(identity.client_id.clone(), password_hash)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to change password".to_string(),
            )
        })?;

    if updated {
        Ok(Json(Message::new("password changed")))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("unknown account {}", identity.client_id),
        ))
    }
}
