//! REST API endpoints for administrators.
//!
//! These operate on client accounts only; administrator accounts are never
//! listed or exported.

use aide::axum::{
    ApiRouter,
    routing::{delete, get, post},
};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use breakeven_core::{
    export::to_csv,
    models::{ClientRecord, Role},
    ports::{CampaignRepository as _, ClientRepository as _, Repository},
    report::summarize_clients,
};
use headers::{Authorization, authorization::Bearer};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

use super::{Id, Message};
use crate::{ApiApplication, administrator};

/// Filename suggested to the browser for the CSV export.
const EXPORT_FILENAME: &str = "breakeven-clients.csv";

/// Creates a router with administrative endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/users", get(list_clients::<T>), |route| {
            route.security_requirement("jwt").tag("admin")
        })
        .api_route_with("/export", get(export_clients::<T>), |route| {
            route.security_requirement("jwt").tag("admin")
        })
        .api_route_with("/users/{client_id}", delete(delete_client::<T>), |route| {
            route.security_requirement("jwt").tag("admin")
        })
        .api_route_with(
            "/users/{client_id}/campaigns",
            delete(delete_campaigns::<T>),
            |route| route.security_requirement("jwt").tag("admin"),
        )
        .api_route_with("/users/{client_id}/block", post(block_client::<T>), |route| {
            route.security_requirement("jwt").tag("admin")
        })
        .api_route_with(
            "/users/{client_id}/unblock",
            post(unblock_client::<T>),
            |route| route.security_requirement("jwt").tag("admin"),
        )
}

/// The number of campaigns removed.
#[derive(Serialize, Deserialize, JsonSchema)]
struct DeletedCampaigns {
    deleted: u64,
}

/// List every client account, oldest first.
///
/// # Returns
///
/// - `200 OK`: All client accounts
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: The caller is not an administrator
/// - `500 Internal Server Error`: Database query failed
async fn list_clients<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Vec<ClientRecord<<T::Repository as Repository>::ClientId>>>, (StatusCode, String)>
{
    administrator(&app, &auth).await?;

    let clients = app
        .database()
        .query_clients(Role::Client)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to list clients".to_string(),
            )
        })?;

    Ok(Json(clients))
}

/// Download a summary of every client as CSV.
///
/// One row per client with registration date, last visit, campaign totals
/// and cost structure. Every field is quoted, dates are `DD.MM.YYYY` and a
/// client who never logged in shows `—` as their last visit.
///
/// # Returns
///
/// - `200 OK`: The CSV document, as an attachment
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: The caller is not an administrator
/// - `500 Internal Server Error`: Database query or encoding failed
async fn export_clients<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Response, (StatusCode, String)> {
    administrator(&app, &auth).await?;
    let db = app.database();

    let clients = db.query_clients(Role::Client).await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to list clients".to_string(),
        )
    })?;

    let campaigns = db.all_campaigns().await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to list campaigns".to_string(),
        )
    })?;

    let csv = to_csv(&summarize_clients(&clients, &campaigns)).map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to export clients".to_string(),
        )
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Remove a client together with all of their campaigns.
///
/// # Returns
///
/// - `200 OK`: Client removed
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: The caller is not an administrator
/// - `404 Not Found`: No such client
/// - `500 Internal Server Error`: Database operation failed
async fn delete_client<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { client_id }): Path<Id<<T::Repository as Repository>::ClientId>>,
) -> Result<Json<Message>, (StatusCode, String)> {
    administrator(&app, &auth).await?;

    let deleted = app
        .database()
        .delete_client(client_id.clone())
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to delete client {}", client_id),
            )
        })?;

    if deleted {
        Ok(Json(Message::new(format!(
            "client {} and all of their data deleted",
            client_id
        ))))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("unknown client {}", client_id),
        ))
    }
}

/// Remove every campaign of a client, keeping the account.
///
/// # Returns
///
/// - `200 OK`: The number of campaigns removed
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: The caller is not an administrator
/// - `500 Internal Server Error`: Database operation failed
async fn delete_campaigns<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { client_id }): Path<Id<<T::Repository as Repository>::ClientId>>,
) -> Result<Json<DeletedCampaigns>, (StatusCode, String)> {
    administrator(&app, &auth).await?;

    let deleted = app
        .database()
        .delete_campaigns(client_id.clone())
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to delete campaigns of {}", client_id),
            )
        })?;

    Ok(Json(DeletedCampaigns { deleted }))
}

/// Prevent a client from logging in.
///
/// # Returns
///
/// - `200 OK`: Client blocked
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: The caller is not an administrator
/// - `404 Not Found`: No such client
/// - `500 Internal Server Error`: Database operation failed
async fn block_client<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { client_id }): Path<Id<<T::Repository as Repository>::ClientId>>,
) -> Result<Json<Message>, (StatusCode, String)> {
    set_blocked(app, auth, client_id, true).await
}

/// Allow a blocked client to log in again.
///
/// # Returns
///
/// - `200 OK`: Client unblocked
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: The caller is not an administrator
/// - `404 Not Found`: No such client
/// - `500 Internal Server Error`: Database operation failed
async fn unblock_client<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { client_id }): Path<Id<<T::Repository as Repository>::ClientId>>,
) -> Result<Json<Message>, (StatusCode, String)> {
    set_blocked(app, auth, client_id, false).await
}

async fn set_blocked<T: ApiApplication>(
    app: T,
    auth: Authorization<Bearer>,
    client_id: <T::Repository as Repository>::ClientId,
    blocked: bool,
) -> Result<Json<Message>, (StatusCode, String)> {
    administrator(&app, &auth).await?;

    let updated = app
        .database()
        .set_blocked(client_id.clone(), blocked)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to update client {}", client_id),
            )
        })?;

    if !updated {
        return Err((
            StatusCode::NOT_FOUND,
            format!("unknown client {}", client_id),
        ));
    }

    let action = if blocked { "blocked" } else { "unblocked" };
    Ok(Json(Message::new(format!("client {} {}", client_id, action))))
}
