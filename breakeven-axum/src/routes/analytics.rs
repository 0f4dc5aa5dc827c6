//! REST API endpoints for break-even, ROAS and ROI reports.
//!
//! The caller's own report and the administrator's per-client report compute
//! the break-even point differently. The former insists on a complete cost
//! structure and reports an unreachable break-even as infinite; the latter
//! reports an incomplete or unreachable one as unavailable.

use aide::axum::{ApiRouter, routing::get};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use breakeven_core::{
    models::{ClientDetail, Report},
    ports::{CampaignRepository as _, ClientRepository as _, Repository},
    report::{build_report, client_detail},
};
use headers::{Authorization, authorization::Bearer};
use tracing::{Level, event};

use super::Id;
use crate::{ApiApplication, administrator, authenticated};

/// Creates a router with reporting endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/report", get(get_report::<T>), |route| {
            route.security_requirement("jwt").tag("analytics")
        })
        .api_route_with("/report/{client_id}", get(get_client_report::<T>), |route| {
            route.security_requirement("jwt").tag("analytics").tag("admin")
        })
}

/// Build the caller's report.
///
/// # Returns
///
/// - `200 OK`: Break-even point, cost structure and annotated campaigns
/// - `400 Bad Request`: The cost structure is incomplete
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: The account no longer exists
/// - `500 Internal Server Error`: Database query failed
async fn get_report<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<
    Json<
        Report<<T::Repository as Repository>::ClientId, <T::Repository as Repository>::CampaignId>,
    >,
    (StatusCode, String),
> {
    let identity = authenticated(&app, &auth).await?;
    let db = app.database();

    let client = db
        .get_client(identity.client_id.clone())
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to get account {}", identity.client_id),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown account {}", identity.client_id),
        ))?;

    let campaigns = db
        .query_campaigns(identity.client_id.clone())
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to list campaigns of {}", identity.client_id),
            )
        })?;

    let report = build_report(&client.business, campaigns)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;

    Ok(Json(report))
}

/// Build the administrative report for one client.
///
/// # Returns
///
/// - `200 OK`: Client overview, break-even estimate and annotated campaigns
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: The caller is not an administrator
/// - `404 Not Found`: No such client
/// - `500 Internal Server Error`: Database query failed
async fn get_client_report<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(Id { client_id }): Path<Id<<T::Repository as Repository>::ClientId>>,
) -> Result<
    Json<
        ClientDetail<
            <T::Repository as Repository>::ClientId,
            <T::Repository as Repository>::CampaignId,
        >,
    >,
    (StatusCode, String),
> {
    administrator(&app, &auth).await?;
    let db = app.database();

    let client = db
        .get_client(client_id.clone())
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to get client {}", client_id),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown client {}", client_id),
        ))?;

    let campaigns = db.query_campaigns(client_id.clone()).await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to list campaigns of {}", client_id),
        )
    })?;

    Ok(Json(client_detail(&client, &campaigns)))
}
