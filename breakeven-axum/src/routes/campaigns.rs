//! REST API endpoints for a client's advertising campaigns.

use aide::axum::{ApiRouter, routing::post};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use breakeven_core::{
    models::{CampaignData, CampaignDataDto, CampaignRecord},
    ports::{CampaignRepository as _, Repository},
};
use headers::{Authorization, authorization::Bearer};
use tracing::{Level, event};

use crate::{ApiApplication, authenticated};

/// Creates a router with campaign endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with(
        "/",
        post(create_campaign::<T>).get(list_campaigns::<T>),
        |route| route.security_requirement("jwt").tag("campaigns"),
    )
}

/// Record a new campaign for the caller.
///
/// # Request Body
///
/// `name`, `adSpend` and `grossRevenue`, all required. The name is trimmed
/// and must not be blank; the amounts must be non-negative.
///
/// # Returns
///
/// - `201 Created`: The stored campaign
/// - `400 Bad Request`: A field is missing or invalid
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: Database operation failed
async fn create_campaign<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(body): Json<CampaignDataDto>,
) -> Result<
    (
        StatusCode,
        Json<
            CampaignRecord<
                <T::Repository as Repository>::ClientId,
                <T::Repository as Repository>::CampaignId,
            >,
        >,
    ),
    (StatusCode, String),
> {
    let identity = authenticated(&app, &auth).await?;

    let data =
        CampaignData::try_from(body).map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;

    let campaign = app
        .database()
        .create_campaign(
            app.generate_campaign_id(),
            identity.client_id,
            data,
            app.now(),
        )
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to create campaign".to_string(),
            )
        })?;

    Ok((StatusCode::CREATED, Json(campaign)))
}

/// List the caller's campaigns, most recent first.
///
/// # Returns
///
/// - `200 OK`: The caller's campaigns
/// - `401 Unauthorized`: Missing or invalid token
/// - `500 Internal Server Error`: Database query failed
async fn list_campaigns<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<
    Json<
        Vec<
            CampaignRecord<
                <T::Repository as Repository>::ClientId,
                <T::Repository as Repository>::CampaignId,
            >,
        >,
    >,
    (StatusCode, String),
> {
    let identity = authenticated(&app, &auth).await?;

    let campaigns = app
        .database()
        .query_campaigns(identity.client_id.clone())
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to list campaigns of {}", identity.client_id),
            )
        })?;

    Ok(Json(campaigns))
}
