//! REST API endpoints for the caller's own account.

use aide::axum::{
    ApiRouter,
    routing::{get, put},
};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use breakeven_core::{
    models::{BusinessParameters, BusinessParametersDto, ClientRecord},
    ports::{ClientRepository as _, Repository},
};
use headers::{Authorization, authorization::Bearer};
use tracing::{Level, event};

use crate::{ApiApplication, authenticated};

/// Creates a router with account endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/me", get(get_me::<T>), |route| {
            route.security_requirement("jwt").tag("users")
        })
        .api_route_with("/me/business", put(update_business::<T>), |route| {
            route.security_requirement("jwt").tag("users")
        })
}

/// Retrieve the caller's account.
///
/// The password hash is never part of the response.
///
/// # Returns
///
/// - `200 OK`: The account record
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: The account no longer exists
/// - `500 Internal Server Error`: Database query failed
async fn get_me<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<ClientRecord<<T::Repository as Repository>::ClientId>>, (StatusCode, String)> {
    let identity = authenticated(&app, &auth).await?;

    let client = app
        .database()
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

    Ok(Json(client))
}

/// Replace the caller's cost structure.
///
/// # Request Body
///
/// `fixedCosts`, `variableCostPerUnit` and `unitPrice`, all required and
/// non-negative.
///
/// # Returns
///
/// - `200 OK`: The updated account record
/// - `400 Bad Request`: A field is missing or invalid
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: The account no longer exists
/// - `500 Internal Server Error`: Database operation failed
async fn update_business<T: ApiApplication>(
    State(app): State<T>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(body): Json<BusinessParametersDto>,
) -> Result<Json<ClientRecord<<T::Repository as Repository>::ClientId>>, (StatusCode, String)> {
    let identity = authenticated(&app, &auth).await?;

    let business = BusinessParameters::try_from(body)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;

    let client = app
        .database()
        .update_business(identity.client_id.clone(), business)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to update account {}", identity.client_id),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("unknown account {}", identity.client_id),
        ))?;

    Ok(Json(client))
}
