#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json, http::StatusCode};
use breakeven_core::{
    models::Identity,
    ports::{Application, Repository},
};
use headers::{Authorization, authorization::Bearer};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Display, sync::Arc};
use tower_http::trace::TraceLayer;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router with the given state and config.
///
/// The generated OpenAPI document is returned alongside the router, so that
/// it can also be written out without serving it.
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> (axum::Router, Arc<OpenApi>) {
    let mut api = OpenApi::default();

    let routes = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/auth", routes::auth::router())
        .nest("/users", routes::users::router())
        .nest("/campaigns", routes::campaigns::router())
        .nest("/analytics", routes::analytics::router())
        .nest("/admin", routes::admin::router());

    let service = ApiRouter::new()
        .nest("/api", routes)
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);

    // Arc is very important here or you will face massive memory and performance issues
    let api = Arc::new(api);
    let service = service
        .layer(Extension(api.clone()))
        .layer(config.cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    (service, api)
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let (service, _) = router(app, config);
    axum::serve(listener, service).await
}

/// Resolve the caller of a request, rejecting anonymous and unknown tokens.
pub(crate) async fn authenticated<T: ApiApplication>(
    app: &T,
    auth: &Authorization<Bearer>,
) -> Result<Identity<<T::Repository as Repository>::ClientId>, (StatusCode, String)> {
    app.authenticate(auth)
        .await
        .ok_or((StatusCode::UNAUTHORIZED, "not authorized".to_string()))
}

/// Resolve the caller of a request and require that they be an administrator.
pub(crate) async fn administrator<T: ApiApplication>(
    app: &T,
    auth: &Authorization<Bearer>,
) -> Result<Identity<<T::Repository as Repository>::ClientId>, (StatusCode, String)> {
    let identity = authenticated(app, auth).await?;
    if identity.is_admin() {
        Ok(identity)
    } else {
        Err((StatusCode::FORBIDDEN, "admin access required".to_string()))
    }
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Context = Authorization<Bearer>,
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            ClientId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            CampaignId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Context = Authorization<Bearer>,
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                ClientId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
                CampaignId: Display + Serialize + DeserializeOwned + JsonSchema + Send + Sync,
            >,
        >
{
}
