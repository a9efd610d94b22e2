use crate::{errors::ServiceError, handlers::common::ok, AppState};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};

/// Public storefront routes: homepage, categories and the regional-data
/// proxy.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/homepage", get(homepage))
        .route("/categories", get(categories))
        .route("/regions/provinces", get(provinces))
        .route("/regions/regencies/:code", get(regencies))
        .route("/regions/districts/:code", get(districts))
}

async fn homepage(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(ok(state.services.catalog.homepage().await?))
}

async fn categories(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(ok(state.services.catalog.categories().await?))
}

async fn provinces(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(ok(state.services.regions.provinces().await?))
}

async fn regencies(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.regions.regencies(&code).await?))
}

async fn districts(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.regions.districts(&code).await?))
}
