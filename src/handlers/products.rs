use crate::{
    errors::ServiceError, handlers::common::ok, services::catalog::ProductQuery, AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};

/// Public product catalog.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/:slug", get(product_by_slug))
        .route("/detail/:kode_item", get(product_by_code))
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.catalog.list_products(&query).await?))
}

async fn product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.catalog.product_by_slug(&slug).await?))
}

async fn product_by_code(
    State(state): State<AppState>,
    Path(kode_item): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.catalog.product_by_code(&kode_item).await?))
}
