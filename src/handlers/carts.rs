use crate::{
    auth::CurrentUser,
    errors::ServiceError,
    handlers::common::{created, ok},
    services::carts::{CreateCartInput, UpdateQuantityInput},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{delete, get, patch},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

/// Storefront cart routes; all require a user token.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store).patch(update_active))
        .route("/quantity", patch(update_quantity))
        .route("/:cart_id", delete(destroy))
}

#[derive(Debug, Deserialize)]
struct UpdateActiveCart {
    cart_id: String,
    value: bool,
}

async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.carts.get_carts(user.user_id()).await?))
}

async fn store(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateCartInput>,
) -> Result<Response, ServiceError> {
    state
        .services
        .carts
        .create_cart(body, user.user_id())
        .await?;
    Ok(created(json!({ "add_cart": true })))
}

async fn update_active(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<UpdateActiveCart>,
) -> Result<Response, ServiceError> {
    state
        .services
        .carts
        .update_active(&body.cart_id, user.user_id(), body.value)
        .await?;
    Ok(ok(json!({
        "cart_id": body.cart_id,
        "cart_active": body.value,
    })))
}

async fn update_quantity(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<UpdateQuantityInput>,
) -> Result<Response, ServiceError> {
    let cart_id = body.cart_id.clone();
    state
        .services
        .carts
        .update_quantity(body, user.user_id())
        .await?;
    Ok(ok(json!({
        "cart_id": cart_id,
        "user_id": user.user_id(),
    })))
}

async fn destroy(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(cart_id): Path<String>,
) -> Result<Response, ServiceError> {
    state
        .services
        .carts
        .delete_cart(&cart_id, user.user_id())
        .await?;
    Ok(ok(json!({ "cart_id": cart_id })))
}
