use crate::{
    auth::CurrentUser,
    errors::ServiceError,
    handlers::common::{created, ok},
    services::profile::{CreateAddressInput, UpdateAddressInput, UpdateProfileInput},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

/// Profile and address-book routes; all require a user token.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).patch(update_profile))
        .route("/detail", get(detail))
        .route(
            "/address",
            get(get_address).post(create_address).patch(update_address),
        )
        .route("/address/:address_id", delete(delete_address))
}

#[derive(Debug, Default, Deserialize)]
struct ProfileQuery {
    address_id: Option<String>,
}

async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.profile.get_profile(user.user_id()).await?))
}

async fn detail(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, ServiceError> {
    Ok(ok(state
        .services
        .profile
        .get_profile_detail(user.user_id())
        .await?))
}

async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<UpdateProfileInput>,
) -> Result<Response, ServiceError> {
    Ok(ok(state
        .services
        .profile
        .update_profile(body, user.user_id())
        .await?))
}

/// Lists addresses, or returns a single one when `address_id` is supplied.
async fn get_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, ServiceError> {
    match query.address_id {
        Some(address_id) => Ok(ok(state
            .services
            .profile
            .get_address_by_id(&address_id, user.user_id())
            .await?)),
        None => Ok(ok(state
            .services
            .profile
            .get_addresses(user.user_id())
            .await?)),
    }
}

async fn create_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateAddressInput>,
) -> Result<Response, ServiceError> {
    Ok(created(
        state
            .services
            .profile
            .create_address(body, user.user_id())
            .await?,
    ))
}

async fn update_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<UpdateAddressInput>,
) -> Result<Response, ServiceError> {
    Ok(ok(state
        .services
        .profile
        .update_address(body, user.user_id())
        .await?))
}

async fn delete_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(address_id): Path<String>,
) -> Result<Response, ServiceError> {
    state
        .services
        .profile
        .delete_address(&address_id, user.user_id())
        .await?;
    Ok(ok(json!({ "address_id": address_id })))
}
