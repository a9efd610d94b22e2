use crate::{
    auth::CurrentUser, errors::ServiceError, handlers::common::ok,
    services::checkout::PreviewInput, AppState,
};
use axum::{extract::State, response::Response, routing::post, Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new().route("/preview", post(preview))
}

/// Computes checkout totals for the selected lines without creating
/// anything.
async fn preview(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<PreviewInput>,
) -> Result<Response, ServiceError> {
    Ok(ok(state
        .services
        .checkout
        .preview(body, user.user_id())
        .await?))
}
