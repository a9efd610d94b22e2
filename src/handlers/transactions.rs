use crate::{
    auth::CurrentUser,
    errors::ServiceError,
    handlers::common::{created, ok},
    services::orders::{CancelInput, CreateOrderInput, Viewer},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;

/// Storefront order routes; all require a user token.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/detail/:transaksi_id", get(find_one))
        .route("/draft", patch(confirm_draft))
        .route("/cancel", patch(cancel))
}

#[derive(Debug, Deserialize)]
struct ConfirmDraftBody {
    transaksi_id: String,
    total: i64,
}

async fn find_all(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.orders.find_all(user.user_id()).await?))
}

async fn find_one(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(transaksi_id): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(ok(state
        .services
        .orders
        .find_one(&transaksi_id, Viewer::Customer)
        .await?))
}

async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateOrderInput>,
) -> Result<Response, ServiceError> {
    Ok(created(
        state.services.orders.create(body, user.user_id()).await?,
    ))
}

/// Customer accepts the operator's quoted total for a delivery draft.
async fn confirm_draft(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(body): Json<ConfirmDraftBody>,
) -> Result<Response, ServiceError> {
    state
        .services
        .orders
        .confirm_draft(&body.transaksi_id, body.total)
        .await?;
    Ok(ok(body_receipt(&body.transaksi_id, body.total)))
}

async fn cancel(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(body): Json<CancelInput>,
) -> Result<Response, ServiceError> {
    let transaksi_id = body.transaksi_id.clone();
    state.services.orders.update_cancel(body).await?;
    Ok(ok(serde_json::json!({ "transaksi_id": transaksi_id })))
}

fn body_receipt(transaksi_id: &str, total: i64) -> serde_json::Value {
    serde_json::json!({
        "transaksi_id": transaksi_id,
        "total": total,
    })
}
