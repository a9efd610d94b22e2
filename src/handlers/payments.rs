use crate::{
    auth::CurrentUser,
    errors::ServiceError,
    handlers::common::created,
    services::payments::ProofUpload,
    uploads::{self, BaseUrl},
    AppState,
};
use axum::{
    extract::{Multipart, State},
    response::Response,
    routing::post,
    Router,
};
use serde_json::json;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(store_proof))
}

/// Accepts the transfer-proof form: a `payment` image plus the submitter's
/// name, source bank and the order id.
async fn store_proof(
    State(state): State<AppState>,
    _user: CurrentUser,
    base_url: BaseUrl,
    multipart: Multipart,
) -> Result<Response, ServiceError> {
    let form = uploads::read_form(multipart, "payment").await?;
    let (image, fields) = form.require_image()?;

    let nama = fields
        .get("nama")
        .cloned()
        .ok_or_else(|| ServiceError::BadRequest("Missing field 'nama'".to_string()))?;
    let dari = fields
        .get("dari")
        .cloned()
        .ok_or_else(|| ServiceError::BadRequest("Missing field 'dari'".to_string()))?;
    let transaksi_id = fields
        .get("transaksi_id")
        .cloned()
        .ok_or_else(|| ServiceError::BadRequest("Missing field 'transaksi_id'".to_string()))?;

    let stored = uploads::store_image(&state.config.public_dir, "payments", &image).await?;
    let url = format!("{}/{}", base_url.0, stored);

    state
        .services
        .payments
        .attach_proof(ProofUpload {
            transaksi_id: transaksi_id.clone(),
            nama: nama.clone(),
            dari: dari.clone(),
            url,
        })
        .await?;

    Ok(created(json!({
        "transaksi_id": transaksi_id,
        "nama": nama,
        "dari": dari,
    })))
}
