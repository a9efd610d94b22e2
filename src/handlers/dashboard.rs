use crate::{
    auth::CurrentAdmin,
    errors::ServiceError,
    handlers::common::{created, ok},
    services::{
        dashboard::{
            ActiveToggle, CreateBankInput, CreatePollingInput, SearchQuery, TransactionQuery,
            UpdateBankInput, UpdatePollingInput,
        },
        orders::{CancelInput, Viewer},
    },
    uploads::{self, BaseUrl},
    AppState,
};
use axum::{
    extract::{Multipart, Path, Query, State},
    response::Response,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

/// Operator dashboard. Every route requires an admin token.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        // Catalog
        .route("/products", get(products))
        .route("/products/search", get(search_products))
        .route("/products/image", post(store_product_image))
        .route("/products/image/:id", delete(destroy_product_image))
        .route("/products/:slug", get(product_by_slug))
        .route("/products/detail/:kode_item", get(product_by_code))
        .route("/categories", get(categories))
        .route("/active", patch(update_active))
        // Transactions
        .route("/transactions", get(transactions))
        .route("/transactions/tabs", get(transaction_tabs))
        .route("/transactions/detail/:transaksi_id", get(transaction_detail))
        .route("/transactions/cost", patch(update_cost))
        .route("/transactions/verification", patch(update_verification))
        .route("/transactions/done", patch(update_done))
        .route("/transactions/cancel", patch(update_cancel))
        // Banners
        .route("/banners", get(banners).post(store_banner))
        .route("/banners/:id", delete(destroy_banner))
        // Bank accounts
        .route("/banks", get(banks).post(store_bank).patch(patch_bank))
        .route("/banks/:bank_id", delete(destroy_bank))
        // Polling sources
        .route(
            "/polling",
            get(polling).post(store_polling).patch(patch_polling),
        )
        .route("/polling/:id", delete(destroy_polling))
        // Operators & hours
        .route("/operators", get(operators))
        .route("/operators/:username", delete(destroy_operator))
        .route("/operationals", get(operationals))
        // Catalog sync triggers
        .route("/sync/products", post(sync_products))
        .route("/sync/products/:id_kategori", post(sync_products_by_category))
        .route("/sync/categories", post(sync_categories))
        .route("/sync/operators", post(sync_operators))
}

#[derive(Debug, Deserialize)]
struct UpdateCostBody {
    transaksi_id: String,
    subtotal_ongkir: i64,
}

#[derive(Debug, Deserialize)]
struct UpdateVerificationBody {
    transaksi_id: String,
    is_verification: bool,
}

#[derive(Debug, Deserialize)]
struct UpdateDoneBody {
    transaksi_id: String,
    is_done: bool,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<u64>,
}

async fn index(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.get_dashboard().await?))
}

// ---- Catalog ----

async fn products(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Query(query): Query<PageQuery>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.get_products(query.page).await?))
}

async fn search_products(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Query(query): Query<SearchQuery>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.search_products(&query).await?))
}

async fn product_by_slug(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(slug): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.catalog.product_by_slug(&slug).await?))
}

async fn product_by_code(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(kode_item): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.catalog.product_by_code(&kode_item).await?))
}

/// Product image upload plus description update. The image part is
/// optional: without it only the description changes.
async fn store_product_image(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    base_url: BaseUrl,
    multipart: Multipart,
) -> Result<Response, ServiceError> {
    let form = uploads::read_form(multipart, "product").await?;
    let kode_item = form.field("kode_item")?.to_string();
    let deskripsi = form.fields.get("deskripsi").cloned();

    let image_url = match &form.image {
        Some(image) => {
            let stored = uploads::store_image(&state.config.public_dir, "products", image).await?;
            Some(format!("{}/{}", base_url.0, stored))
        }
        None => None,
    };

    state
        .services
        .dashboard
        .create_image(&kode_item, deskripsi, image_url)
        .await?;

    Ok(created(json!({ "kode_item": kode_item })))
}

async fn destroy_product_image(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    state.services.dashboard.delete_image(id).await?;
    Ok(ok(json!({ "id": id })))
}

async fn categories(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.get_categories().await?))
}

async fn update_active(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<ActiveToggle>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.update_active(body).await?))
}

// ---- Transactions ----

async fn transactions(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Query(query): Query<TransactionQuery>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.get_transactions(&query).await?))
}

async fn transaction_tabs(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.get_transaction_tabs().await?))
}

async fn transaction_detail(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(transaksi_id): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(ok(state
        .services
        .orders
        .find_one(&transaksi_id, Viewer::Admin)
        .await?))
}

async fn update_cost(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<UpdateCostBody>,
) -> Result<Response, ServiceError> {
    state
        .services
        .orders
        .update_cost(&body.transaksi_id, body.subtotal_ongkir)
        .await?;
    Ok(ok(json!({
        "transaksi_id": body.transaksi_id,
        "subtotal_ongkir": body.subtotal_ongkir,
    })))
}

async fn update_verification(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<UpdateVerificationBody>,
) -> Result<Response, ServiceError> {
    state
        .services
        .orders
        .update_verification(&body.transaksi_id, body.is_verification)
        .await?;
    Ok(ok(json!({
        "transaksi_id": body.transaksi_id,
        "is_verification": body.is_verification,
    })))
}

async fn update_done(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<UpdateDoneBody>,
) -> Result<Response, ServiceError> {
    state
        .services
        .orders
        .update_done(&body.transaksi_id, body.is_done)
        .await?;
    Ok(ok(json!({
        "transaksi_id": body.transaksi_id,
        "is_done": body.is_done,
    })))
}

async fn update_cancel(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<CancelInput>,
) -> Result<Response, ServiceError> {
    let transaksi_id = body.transaksi_id.clone();
    state.services.orders.update_cancel(body).await?;
    Ok(ok(json!({ "transaksi_id": transaksi_id })))
}

// ---- Banners ----

async fn banners(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.get_banners().await?))
}

async fn store_banner(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    base_url: BaseUrl,
    multipart: Multipart,
) -> Result<Response, ServiceError> {
    let form = uploads::read_form(multipart, "banner").await?;
    let (image, _) = form.require_image()?;

    let stored = uploads::store_image(&state.config.public_dir, "banners", &image).await?;
    let url = format!("{}/{}", base_url.0, stored);

    Ok(created(state.services.dashboard.create_banner(url).await?))
}

async fn destroy_banner(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    state.services.dashboard.delete_banner(id).await?;
    Ok(ok(json!({ "id": id })))
}

// ---- Bank accounts ----

async fn banks(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.get_banks().await?))
}

async fn store_bank(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<CreateBankInput>,
) -> Result<Response, ServiceError> {
    Ok(created(state.services.dashboard.create_bank(body).await?))
}

async fn patch_bank(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<UpdateBankInput>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.update_bank(body).await?))
}

async fn destroy_bank(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(bank_id): Path<String>,
) -> Result<Response, ServiceError> {
    state.services.dashboard.delete_bank(&bank_id).await?;
    Ok(ok(json!({ "bank_id": bank_id })))
}

// ---- Polling sources ----

async fn polling(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.get_polling().await?))
}

async fn store_polling(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<CreatePollingInput>,
) -> Result<Response, ServiceError> {
    Ok(created(state.services.dashboard.create_polling(body).await?))
}

async fn patch_polling(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Json(body): Json<UpdatePollingInput>,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.update_polling(body).await?))
}

async fn destroy_polling(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    state.services.dashboard.delete_polling(id).await?;
    Ok(ok(json!({ "id": id })))
}

// ---- Operators & hours ----

async fn operators(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.get_operators().await?))
}

async fn destroy_operator(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(username): Path<String>,
) -> Result<Response, ServiceError> {
    state.services.dashboard.delete_operator(&username).await?;
    Ok(ok(json!({ "username": username })))
}

async fn operationals(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(ok(state.services.dashboard.get_operationals().await?))
}

// ---- Catalog sync ----

async fn sync_products(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(created(state.services.catalog_sync.sync_products().await?))
}

async fn sync_products_by_category(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    Path(id_kategori): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(ok(state
        .services
        .catalog_sync
        .sync_products_by_category(&id_kategori)
        .await?))
}

async fn sync_categories(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(created(state.services.catalog_sync.sync_categories().await?))
}

async fn sync_operators(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Result<Response, ServiceError> {
    Ok(created(state.services.catalog_sync.sync_operators().await?))
}
