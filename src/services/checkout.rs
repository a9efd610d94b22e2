use crate::{
    entities::{cart, Cart, FulfillmentType, Product},
    errors::ServiceError,
    services::orders::BankChoice,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct PreviewLineInput {
    pub kode_item: String,
    pub quantity: i32,
}

/// Checkout preview request: either ad-hoc product lines (buy-now) or the
/// caller's selected cart rows.
#[derive(Debug, Deserialize)]
pub struct PreviewInput {
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    pub bank: BankChoice,
    #[serde(default)]
    pub products: Option<Vec<PreviewLineInput>>,
    #[serde(default)]
    pub carts: Option<Vec<String>>,
    /// Known shipping cost, if any. Ignored for pickup.
    #[serde(default)]
    pub subtotal_ongkir: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PreviewLine {
    pub kode_item: String,
    pub nama_produk_asli: String,
    pub kategori: String,
    pub harga: i64,
    pub quantity: i32,
    pub subtotal_produk: i64,
}

#[derive(Debug, Serialize)]
pub struct Preview {
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    pub bank: BankChoice,
    pub products: Vec<PreviewLine>,
    pub subtotal_produk: i64,
    pub subtotal_ongkir: i64,
    pub total: i64,
}

/// Computes checkout totals from current prices without persisting
/// anything. Order creation re-validates stock atomically.
#[derive(Clone)]
pub struct CheckoutService {
    db: Arc<DatabaseConnection>,
}

impl CheckoutService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input), fields(order_type = ?input.fulfillment_type))]
    pub async fn preview(&self, input: PreviewInput, user_id: &str) -> Result<Preview, ServiceError> {
        let requested = self.resolve_lines(&input, user_id).await?;

        if requested.is_empty() {
            return Err(ServiceError::BadRequest(
                "Nothing to check out".to_string(),
            ));
        }

        let mut products = Vec::with_capacity(requested.len());
        for (kode_item, quantity) in requested {
            let product = Product::find_by_id(kode_item.as_str())
                .one(&*self.db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Product {kode_item} not found"))
                })?;

            if quantity > product.total_stok {
                return Err(ServiceError::UnprocessableEntity(format!(
                    "Requested quantity for {kode_item} exceeds total product stock."
                )));
            }

            let harga = product.harga_6;
            products.push(PreviewLine {
                kode_item,
                nama_produk_asli: product.nama_produk_asli,
                kategori: product.kategori,
                harga,
                quantity,
                subtotal_produk: harga * i64::from(quantity),
            });
        }

        let subtotal_produk: i64 = products.iter().map(|l| l.subtotal_produk).sum();
        let subtotal_ongkir = match input.fulfillment_type {
            FulfillmentType::Pickup => 0,
            FulfillmentType::Delivery => input.subtotal_ongkir.unwrap_or(0),
        };

        Ok(Preview {
            fulfillment_type: input.fulfillment_type,
            bank: input.bank,
            products,
            subtotal_produk,
            subtotal_ongkir,
            total: subtotal_produk + subtotal_ongkir,
        })
    }

    async fn resolve_lines(
        &self,
        input: &PreviewInput,
        user_id: &str,
    ) -> Result<Vec<(String, i32)>, ServiceError> {
        if let Some(products) = &input.products {
            return Ok(products
                .iter()
                .map(|p| (p.kode_item.clone(), p.quantity))
                .collect());
        }

        let cart_ids = input.carts.clone().unwrap_or_default();
        if cart_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Cart::find()
            .filter(cart::Column::UserId.eq(user_id))
            .filter(cart::Column::CartId.is_in(cart_ids))
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(|c| (c.kode_item, c.qty)).collect())
    }
}
