use crate::{
    entities::{cart, Cart, Product},
    errors::ServiceError,
    ids,
    services::catalog::images_by_code,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCartInput {
    #[validate(length(min = 1))]
    pub kode_item: String,
    #[validate(range(min = 1))]
    pub qty: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityChange {
    Increment,
    Decrement,
    Input,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityInput {
    pub cart_id: String,
    pub kode_item: String,
    #[serde(rename = "type")]
    pub change: QuantityChange,
    pub qty: Option<i32>,
}

/// Cart row joined with the product it points at.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub cart_id: String,
    pub qty: i32,
    pub active: bool,
    pub kode_item: String,
    pub nama_produk_asli: String,
    pub harga_6: i64,
    pub kategori: String,
    pub image: Vec<String>,
}

/// Per-user shopping cart operations. Quantity increases are checked
/// against current product stock ahead of time; the authoritative check
/// happens again at order creation.
#[derive(Clone)]
pub struct CartService {
    db: Arc<DatabaseConnection>,
}

impl CartService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn get_carts(&self, user_id: &str) -> Result<Vec<CartView>, ServiceError> {
        let rows = Cart::find()
            .filter(cart::Column::UserId.eq(user_id))
            .find_also_related(Product)
            .order_by_desc(cart::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        let mut images = images_by_code(
            &self.db,
            rows.iter().map(|(c, _)| c.kode_item.clone()).collect(),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|(cart, product)| {
                let (nama, harga, kategori) = product
                    .map(|p| (p.nama_produk_asli, p.harga_6, p.kategori))
                    .unwrap_or_default();
                CartView {
                    image: images.remove(&cart.kode_item).unwrap_or_default(),
                    cart_id: cart.cart_id,
                    qty: cart.qty,
                    active: cart.active,
                    kode_item: cart.kode_item,
                    nama_produk_asli: nama,
                    harga_6: harga,
                    kategori,
                }
            })
            .collect())
    }

    /// Adds a product to the cart, or bumps the quantity when the product is
    /// already there.
    #[instrument(skip(self, input), fields(kode_item = %input.kode_item))]
    pub async fn create_cart(
        &self,
        input: CreateCartInput,
        user_id: &str,
    ) -> Result<(), ServiceError> {
        input.validate()?;

        let existing = Cart::find()
            .filter(cart::Column::UserId.eq(user_id))
            .filter(cart::Column::KodeItem.eq(input.kode_item.as_str()))
            .one(&*self.db)
            .await?;

        match existing {
            Some(row) => {
                let qty = row.qty + input.qty;
                let mut active: cart::ActiveModel = row.into();
                active.qty = Set(qty);
                active.updated_at = Set(Utc::now());
                active.update(&*self.db).await?;
            }
            None => {
                let now = Utc::now();
                cart::ActiveModel {
                    cart_id: Set(ids::row_id()),
                    user_id: Set(user_id.to_string()),
                    kode_item: Set(input.kode_item),
                    qty: Set(input.qty),
                    active: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&*self.db)
                .await?;
            }
        }

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_cart(&self, cart_id: &str, user_id: &str) -> Result<(), ServiceError> {
        let row = self.load_cart(cart_id, user_id).await?;
        row.delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn update_active(
        &self,
        cart_id: &str,
        user_id: &str,
        value: bool,
    ) -> Result<(), ServiceError> {
        let row = self.load_cart(cart_id, user_id).await?;

        let mut active: cart::ActiveModel = row.into();
        active.active = Set(value);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;
        Ok(())
    }

    /// Adjusts a line's quantity. Increases re-check the stock ceiling and
    /// fail with the "exceeds stock" error when the cart would outgrow
    /// `total_stok`.
    #[instrument(skip(self, input), fields(cart_id = %input.cart_id, change = ?input.change))]
    pub async fn update_quantity(
        &self,
        input: UpdateQuantityInput,
        user_id: &str,
    ) -> Result<(), ServiceError> {
        let row = self.load_cart(&input.cart_id, user_id).await?;

        let new_qty = match input.change {
            QuantityChange::Increment => {
                let stock = self.product_stock(&input.kode_item).await?;
                if row.qty + 1 > stock {
                    return Err(ServiceError::UnprocessableEntity(
                        "Input stock exceeds total product stock.".to_string(),
                    ));
                }
                row.qty + 1
            }
            QuantityChange::Decrement => row.qty - 1,
            QuantityChange::Input => {
                let qty = input.qty.ok_or_else(|| {
                    ServiceError::BadRequest("qty is required for input updates".to_string())
                })?;
                let stock = self.product_stock(&input.kode_item).await?;
                if qty > stock {
                    return Err(ServiceError::UnprocessableEntity(
                        "Input stock exceeds total product stock.".to_string(),
                    ));
                }
                qty
            }
        };

        let mut active: cart::ActiveModel = row.into();
        active.qty = Set(new_qty);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;
        Ok(())
    }

    async fn load_cart(&self, cart_id: &str, user_id: &str) -> Result<cart::Model, ServiceError> {
        Cart::find_by_id(cart_id)
            .filter(cart::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Cart not found".to_string()))
    }

    async fn product_stock(&self, kode_item: &str) -> Result<i32, ServiceError> {
        Product::find_by_id(kode_item)
            .one(&*self.db)
            .await?
            .map(|p| p.total_stok)
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))
    }
}
