use crate::{
    entities::{
        cart, order, order_line, payment, product, product_image, FulfillmentType, Order,
        OrderLine, OrderStatus, Payment, PaymentStatus, Product, ProductImage, User,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    ids,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Who is looking at an order. Only affects the wording of the
/// draft-replied label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Customer,
    Admin,
}

/// Human-readable order state, derived fresh on every read from the
/// payment-status x order-status cross-product. Never stored.
///
/// Combinations outside the table (e.g. an order canceled while its payment
/// was still pending) render as an empty label.
pub fn display_status(
    payment_status: PaymentStatus,
    replied: bool,
    order_status: OrderStatus,
    viewer: Viewer,
) -> &'static str {
    match payment_status {
        PaymentStatus::Draft if !replied => "awaiting reply",
        PaymentStatus::Draft => match viewer {
            Viewer::Customer => "awaiting your confirmation",
            Viewer::Admin => "awaiting user confirmation",
        },
        PaymentStatus::Pending => "awaiting payment",
        PaymentStatus::Paid => "awaiting verification",
        PaymentStatus::Canceled => "payment canceled",
        PaymentStatus::Done => match order_status {
            OrderStatus::Process => "processing",
            OrderStatus::Done => "completed",
            OrderStatus::Canceled => "order canceled",
            _ => "",
        },
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankChoice {
    pub atas_nama: String,
    pub bank: String,
    pub no_rekening: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineInput {
    pub nama_produk_asli: String,
    pub kode_item: String,
    pub kategori: String,
    pub harga: i64,
    pub quantity: i32,
    pub subtotal_produk: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShippingAddressInput {
    pub nama_penerima: String,
    pub no_telpon: String,
    pub provinsi: String,
    pub kota: String,
    pub kecamatan: String,
    pub alamat_lengkap: String,
    pub kode_pos: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    pub bank: BankChoice,
    pub products: Vec<OrderLineInput>,
    pub address: Option<ShippingAddressInput>,
    pub subtotal_ongkir: i64,
    pub total: i64,
    /// Cart rows consumed by this checkout; deleted after commit.
    pub carts: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct OrderReceipt {
    pub transaksi_id: String,
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    pub subtotal_produk: i64,
    pub subtotal_ongkir: i64,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub transaksi_id: String,
    pub created_at: DateTime<Utc>,
    pub total: i64,
    pub total_item: u64,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct OrderLineView {
    pub nama_produk: String,
    pub kode_item: String,
    pub harga: i64,
    pub kategori: String,
    pub quantity: i32,
    pub subtotal_produk: i64,
    pub image: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentView {
    pub status: PaymentStatus,
    pub url: Option<String>,
    pub dari: Option<String>,
    pub nama: Option<String>,
    pub metode: Option<String>,
    pub alasan: Option<String>,
    pub expired: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct OrderDetail {
    pub transaksi_id: String,
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    pub nama_penerima: String,
    pub no_telpon: String,
    pub provinsi: Option<String>,
    pub kota: Option<String>,
    pub kecamatan: Option<String>,
    pub alamat_lengkap: Option<String>,
    pub kode_pos: Option<String>,
    pub subtotal_produk: i64,
    pub subtotal_ongkir: i64,
    pub total: i64,
    pub alasan: Option<String>,
    pub replied: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub payment: PaymentView,
    pub products: Vec<OrderLineView>,
}

/// Which half of an order a cancellation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelKind {
    #[serde(rename = "pembayaran")]
    Payment,
    #[serde(rename = "transaksi")]
    Order,
}

#[derive(Debug, Deserialize)]
pub struct CancelInput {
    pub transaksi_id: String,
    #[serde(rename = "type")]
    pub kind: CancelKind,
    pub is_cancel: bool,
    pub alasan: Option<String>,
}

/// Order lifecycle: creation and the small set of state transitions.
///
/// The stock decrement runs inside the creation transaction as a
/// conditional update, so concurrent checkouts cannot drive stock negative;
/// a line whose update matches no row fails the whole order.
#[derive(Clone)]
pub struct OrderService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl OrderService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, input), fields(user_id = %user_id, order_type = ?input.fulfillment_type))]
    pub async fn create(
        &self,
        input: CreateOrderInput,
        user_id: &str,
    ) -> Result<OrderReceipt, ServiceError> {
        if input.products.is_empty() {
            return Err(ServiceError::BadRequest(
                "Order must contain at least one product".to_string(),
            ));
        }

        let now = Utc::now();
        let transaksi_id = ids::order_id(now);
        let subtotal_produk: i64 = input.products.iter().map(|p| p.subtotal_produk).sum();

        // Snapshot recipient data before opening the transaction.
        let (nama_penerima, no_telpon, address, order_status, payment_status) =
            match input.fulfillment_type {
                FulfillmentType::Pickup => {
                    let user = User::find_by_id(user_id)
                        .one(&*self.db)
                        .await?
                        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
                    (
                        user.nama,
                        user.no_telpon.unwrap_or_default(),
                        None,
                        OrderStatus::Pending,
                        PaymentStatus::Pending,
                    )
                }
                FulfillmentType::Delivery => {
                    let address = input.address.clone().ok_or_else(|| {
                        ServiceError::BadRequest(
                            "Address is required for delivery orders".to_string(),
                        )
                    })?;
                    (
                        address.nama_penerima.clone(),
                        address.no_telpon.clone(),
                        Some(address),
                        OrderStatus::Draft,
                        PaymentStatus::Draft,
                    )
                }
            };

        let txn = self.db.begin().await?;

        // Conditional decrement: only succeeds while enough stock remains.
        for line in &input.products {
            let result = Product::update_many()
                .col_expr(
                    product::Column::TotalStok,
                    Expr::col(product::Column::TotalStok).sub(line.quantity),
                )
                .filter(product::Column::KodeItem.eq(line.kode_item.as_str()))
                .filter(product::Column::TotalStok.gte(line.quantity))
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                txn.rollback().await?;
                return Err(ServiceError::UnprocessableEntity(format!(
                    "Requested quantity for {} exceeds total product stock.",
                    line.kode_item
                )));
            }
        }

        let order_model = order::ActiveModel {
            transaksi_id: Set(transaksi_id.clone()),
            user_id: Set(user_id.to_string()),
            no_rekening: Set(input.bank.no_rekening),
            atas_nama: Set(input.bank.atas_nama),
            bank: Set(input.bank.bank),
            nama_penerima: Set(nama_penerima),
            no_telpon: Set(no_telpon),
            provinsi: Set(address.as_ref().map(|a| a.provinsi.clone())),
            kota: Set(address.as_ref().map(|a| a.kota.clone())),
            kecamatan: Set(address.as_ref().map(|a| a.kecamatan.clone())),
            alamat_lengkap: Set(address.as_ref().map(|a| a.alamat_lengkap.clone())),
            kode_pos: Set(address.as_ref().map(|a| a.kode_pos.clone())),
            fulfillment_type: Set(input.fulfillment_type),
            subtotal_produk: Set(subtotal_produk),
            subtotal_ongkir: Set(input.subtotal_ongkir),
            total: Set(input.total),
            status: Set(order_status),
            replied: Set(false),
            alasan: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        order_model.insert(&txn).await?;

        let payment_model = payment::ActiveModel {
            payment_id: Set(ids::payment_id(now)),
            transaksi_id: Set(transaksi_id.clone()),
            status: Set(payment_status),
            url: Set(None),
            nama: Set(None),
            dari: Set(None),
            metode: Set(None),
            alasan: Set(None),
            expired: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        payment_model.insert(&txn).await?;

        let lines = input.products.iter().map(|p| order_line::ActiveModel {
            transaksi_id: Set(transaksi_id.clone()),
            kode_item: Set(p.kode_item.clone()),
            nama_produk: Set(p.nama_produk_asli.clone()),
            kategori: Set(p.kategori.clone()),
            harga: Set(p.harga),
            quantity: Set(p.quantity),
            subtotal_produk: Set(p.subtotal_produk),
            ..Default::default()
        });
        OrderLine::insert_many(lines).exec(&txn).await?;

        txn.commit().await?;

        // Consume the checked-out cart rows. Best-effort: the order already
        // exists even if this cleanup fails.
        if let Some(cart_ids) = &input.carts {
            if !cart_ids.is_empty() {
                let _ = cart::Entity::delete_many()
                    .filter(cart::Column::UserId.eq(user_id))
                    .filter(cart::Column::CartId.is_in(cart_ids.clone()))
                    .exec(&*self.db)
                    .await;
            }
        }

        self.event_sender
            .send_or_log(Event::OrderCreated {
                transaksi_id: transaksi_id.clone(),
            })
            .await;

        info!(%transaksi_id, "order created");

        Ok(OrderReceipt {
            transaksi_id,
            fulfillment_type: input.fulfillment_type,
            subtotal_produk,
            subtotal_ongkir: input.subtotal_ongkir,
            total: input.total,
        })
    }

    /// Per-user order history, newest first, with the derived status label.
    #[instrument(skip(self))]
    pub async fn find_all(&self, user_id: &str) -> Result<Vec<OrderSummary>, ServiceError> {
        let orders = Order::find()
            .filter(order::Column::UserId.eq(user_id))
            .find_also_related(Payment)
            .order_by_desc(order::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        let mut summaries = Vec::with_capacity(orders.len());
        for (order, payment) in orders {
            let payment = payment.ok_or_else(|| {
                ServiceError::NotFound(format!("Payment for {} not found", order.transaksi_id))
            })?;

            let total_item = OrderLine::find()
                .filter(order_line::Column::TransaksiId.eq(order.transaksi_id.as_str()))
                .count(&*self.db)
                .await?;

            summaries.push(OrderSummary {
                status: display_status(
                    payment.status,
                    order.replied,
                    order.status,
                    Viewer::Customer,
                )
                .to_string(),
                transaksi_id: order.transaksi_id,
                created_at: order.created_at,
                total: order.total,
                total_item,
            });
        }

        Ok(summaries)
    }

    /// Full order detail including payment and line snapshots with product
    /// images.
    #[instrument(skip(self))]
    pub async fn find_one(
        &self,
        transaksi_id: &str,
        viewer: Viewer,
    ) -> Result<OrderDetail, ServiceError> {
        let (order, payment) = self.load_with_payment(transaksi_id).await?;

        let lines = OrderLine::find()
            .filter(order_line::Column::TransaksiId.eq(transaksi_id))
            .all(&*self.db)
            .await?;

        let mut products = Vec::with_capacity(lines.len());
        for line in lines {
            let images = ProductImage::find()
                .filter(product_image::Column::KodeItem.eq(line.kode_item.as_str()))
                .order_by_desc(product_image::Column::CreatedAt)
                .all(&*self.db)
                .await?;

            products.push(OrderLineView {
                nama_produk: line.nama_produk,
                kode_item: line.kode_item,
                harga: line.harga,
                kategori: line.kategori,
                quantity: line.quantity,
                subtotal_produk: line.subtotal_produk,
                image: images.into_iter().map(|i| i.url).collect(),
            });
        }

        Ok(OrderDetail {
            status: display_status(payment.status, order.replied, order.status, viewer)
                .to_string(),
            transaksi_id: order.transaksi_id,
            fulfillment_type: order.fulfillment_type,
            nama_penerima: order.nama_penerima,
            no_telpon: order.no_telpon,
            provinsi: order.provinsi,
            kota: order.kota,
            kecamatan: order.kecamatan,
            alamat_lengkap: order.alamat_lengkap,
            kode_pos: order.kode_pos,
            subtotal_produk: order.subtotal_produk,
            subtotal_ongkir: order.subtotal_ongkir,
            total: order.total,
            alasan: order.alasan,
            replied: order.replied,
            created_at: order.created_at,
            payment: PaymentView {
                status: payment.status,
                url: payment.url,
                dari: payment.dari,
                nama: payment.nama,
                metode: payment.metode,
                alasan: payment.alasan,
                expired: payment.expired,
            },
            products,
        })
    }

    /// Operator enters the shipping cost for a delivery order and marks the
    /// draft as replied. Pickup orders have no cost step.
    #[instrument(skip(self))]
    pub async fn update_cost(
        &self,
        transaksi_id: &str,
        subtotal_ongkir: i64,
    ) -> Result<(), ServiceError> {
        let order = self.load_delivery_order(transaksi_id).await?;

        let mut active: order::ActiveModel = order.into();
        active.subtotal_ongkir = Set(subtotal_ongkir);
        active.replied = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::OrderCostQuoted {
                transaksi_id: transaksi_id.to_string(),
            })
            .await;

        Ok(())
    }

    /// Customer accepts the quoted total: the draft order and its payment
    /// both move to `pending`.
    #[instrument(skip(self))]
    pub async fn confirm_draft(&self, transaksi_id: &str, total: i64) -> Result<(), ServiceError> {
        let order = self.load_delivery_order(transaksi_id).await?;

        let txn = self.db.begin().await?;

        let mut active: order::ActiveModel = order.into();
        active.total = Set(total);
        active.status = Set(OrderStatus::Pending);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        Payment::update_many()
            .set(payment::ActiveModel {
                status: Set(PaymentStatus::Pending),
                updated_at: Set(Utc::now()),
                ..Default::default()
            })
            .filter(payment::Column::TransaksiId.eq(transaksi_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::OrderConfirmed {
                transaksi_id: transaksi_id.to_string(),
            })
            .await;

        Ok(())
    }

    /// Operator verification of an uploaded proof. Approval moves the order
    /// to `process` and the payment to `done` together; rejection is a
    /// deliberate no-op.
    #[instrument(skip(self))]
    pub async fn update_verification(
        &self,
        transaksi_id: &str,
        is_verification: bool,
    ) -> Result<(), ServiceError> {
        let (order, payment) = self.load_with_payment(transaksi_id).await?;

        if !is_verification {
            return Ok(());
        }

        let txn = self.db.begin().await?;

        let mut order_active: order::ActiveModel = order.into();
        order_active.status = Set(OrderStatus::Process);
        order_active.updated_at = Set(Utc::now());
        order_active.update(&txn).await?;

        let mut payment_active: payment::ActiveModel = payment.into();
        payment_active.status = Set(PaymentStatus::Done);
        payment_active.updated_at = Set(Utc::now());
        payment_active.update(&txn).await?;

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::OrderVerified {
                transaksi_id: transaksi_id.to_string(),
            })
            .await;

        Ok(())
    }

    /// Marks a processed order as done. No-op unless explicitly flagged.
    #[instrument(skip(self))]
    pub async fn update_done(&self, transaksi_id: &str, is_done: bool) -> Result<(), ServiceError> {
        let order = self.load_order(transaksi_id).await?;

        if !is_done {
            return Ok(());
        }

        let mut active: order::ActiveModel = order.into();
        active.status = Set(OrderStatus::Done);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::OrderCompleted {
                transaksi_id: transaksi_id.to_string(),
            })
            .await;

        Ok(())
    }

    /// Cancels either the payment or the whole order, depending on the
    /// discriminator. Canceling the payment clears its expiry; canceling the
    /// order touches only the order row.
    #[instrument(skip(self, input), fields(transaksi_id = %input.transaksi_id, kind = ?input.kind))]
    pub async fn update_cancel(&self, input: CancelInput) -> Result<(), ServiceError> {
        let (order, payment) = self.load_with_payment(&input.transaksi_id).await?;

        if !input.is_cancel {
            return Ok(());
        }

        match input.kind {
            CancelKind::Payment => {
                let mut active: payment::ActiveModel = payment.into();
                active.status = Set(PaymentStatus::Canceled);
                active.alasan = Set(input.alasan.clone());
                active.expired = Set(None);
                active.updated_at = Set(Utc::now());
                active.update(&*self.db).await?;

                self.event_sender
                    .send_or_log(Event::PaymentCanceled {
                        transaksi_id: input.transaksi_id,
                        reason: input.alasan,
                    })
                    .await;
            }
            CancelKind::Order => {
                let mut active: order::ActiveModel = order.into();
                active.status = Set(OrderStatus::Canceled);
                active.alasan = Set(input.alasan.clone());
                active.updated_at = Set(Utc::now());
                active.update(&*self.db).await?;

                self.event_sender
                    .send_or_log(Event::OrderCanceled {
                        transaksi_id: input.transaksi_id,
                        reason: input.alasan,
                    })
                    .await;
            }
        }

        Ok(())
    }

    async fn load_order(&self, transaksi_id: &str) -> Result<order::Model, ServiceError> {
        Order::find_by_id(transaksi_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Transaction not found".to_string()))
    }

    async fn load_delivery_order(&self, transaksi_id: &str) -> Result<order::Model, ServiceError> {
        let order = self.load_order(transaksi_id).await?;
        if order.fulfillment_type != FulfillmentType::Delivery {
            return Err(ServiceError::Forbidden);
        }
        Ok(order)
    }

    async fn load_with_payment(
        &self,
        transaksi_id: &str,
    ) -> Result<(order::Model, payment::Model), ServiceError> {
        let order = self.load_order(transaksi_id).await?;
        let payment = order
            .find_related(Payment)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Payment not found".to_string()))?;
        Ok((order, payment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_depends_only_on_payment_until_done() {
        // Given payment = paid, the order status is irrelevant.
        for order_status in [
            OrderStatus::Pending,
            OrderStatus::Draft,
            OrderStatus::Process,
            OrderStatus::Done,
            OrderStatus::Canceled,
        ] {
            assert_eq!(
                display_status(PaymentStatus::Paid, false, order_status, Viewer::Customer),
                "awaiting verification"
            );
        }
    }

    #[test]
    fn draft_label_follows_replied_flag_and_viewer() {
        assert_eq!(
            display_status(
                PaymentStatus::Draft,
                false,
                OrderStatus::Draft,
                Viewer::Customer
            ),
            "awaiting reply"
        );
        assert_eq!(
            display_status(
                PaymentStatus::Draft,
                true,
                OrderStatus::Draft,
                Viewer::Customer
            ),
            "awaiting your confirmation"
        );
        assert_eq!(
            display_status(
                PaymentStatus::Draft,
                true,
                OrderStatus::Draft,
                Viewer::Admin
            ),
            "awaiting user confirmation"
        );
    }

    #[test]
    fn done_payment_resolves_through_order_status() {
        assert_eq!(
            display_status(
                PaymentStatus::Done,
                true,
                OrderStatus::Process,
                Viewer::Customer
            ),
            "processing"
        );
        assert_eq!(
            display_status(
                PaymentStatus::Done,
                true,
                OrderStatus::Done,
                Viewer::Customer
            ),
            "completed"
        );
        assert_eq!(
            display_status(
                PaymentStatus::Done,
                true,
                OrderStatus::Canceled,
                Viewer::Customer
            ),
            "order canceled"
        );
    }

    #[test]
    fn unmatched_combinations_render_empty() {
        // An order canceled while its payment never completed has no label,
        // matching the storefront's historical behavior.
        assert_eq!(
            display_status(
                PaymentStatus::Done,
                false,
                OrderStatus::Pending,
                Viewer::Customer
            ),
            ""
        );
    }

    #[test]
    fn cancel_kind_uses_domain_discriminators() {
        let kind: CancelKind = serde_json::from_str("\"pembayaran\"").unwrap();
        assert_eq!(kind, CancelKind::Payment);
        let kind: CancelKind = serde_json::from_str("\"transaksi\"").unwrap();
        assert_eq!(kind, CancelKind::Order);
    }
}
