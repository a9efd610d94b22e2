use crate::{
    entities::{
        bank_account, banner, category, order, payment, polling, product, product_image, sync_log,
        BankAccount, BankAccountModel, Banner, BannerModel, Category, CategoryModel,
        FulfillmentType, Operational, OperationalModel, Operator, Order, OrderStatus, Payment,
        PaymentStatus, Polling, PollingLabel, PollingModel, Product, ProductImage, SyncLog,
    },
    errors::ServiceError,
    ids, uploads,
};
use chrono::{DateTime, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

/// Dashboard page size for listings.
const PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionBucket {
    /// Drafts awaiting an operator reply.
    Waitrep,
    /// Drafts replied to, awaiting the customer.
    Waituser,
    /// Awaiting payment.
    Paypend,
    /// Proof uploaded, awaiting verification.
    Payverif,
    Process,
    Done,
    Canceled,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub status: Option<TransactionBucket>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub q: Option<String>,
}

fn page_offset(page: Option<u64>) -> (u64, u64) {
    let page = page.filter(|p| *p >= 1).unwrap_or(1);
    (page, (page - 1) * PAGE_SIZE)
}

#[derive(Debug, Serialize)]
pub struct RevenueSlice {
    pub amount: usize,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub transactions: RevenueSlice,
    pub delivery: RevenueSlice,
}

#[derive(Debug, Serialize)]
pub struct TransactionTabs {
    pub waitrep: u64,
    pub waituser: u64,
    pub paypend: u64,
    pub payverif: u64,
    pub process: u64,
    pub done: u64,
    pub canceled: u64,
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub transaksi_id: String,
    pub nama_penerima: String,
    pub total: i64,
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alasan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_alasan: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransactionPage {
    pub transactions: Vec<TransactionRow>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct AdminProductRow {
    pub kode_item: String,
    pub slug: String,
    pub nama_produk_asli: String,
    pub kategori: String,
    pub harga_6: i64,
    pub total_stok: i32,
    pub active: bool,
    pub deskripsi: Option<String>,
    pub image: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminProductPage {
    pub products: Vec<AdminProductRow>,
    pub last_synchronized: Option<DateTime<Utc>>,
    pub total_items: u64,
}

#[derive(Debug, Serialize)]
pub struct AdminCategoryList {
    pub categories: Vec<CategoryModel>,
    pub last_synchronized: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct OperatorRow {
    pub username: String,
    pub nama: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct OperatorList {
    pub operators: Vec<OperatorRow>,
    pub last_synchronized: Option<DateTime<Utc>>,
}

/// Tagged toggle payload: categories cascade to their products, products
/// flip alone.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActiveToggle {
    Category { nama_kategori: String, value: bool },
    Product { kode_item: String, value: bool },
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBankInput {
    #[validate(length(min = 1))]
    pub no_rekening: String,
    #[validate(length(min = 1))]
    pub atas_nama: String,
    #[validate(length(min = 1))]
    pub bank: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBankInput {
    pub bank_id: String,
    pub no_rekening: Option<String>,
    pub atas_nama: Option<String>,
    pub bank: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePollingInput {
    #[validate(url)]
    pub url: String,
    pub label: PollingLabel,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePollingInput {
    pub id: i32,
    pub url: Option<String>,
    pub label: Option<PollingLabel>,
}

/// Operator-facing queries and CRUD: aggregates, transaction buckets,
/// polling sources, banks, banners, images, visibility toggles.
#[derive(Clone)]
pub struct DashboardService {
    db: Arc<DatabaseConnection>,
}

impl DashboardService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Today's order count and revenue, overall and for delivery orders.
    #[instrument(skip(self))]
    pub async fn get_dashboard(&self) -> Result<DashboardSummary, ServiceError> {
        let today = Utc::now().date_naive();
        let start = today.and_time(NaiveTime::MIN).and_utc();
        let end = today
            .and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid time"))
            .and_utc();

        let todays = Order::find()
            .filter(order::Column::CreatedAt.gte(start))
            .filter(order::Column::CreatedAt.lte(end))
            .all(&*self.db)
            .await?;

        let delivery: Vec<_> = todays
            .iter()
            .filter(|t| t.fulfillment_type == FulfillmentType::Delivery)
            .collect();

        Ok(DashboardSummary {
            transactions: RevenueSlice {
                amount: todays.len(),
                total: todays.iter().map(|t| t.total).sum(),
            },
            delivery: RevenueSlice {
                amount: delivery.len(),
                total: delivery.iter().map(|t| t.total).sum(),
            },
        })
    }

    /// Per-bucket transaction counts for the dashboard tab bar.
    #[instrument(skip(self))]
    pub async fn get_transaction_tabs(&self) -> Result<TransactionTabs, ServiceError> {
        Ok(TransactionTabs {
            waitrep: self.bucket_count(TransactionBucket::Waitrep).await?,
            waituser: self.bucket_count(TransactionBucket::Waituser).await?,
            paypend: self.bucket_count(TransactionBucket::Paypend).await?,
            payverif: self.bucket_count(TransactionBucket::Payverif).await?,
            process: self.bucket_count(TransactionBucket::Process).await?,
            done: self.bucket_count(TransactionBucket::Done).await?,
            canceled: self.bucket_count(TransactionBucket::Canceled).await?,
        })
    }

    /// Paginated transaction listing for one bucket (default: awaiting
    /// reply).
    #[instrument(skip(self))]
    pub async fn get_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<TransactionPage, ServiceError> {
        let bucket = query.status.unwrap_or(TransactionBucket::Waitrep);
        let (_, offset) = page_offset(query.page);

        let total = self.bucket_count(bucket).await?;

        let rows = bucket_select(bucket)
            .order_by_desc(order::Column::CreatedAt)
            .limit(PAGE_SIZE)
            .offset(offset)
            .all(&*self.db)
            .await?;

        // Cancellation reasons live on both halves of the order; only the
        // canceled tab renders them.
        let mut payment_reasons = std::collections::HashMap::new();
        let include_reasons = bucket == TransactionBucket::Canceled;
        if include_reasons && !rows.is_empty() {
            let payments = Payment::find()
                .filter(
                    payment::Column::TransaksiId
                        .is_in(rows.iter().map(|t| t.transaksi_id.clone())),
                )
                .all(&*self.db)
                .await?;
            for p in payments {
                payment_reasons.insert(p.transaksi_id, p.alasan);
            }
        }

        let transactions = rows
            .into_iter()
            .map(|t| TransactionRow {
                payment_alasan: if include_reasons {
                    payment_reasons.remove(&t.transaksi_id).flatten()
                } else {
                    None
                },
                alasan: if include_reasons { t.alasan } else { None },
                transaksi_id: t.transaksi_id,
                nama_penerima: t.nama_penerima,
                total: t.total,
                fulfillment_type: t.fulfillment_type,
                created_at: t.created_at,
            })
            .collect();

        Ok(TransactionPage {
            transactions,
            total,
        })
    }

    async fn bucket_count(&self, bucket: TransactionBucket) -> Result<u64, ServiceError> {
        Ok(bucket_select(bucket).count(&*self.db).await?)
    }

    /// Paginated product listing with the last product sync stamp.
    #[instrument(skip(self))]
    pub async fn get_products(&self, page: Option<u64>) -> Result<AdminProductPage, ServiceError> {
        let (_, offset) = page_offset(page);

        let total_items = Product::find().count(&*self.db).await?;
        let products = Product::find()
            .limit(PAGE_SIZE)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok(AdminProductPage {
            products: self.to_admin_rows(products).await?,
            last_synchronized: self.last_sync("produk").await?,
            total_items,
        })
    }

    /// Product search across code, name, brand, type and category.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        query: &SearchQuery,
    ) -> Result<AdminProductPage, ServiceError> {
        let (_, offset) = page_offset(query.page);
        let term = query.q.clone().unwrap_or_default();

        let matcher = Condition::any()
            .add(product::Column::KodeItem.contains(&term))
            .add(product::Column::NamaProdukAsli.contains(&term))
            .add(product::Column::Merk.contains(&term))
            .add(product::Column::Tipe.contains(&term))
            .add(product::Column::Kategori.contains(&term));

        let total_items = Product::find()
            .filter(matcher.clone())
            .count(&*self.db)
            .await?;
        let products = Product::find()
            .filter(matcher)
            .limit(PAGE_SIZE)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok(AdminProductPage {
            products: self.to_admin_rows(products).await?,
            last_synchronized: self.last_sync("produk").await?,
            total_items,
        })
    }

    /// Stores a product image and/or updates the description. Both writes
    /// share one transaction when an image is present.
    #[instrument(skip(self))]
    pub async fn create_image(
        &self,
        kode_item: &str,
        deskripsi: Option<String>,
        image_url: Option<String>,
    ) -> Result<(), ServiceError> {
        let product = Product::find_by_id(kode_item)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        let txn = self.db.begin().await?;

        let mut active: product::ActiveModel = product.into();
        active.deskripsi = Set(deskripsi);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        if let Some(url) = image_url {
            product_image::ActiveModel {
                kode_item: Set(kode_item.to_string()),
                url: Set(url),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Deletes a product image row and its stored file.
    #[instrument(skip(self))]
    pub async fn delete_image(&self, id: i32) -> Result<(), ServiceError> {
        let image = ProductImage::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Image not found!".to_string()))?;

        uploads::remove_stored(&image.url).await;
        image.delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<AdminCategoryList, ServiceError> {
        let categories = Category::find()
            .order_by_asc(category::Column::Nama)
            .all(&*self.db)
            .await?;

        Ok(AdminCategoryList {
            categories,
            last_synchronized: self.last_sync("kategori").await?,
        })
    }

    /// Flips storefront visibility. Category toggles cascade to every
    /// product in the category inside one transaction.
    #[instrument(skip(self, toggle))]
    pub async fn update_active(&self, toggle: ActiveToggle) -> Result<Value, ServiceError> {
        match toggle {
            ActiveToggle::Category {
                nama_kategori,
                value,
            } => {
                let kategori = Category::find()
                    .filter(category::Column::Nama.eq(nama_kategori.as_str()))
                    .one(&*self.db)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Category not found".to_string()))?;

                let txn = self.db.begin().await?;

                Product::update_many()
                    .set(product::ActiveModel {
                        active: Set(value),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    })
                    .filter(product::Column::Kategori.eq(nama_kategori.as_str()))
                    .exec(&txn)
                    .await?;

                let mut active: category::ActiveModel = kategori.into();
                active.active = Set(value);
                active.updated_at = Set(Utc::now());
                active.update(&txn).await?;

                txn.commit().await?;

                Ok(json!({
                    "nama_kategori": nama_kategori,
                    "category_active": value,
                }))
            }
            ActiveToggle::Product { kode_item, value } => {
                let product = Product::find_by_id(kode_item.as_str())
                    .one(&*self.db)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

                let mut active: product::ActiveModel = product.into();
                active.active = Set(value);
                active.updated_at = Set(Utc::now());
                active.update(&*self.db).await?;

                Ok(json!({
                    "kode_item": kode_item,
                    "product_active": value,
                }))
            }
        }
    }

    // ---- Banners ----

    #[instrument(skip(self))]
    pub async fn get_banners(&self) -> Result<Vec<BannerModel>, ServiceError> {
        Ok(Banner::find()
            .order_by_desc(banner::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn create_banner(&self, url: String) -> Result<BannerModel, ServiceError> {
        Ok(banner::ActiveModel {
            url: Set(url),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_banner(&self, id: i32) -> Result<(), ServiceError> {
        let banner = Banner::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Image not found!".to_string()))?;

        uploads::remove_stored(&banner.url).await;
        banner.delete(&*self.db).await?;
        Ok(())
    }

    // ---- Bank accounts ----

    #[instrument(skip(self))]
    pub async fn get_banks(&self) -> Result<Vec<BankAccountModel>, ServiceError> {
        Ok(BankAccount::find().all(&*self.db).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create_bank(&self, input: CreateBankInput) -> Result<Value, ServiceError> {
        input.validate()?;

        let duplicate = BankAccount::find()
            .filter(bank_account::Column::NoRekening.eq(input.no_rekening.as_str()))
            .one(&*self.db)
            .await?
            .is_some();
        if duplicate {
            return Err(ServiceError::BadRequest("Already bank account".to_string()));
        }

        let now = Utc::now();
        let created = bank_account::ActiveModel {
            bank_id: Set(ids::row_id()),
            no_rekening: Set(input.no_rekening),
            atas_nama: Set(input.atas_nama),
            bank: Set(input.bank),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        Ok(json!({ "bank_id": created.bank_id }))
    }

    #[instrument(skip(self, input), fields(bank_id = %input.bank_id))]
    pub async fn update_bank(
        &self,
        input: UpdateBankInput,
    ) -> Result<BankAccountModel, ServiceError> {
        let bank = BankAccount::find_by_id(input.bank_id.as_str())
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Bank account not found".to_string()))?;

        let mut active: bank_account::ActiveModel = bank.into();
        if let Some(v) = input.no_rekening {
            active.no_rekening = Set(v);
        }
        if let Some(v) = input.atas_nama {
            active.atas_nama = Set(v);
        }
        if let Some(v) = input.bank {
            active.bank = Set(v);
        }
        active.updated_at = Set(Utc::now());
        Ok(active.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_bank(&self, bank_id: &str) -> Result<(), ServiceError> {
        let bank = BankAccount::find_by_id(bank_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Bank account not found".to_string()))?;

        bank.delete(&*self.db).await?;
        Ok(())
    }

    // ---- Polling sources ----

    #[instrument(skip(self))]
    pub async fn get_polling(&self) -> Result<Vec<PollingModel>, ServiceError> {
        Ok(Polling::find().all(&*self.db).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create_polling(
        &self,
        input: CreatePollingInput,
    ) -> Result<PollingModel, ServiceError> {
        input.validate()?;

        let duplicate = Polling::find()
            .filter(polling::Column::Url.eq(input.url.as_str()))
            .one(&*self.db)
            .await?
            .is_some();
        if duplicate {
            return Err(ServiceError::BadRequest(
                "Polling url already exists".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(polling::ActiveModel {
            url: Set(input.url),
            label: Set(input.label),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?)
    }

    #[instrument(skip(self, input), fields(id = input.id))]
    pub async fn update_polling(
        &self,
        input: UpdatePollingInput,
    ) -> Result<PollingModel, ServiceError> {
        let row = Polling::find_by_id(input.id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Polling url not found".to_string()))?;

        let mut active: polling::ActiveModel = row.into();
        if let Some(url) = input.url {
            active.url = Set(url);
        }
        if let Some(label) = input.label {
            active.label = Set(label);
        }
        active.updated_at = Set(Utc::now());
        Ok(active.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_polling(&self, id: i32) -> Result<(), ServiceError> {
        let row = Polling::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Polling url not found".to_string()))?;

        row.delete(&*self.db).await?;
        Ok(())
    }

    // ---- Operators / operational hours ----

    #[instrument(skip(self))]
    pub async fn get_operators(&self) -> Result<OperatorList, ServiceError> {
        let operators = Operator::find()
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|o| OperatorRow {
                username: o.username,
                nama: o.nama,
                role: o.role,
            })
            .collect();

        Ok(OperatorList {
            operators,
            last_synchronized: self.last_sync("operator").await?,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete_operator(&self, username: &str) -> Result<(), ServiceError> {
        let row = Operator::find_by_id(username)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Operator not found".to_string()))?;

        row.delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_operationals(&self) -> Result<Vec<OperationalModel>, ServiceError> {
        Ok(Operational::find().all(&*self.db).await?)
    }

    // ---- helpers ----

    async fn last_sync(&self, label: &str) -> Result<Option<DateTime<Utc>>, ServiceError> {
        Ok(SyncLog::find()
            .filter(sync_log::Column::Label.eq(label))
            .order_by_desc(sync_log::Column::SynchronizedAt)
            .one(&*self.db)
            .await?
            .map(|s| s.synchronized_at))
    }

    async fn to_admin_rows(
        &self,
        products: Vec<product::Model>,
    ) -> Result<Vec<AdminProductRow>, ServiceError> {
        let mut images = crate::services::catalog::images_by_code(
            &self.db,
            products.iter().map(|p| p.kode_item.clone()).collect(),
        )
        .await?;

        Ok(products
            .into_iter()
            .map(|p| AdminProductRow {
                image: images.remove(&p.kode_item).unwrap_or_default(),
                kode_item: p.kode_item,
                slug: p.slug,
                nama_produk_asli: p.nama_produk_asli,
                kategori: p.kategori,
                harga_6: p.harga_6,
                total_stok: p.total_stok,
                active: p.active,
                deskripsi: p.deskripsi,
            })
            .collect())
    }
}

/// Builds the base query selecting the orders in a bucket. Buckets keyed on
/// payment status join the payment row.
fn bucket_select(bucket: TransactionBucket) -> sea_orm::Select<Order> {
    use sea_orm::JoinType;

    let with_payment = |status: PaymentStatus| {
        Order::find()
            .join(JoinType::InnerJoin, order::Relation::Payment.def())
            .filter(payment::Column::Status.eq(status))
    };

    match bucket {
        TransactionBucket::Waitrep => {
            with_payment(PaymentStatus::Draft).filter(order::Column::Replied.eq(false))
        }
        TransactionBucket::Waituser => {
            with_payment(PaymentStatus::Draft).filter(order::Column::Replied.eq(true))
        }
        TransactionBucket::Paypend => with_payment(PaymentStatus::Pending),
        TransactionBucket::Payverif => with_payment(PaymentStatus::Paid),
        TransactionBucket::Process => {
            Order::find().filter(order::Column::Status.eq(OrderStatus::Process))
        }
        TransactionBucket::Done => {
            Order::find().filter(order::Column::Status.eq(OrderStatus::Done))
        }
        TransactionBucket::Canceled => Order::find()
            .join(JoinType::InnerJoin, order::Relation::Payment.def())
            .filter(
                Condition::any()
                    .add(order::Column::Status.eq(OrderStatus::Canceled))
                    .add(payment::Column::Status.eq(PaymentStatus::Canceled)),
            ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_toggle_deserializes_both_variants() {
        let toggle: ActiveToggle = serde_json::from_str(
            r#"{"type": "category", "nama_kategori": "Paku", "value": false}"#,
        )
        .unwrap();
        assert!(matches!(
            toggle,
            ActiveToggle::Category { ref nama_kategori, value: false } if nama_kategori == "Paku"
        ));

        let toggle: ActiveToggle =
            serde_json::from_str(r#"{"type": "product", "kode_item": "X1", "value": true}"#)
                .unwrap();
        assert!(matches!(
            toggle,
            ActiveToggle::Product { ref kode_item, value: true } if kode_item == "X1"
        ));
    }

    #[test]
    fn pagination_clamps_to_first_page() {
        assert_eq!(page_offset(None), (1, 0));
        assert_eq!(page_offset(Some(0)), (1, 0));
        assert_eq!(page_offset(Some(4)), (4, 30));
    }
}
