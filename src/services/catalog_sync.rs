use crate::{
    entities::{category, polling, product, sync_log, Category, Polling, PollingLabel, Product},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Upserts per batch; batches run sequentially, upserts inside a batch run
/// concurrently, so this also bounds peak concurrent writes.
const BATCH_SIZE: usize = 50;

/// Envelope every polling payload arrives in.
#[derive(Debug, Deserialize)]
pub struct PollingEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct ProdukPayload {
    pub produk: Vec<ProdukItem>,
}

/// One product row as the POS exposes it. Warehouse breakdowns and other
/// unknown fields are ignored; only `total_stok` matters for the shop.
#[derive(Debug, Clone, Deserialize)]
pub struct ProdukItem {
    pub kode_item: String,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub kode_pabrik: Option<String>,
    #[serde(default)]
    pub kode_toko: Option<String>,
    #[serde(default)]
    pub kode_supplier: Option<String>,
    pub nama_produk: String,
    pub nama_produk_asli: String,
    #[serde(default)]
    pub nama_produk_sebutan: Option<String>,
    #[serde(default)]
    pub merk: Option<String>,
    #[serde(default)]
    pub tipe: Option<String>,
    #[serde(default)]
    pub satuan_besar: Option<String>,
    #[serde(default)]
    pub satuan_kecil: Option<String>,
    #[serde(default)]
    pub isi_satuan_besar: Option<String>,
    #[serde(default)]
    pub konversi: i64,
    #[serde(default)]
    pub harga_pokok: i64,
    #[serde(default)]
    pub harga_1: i64,
    #[serde(default)]
    pub harga_2: i64,
    #[serde(default)]
    pub harga_3: i64,
    #[serde(default)]
    pub harga_4: i64,
    #[serde(default)]
    pub harga_5: i64,
    #[serde(default)]
    pub harga_6: i64,
    #[serde(default)]
    pub harga_diskon: i64,
    #[serde(default)]
    pub berat: f64,
    #[serde(default)]
    pub volume: f64,
    pub kategori: String,
    #[serde(default)]
    pub subkategori: Option<String>,
    #[serde(default)]
    pub total_stok: i32,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KategoriItem {
    pub id_kategori: i64,
    pub nama: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PenggunaItem {
    pub username: String,
    pub nama: String,
    pub password_hash: String,
    #[serde(default)]
    pub password_encrypt: Option<String>,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct SyncReceipt {
    pub synchronized_at: DateTime<Utc>,
}

/// Pulls product/category/operator snapshots from the registered polling
/// URLs and upserts them keyed by their POS natural keys.
#[derive(Clone)]
pub struct CatalogSyncService {
    db: Arc<DatabaseConnection>,
    http: reqwest::Client,
    event_sender: EventSender,
}

impl CatalogSyncService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self {
            db,
            http: reqwest::Client::new(),
            event_sender,
        }
    }

    /// Resolves the registered URL for a label; sync fails fast when no
    /// source is registered.
    async fn polling_url(&self, label: PollingLabel) -> Result<String, ServiceError> {
        Polling::find()
            .filter(polling::Column::Label.eq(label))
            .one(&*self.db)
            .await?
            .map(|p| p.url)
            .ok_or_else(|| ServiceError::NotFound("Polling url not found!".to_string()))
    }

    #[instrument(skip(self))]
    pub async fn sync_products(&self) -> Result<SyncReceipt, ServiceError> {
        let url = self.polling_url(PollingLabel::Produk).await?;
        let payload: PollingEnvelope<ProdukPayload> =
            self.http.get(&url).send().await?.json().await?;

        let upserted = apply_product_snapshot(&self.db, payload.data.produk).await?;
        self.finish("produk", upserted).await
    }

    /// Same as [`sync_products`] but restricted to one category.
    #[instrument(skip(self))]
    pub async fn sync_products_by_category(
        &self,
        id_kategori: &str,
    ) -> Result<SyncReceipt, ServiceError> {
        let url = self.polling_url(PollingLabel::Produk).await?;
        let payload: PollingEnvelope<ProdukPayload> =
            self.http.get(&url).send().await?.json().await?;

        let filtered: Vec<_> = payload
            .data
            .produk
            .into_iter()
            .filter(|item| item.kategori == id_kategori)
            .collect();

        let upserted = apply_product_snapshot(&self.db, filtered).await?;
        self.finish("produk", upserted).await
    }

    #[instrument(skip(self))]
    pub async fn sync_categories(&self) -> Result<SyncReceipt, ServiceError> {
        let url = self.polling_url(PollingLabel::Kategori).await?;
        let payload: PollingEnvelope<Vec<KategoriItem>> =
            self.http.get(&url).send().await?.json().await?;

        let upserted = apply_category_snapshot(&self.db, payload.data).await?;
        self.finish("kategori", upserted).await
    }

    /// Operators are POS users whose role list contains `owner` or `admin`.
    /// The audit row is written with label `operator` even though the
    /// polling source is registered as `pengguna`.
    #[instrument(skip(self))]
    pub async fn sync_operators(&self) -> Result<SyncReceipt, ServiceError> {
        let url = self.polling_url(PollingLabel::Pengguna).await?;
        let payload: PollingEnvelope<Vec<PenggunaItem>> =
            self.http.get(&url).send().await?.json().await?;

        let upserted = apply_operator_snapshot(&self.db, payload.data).await?;
        self.finish("operator", upserted).await
    }

    async fn finish(&self, label: &str, upserted: usize) -> Result<SyncReceipt, ServiceError> {
        let synchronized_at = record_sync(&self.db, label).await?;

        self.event_sender
            .send_or_log(Event::CatalogSynced {
                label: label.to_string(),
                upserted,
            })
            .await;

        info!(label, upserted, "catalog sync complete");
        Ok(SyncReceipt { synchronized_at })
    }
}

/// Writes the audit row stamping this run.
pub async fn record_sync(
    db: &DatabaseConnection,
    label: &str,
) -> Result<DateTime<Utc>, ServiceError> {
    let synchronized_at = Utc::now();
    sync_log::ActiveModel {
        label: Set(label.to_string()),
        synchronized_at: Set(synchronized_at),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(synchronized_at)
}

/// Upserts a product snapshot in batches of [`BATCH_SIZE`], keyed by
/// `kode_item`. Any single failure aborts the run; earlier batches stay
/// committed.
pub async fn apply_product_snapshot(
    db: &DatabaseConnection,
    mut items: Vec<ProdukItem>,
) -> Result<usize, ServiceError> {
    items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    let total = items.len();

    for batch in items.chunks(BATCH_SIZE) {
        let upserts = batch.iter().map(|item| upsert_product(db, item));
        for result in join_all(upserts).await {
            result?;
        }
    }

    Ok(total)
}

async fn upsert_product(db: &DatabaseConnection, item: &ProdukItem) -> Result<(), ServiceError> {
    let now = Utc::now();
    let nama_produk_asli = normalize_whitespace(&item.nama_produk_asli);
    let slug = slugify(&nama_produk_asli);

    let model = product::ActiveModel {
        kode_item: Set(item.kode_item.clone()),
        barcode: Set(item.barcode.clone()),
        kode_pabrik: Set(item.kode_pabrik.clone()),
        kode_toko: Set(item.kode_toko.clone()),
        kode_supplier: Set(item.kode_supplier.clone()),
        nama_produk: Set(normalize_whitespace(&item.nama_produk)),
        nama_produk_asli: Set(nama_produk_asli),
        nama_produk_sebutan: Set(item
            .nama_produk_sebutan
            .as_deref()
            .map(normalize_whitespace)),
        merk: Set(item.merk.clone()),
        tipe: Set(item.tipe.clone()),
        satuan_besar: Set(item.satuan_besar.clone()),
        satuan_kecil: Set(item.satuan_kecil.clone()),
        isi_satuan_besar: Set(item.isi_satuan_besar.clone()),
        konversi: Set(item.konversi),
        harga_pokok: Set(item.harga_pokok),
        harga_1: Set(item.harga_1),
        harga_2: Set(item.harga_2),
        harga_3: Set(item.harga_3),
        harga_4: Set(item.harga_4),
        harga_5: Set(item.harga_5),
        harga_6: Set(item.harga_6),
        harga_diskon: Set(item.harga_diskon),
        berat: Set(item.berat),
        volume: Set(item.volume),
        slug: Set(slug),
        kategori: Set(item.kategori.clone()),
        subkategori: Set(item.subkategori.clone()),
        total_stok: Set(item.total_stok),
        active: Set(true),
        deskripsi: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    // Existing rows keep their storefront-owned fields (active, deskripsi,
    // created_at); everything POS-sourced is overwritten.
    Product::insert(model)
        .on_conflict(
            OnConflict::column(product::Column::KodeItem)
                .update_columns([
                    product::Column::Barcode,
                    product::Column::KodePabrik,
                    product::Column::KodeToko,
                    product::Column::KodeSupplier,
                    product::Column::NamaProduk,
                    product::Column::NamaProdukAsli,
                    product::Column::NamaProdukSebutan,
                    product::Column::Merk,
                    product::Column::Tipe,
                    product::Column::SatuanBesar,
                    product::Column::SatuanKecil,
                    product::Column::IsiSatuanBesar,
                    product::Column::Konversi,
                    product::Column::HargaPokok,
                    product::Column::Harga1,
                    product::Column::Harga2,
                    product::Column::Harga3,
                    product::Column::Harga4,
                    product::Column::Harga5,
                    product::Column::Harga6,
                    product::Column::HargaDiskon,
                    product::Column::Berat,
                    product::Column::Volume,
                    product::Column::Slug,
                    product::Column::Kategori,
                    product::Column::Subkategori,
                    product::Column::TotalStok,
                    product::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}

/// Creates missing categories and refreshes existing ones, keyed by name.
pub async fn apply_category_snapshot(
    db: &DatabaseConnection,
    mut items: Vec<KategoriItem>,
) -> Result<usize, ServiceError> {
    items.sort_by_key(|c| c.id_kategori);
    let total = items.len();
    let now = Utc::now();

    for item in items {
        let existing = Category::find()
            .filter(category::Column::Nama.eq(item.nama.as_str()))
            .one(db)
            .await?;

        match existing {
            None => {
                category::ActiveModel {
                    nama: Set(item.nama),
                    active: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            }
            Some(row) => {
                let mut active: category::ActiveModel = row.into();
                active.updated_at = Set(now);
                active.update(db).await?;
            }
        }
    }

    Ok(total)
}

/// Upserts POS accounts with an `owner` or `admin` role as dashboard
/// operators, keyed by username.
pub async fn apply_operator_snapshot(
    db: &DatabaseConnection,
    items: Vec<PenggunaItem>,
) -> Result<usize, ServiceError> {
    use crate::entities::{operator, Operator};

    let now = Utc::now();
    let admins: Vec<_> = items
        .into_iter()
        .filter(|item| {
            item.role
                .split(',')
                .any(|role| role == "owner" || role == "admin")
        })
        .collect();
    let total = admins.len();

    for item in admins {
        let model = operator::ActiveModel {
            username: Set(item.username),
            nama: Set(item.nama),
            password_hash: Set(item.password_hash),
            password_encrypt: Set(item.password_encrypt),
            role: Set(item.role),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Operator::insert(model)
            .on_conflict(
                OnConflict::column(operator::Column::Username)
                    .update_columns([
                        operator::Column::Nama,
                        operator::Column::PasswordHash,
                        operator::Column::PasswordEncrypt,
                        operator::Column::Role,
                        operator::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(db)
            .await?;
    }

    Ok(total)
}

/// Collapses internal whitespace runs and trims the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// URL-safe slug from a normalized display name.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        assert_eq!(normalize_whitespace("  PAKU   5\tCM  "), "PAKU 5 CM");
        assert_eq!(normalize_whitespace("BESI"), "BESI");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn slug_is_kebab_case_of_words() {
        assert_eq!(slugify("PAKU 5 CM"), "paku-5-cm");
        assert_eq!(slugify("Semen (50kg) / sak"), "semen-50kg-sak");
        assert_eq!(slugify("  BESI  BETON  "), "besi-beton");
    }

    #[test]
    fn operator_filter_splits_comma_separated_roles() {
        let items = vec![
            PenggunaItem {
                username: "a".into(),
                nama: "A".into(),
                password_hash: "h".into(),
                password_encrypt: None,
                role: "kasir,admin".into(),
            },
            PenggunaItem {
                username: "b".into(),
                nama: "B".into(),
                password_hash: "h".into(),
                password_encrypt: None,
                role: "kasir".into(),
            },
        ];

        let admins: Vec<_> = items
            .into_iter()
            .filter(|item| {
                item.role
                    .split(',')
                    .any(|role| role == "owner" || role == "admin")
            })
            .collect();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].username, "a");
    }

    #[test]
    fn product_payload_ignores_warehouse_breakdown() {
        let raw = serde_json::json!({
            "kode_item": "X1",
            "nama_produk": "PAKU  5 CM",
            "nama_produk_asli": " PAKU 5 CM ",
            "kategori": "Paku",
            "harga_6": 1000,
            "total_stok": 12,
            "gudang": [{"stok": 12, "nama": "Gudang A"}],
            "created_at": "2024-01-01T00:00:00Z"
        });

        let item: ProdukItem = serde_json::from_value(raw).unwrap();
        assert_eq!(item.kode_item, "X1");
        assert_eq!(item.total_stok, 12);
        assert_eq!(item.harga_5, 0);
    }
}
