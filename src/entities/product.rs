use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product row synchronized from the store's POS. `kode_item` is the POS
/// natural key; everything except `active`, `deskripsi` and the image
/// relation is overwritten on every catalog sync.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "produk")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub kode_item: String,
    #[sea_orm(nullable)]
    pub barcode: Option<String>,
    #[sea_orm(nullable)]
    pub kode_pabrik: Option<String>,
    #[sea_orm(nullable)]
    pub kode_toko: Option<String>,
    #[sea_orm(nullable)]
    pub kode_supplier: Option<String>,
    pub nama_produk: String,
    pub nama_produk_asli: String,
    #[sea_orm(nullable)]
    pub nama_produk_sebutan: Option<String>,
    #[sea_orm(nullable)]
    pub merk: Option<String>,
    #[sea_orm(nullable)]
    pub tipe: Option<String>,
    #[sea_orm(nullable)]
    pub satuan_besar: Option<String>,
    #[sea_orm(nullable)]
    pub satuan_kecil: Option<String>,
    #[sea_orm(nullable)]
    pub isi_satuan_besar: Option<String>,
    pub konversi: i64,
    pub harga_pokok: i64,
    pub harga_1: i64,
    pub harga_2: i64,
    pub harga_3: i64,
    pub harga_4: i64,
    pub harga_5: i64,
    pub harga_6: i64,
    pub harga_diskon: i64,
    pub berat: f64,
    pub volume: f64,
    pub slug: String,
    pub kategori: String,
    #[sea_orm(nullable)]
    pub subkategori: Option<String>,
    pub total_stok: i32,
    pub active: bool,
    #[sea_orm(nullable)]
    pub deskripsi: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_image::Entity")]
    Images,
    #[sea_orm(has_many = "super::cart::Entity")]
    Carts,
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::cart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Carts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
