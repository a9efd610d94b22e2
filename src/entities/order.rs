use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer order (transaksi). Created once at checkout; `status` is only
/// mutated by the lifecycle transitions in `services::orders`, never deleted.
/// Recipient and address fields are snapshots taken at creation time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaksi")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub transaksi_id: String,
    pub user_id: String,
    pub no_rekening: String,
    pub atas_nama: String,
    pub bank: String,
    pub nama_penerima: String,
    pub no_telpon: String,
    #[sea_orm(nullable)]
    pub provinsi: Option<String>,
    #[sea_orm(nullable)]
    pub kota: Option<String>,
    #[sea_orm(nullable)]
    pub kecamatan: Option<String>,
    #[sea_orm(nullable)]
    pub alamat_lengkap: Option<String>,
    #[sea_orm(nullable)]
    pub kode_pos: Option<String>,
    #[sea_orm(column_name = "type")]
    pub fulfillment_type: FulfillmentType,
    pub subtotal_produk: i64,
    pub subtotal_ongkir: i64,
    pub total: i64,
    pub status: OrderStatus,
    pub replied: bool,
    #[sea_orm(nullable)]
    pub alasan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::payment::Entity")]
    Payment,
    #[sea_orm(has_many = "super::order_line::Entity")]
    Lines,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Order status column. `Pending`/`Draft` are the two entry states (pickup
/// vs delivery); the rest are operator-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "process")]
    Process,
    #[sea_orm(string_value = "done")]
    Done,
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

/// How the order leaves the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentType {
    #[sea_orm(string_value = "pickup")]
    Pickup,
    #[sea_orm(string_value = "delivery")]
    Delivery,
}
