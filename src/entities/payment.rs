use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment record, 1:1 with an order. Proof fields (`url`, `nama`, `dari`,
/// `metode`) are filled by the proof upload; `expired` is a unix timestamp
/// set 24h after upload and cleared on payment cancellation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub payment_id: String,
    #[sea_orm(unique)]
    pub transaksi_id: String,
    pub status: PaymentStatus,
    #[sea_orm(nullable)]
    pub url: Option<String>,
    #[sea_orm(nullable)]
    pub nama: Option<String>,
    #[sea_orm(nullable)]
    pub dari: Option<String>,
    #[sea_orm(nullable)]
    pub metode: Option<String>,
    #[sea_orm(nullable)]
    pub alasan: Option<String>,
    #[sea_orm(nullable)]
    pub expired: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::TransaksiId",
        to = "super::order::Column::TransaksiId"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Payment status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "done")]
    Done,
    #[sea_orm(string_value = "canceled")]
    Canceled,
}
