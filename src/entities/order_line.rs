use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Immutable line-item snapshot captured at order creation. Deliberately
/// decoupled from the live product row so later price or name edits leave
/// historical orders untouched.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaksi_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub transaksi_id: String,
    pub kode_item: String,
    pub nama_produk: String,
    pub kategori: String,
    pub harga: i64,
    pub quantity: i32,
    pub subtotal_produk: i64,
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
