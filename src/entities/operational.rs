use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Store opening hours, one row per day.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "operational")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub hari: String,
    pub jam_buka: String,
    pub jam_tutup: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
