use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Registered polling source: the POS endpoint catalog sync pulls from,
/// one URL per label.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "polling")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub label: PollingLabel,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The three snapshots the POS exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PollingLabel {
    #[sea_orm(string_value = "produk")]
    Produk,
    #[sea_orm(string_value = "kategori")]
    Kategori,
    #[sea_orm(string_value = "pengguna")]
    Pengguna,
}
