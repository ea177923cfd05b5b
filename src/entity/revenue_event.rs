use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "revenue_events")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub deal_id: String,
  pub gross_cents: i64,
  pub fee_cents: i64,
  pub net_cents: i64,
  pub producer_cents: i64,
  pub platform_cents: i64,
  /// Set once at ingest, see `sv::revenue`.
  pub net_consistent: bool,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
