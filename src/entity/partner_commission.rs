use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{partner, payout};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "paid")]
  Paid,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partner_commissions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub partner_id: i32,
  #[sea_orm(unique)]
  pub payout_id: String,
  pub dancer_id: i32,
  pub payout_amount_cents: i64,
  pub rate_bps: i32,
  pub amount_cents: i64,
  pub status: CommissionStatus,
  pub transfer_ref: Option<String>,
  pub created_at: DateTime,
  pub paid_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "partner::Entity",
    from = "Column::PartnerId",
    to = "partner::Column::Id"
  )]
  Partner,
  #[sea_orm(
    belongs_to = "payout::Entity",
    from = "Column::PayoutId",
    to = "payout::Column::Id"
  )]
  Payout,
}

impl Related<partner::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Partner.def()
  }
}

impl Related<payout::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Payout.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
