use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{partner_commission, payout_destination, referral};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partners")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub name: String,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "referral::Entity")]
  Referrals,
  #[sea_orm(has_many = "partner_commission::Entity")]
  Commissions,
  #[sea_orm(has_one = "payout_destination::Entity")]
  PayoutDestination,
}

impl Related<referral::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Referrals.def()
  }
}

impl Related<partner_commission::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Commissions.def()
  }
}

impl Related<payout_destination::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::PayoutDestination.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
