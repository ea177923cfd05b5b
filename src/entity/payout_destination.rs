use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::partner;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payout_destinations")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub partner_id: i32,
  pub account_ref: String,
  pub verified: bool,
  pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "partner::Entity",
    from = "Column::PartnerId",
    to = "partner::Column::Id"
  )]
  Partner,
}

impl Related<partner::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Partner.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
