use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{dancer, partner};

/// Dancer signed up under a partner's referral link. Never updated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "referrals")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub dancer_id: i32,
  pub partner_id: i32,
  pub created_at: DateTime,
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
    belongs_to = "dancer::Entity",
    from = "Column::DancerId",
    to = "dancer::Column::Id"
  )]
  Dancer,
}

impl Related<partner::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Partner.def()
  }
}

impl Related<dancer::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Dancer.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
