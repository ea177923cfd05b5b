use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{payout, submission};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dancers")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub name: String,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "submission::Entity")]
  Submissions,
  #[sea_orm(has_many = "payout::Entity")]
  Payouts,
}

impl Related<submission::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Submissions.def()
  }
}

impl Related<payout::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Payouts.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
