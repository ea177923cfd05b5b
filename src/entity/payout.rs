use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::dancer;

/// A completed disbursement to a dancer, amounts in cents.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payouts")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub dancer_id: i32,
  pub amount_cents: i64,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "dancer::Entity",
    from = "Column::DancerId",
    to = "dancer::Column::Id"
  )]
  Dancer,
}

impl Related<dancer::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Dancer.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
