use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::dancer;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  #[sea_orm(string_value = "approved")]
  Approved,
  #[sea_orm(string_value = "rejected")]
  Rejected,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub dancer_id: i32,
  pub video_url: String,
  pub review_status: ReviewStatus,
  pub submitted_at: DateTime,
  pub reviewed_at: Option<DateTime>,
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
