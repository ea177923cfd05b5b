use serde::Serialize;
use uuid::Uuid;

use crate::{
  entity::payout,
  prelude::*,
  sv::{self, commission::CommissionOutcome},
};

pub struct Payout<'a> {
  db: &'a DatabaseConnection,
}

#[derive(Debug, Serialize)]
pub struct PayoutReceipt {
  pub payout: payout::Model,
  pub commission: CommissionOutcome,
}

impl<'a> Payout<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Records a completed dancer payout, then attaches the partner
  /// commission. The payout is committed first and stands regardless of
  /// the commission outcome.
  pub async fn complete(
    &self,
    dancer_id: i32,
    amount_cents: i64,
  ) -> Result<PayoutReceipt> {
    if amount_cents <= 0 {
      return Err(Error::InvalidArgs("Payout amount must be positive".into()));
    }

    sv::Dancer::new(self.db).by_id(dancer_id).await?;

    let payout = payout::ActiveModel {
      id: Set(Uuid::new_v4().to_string()),
      dancer_id: Set(dancer_id),
      amount_cents: Set(amount_cents),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(self.db)
    .await?;

    info!(
      "Payout {} of {} to dancer {}",
      payout.id,
      crate::money::format_cents(amount_cents),
      dancer_id
    );

    let commission =
      sv::Commission::new(self.db).create_if_applicable(&payout).await;

    Ok(PayoutReceipt { payout, commission })
  }

  pub async fn by_dancer(&self, dancer_id: i32) -> Result<Vec<payout::Model>> {
    Ok(
      payout::Entity::find()
        .filter(payout::Column::DancerId.eq(dancer_id))
        .order_by_desc(payout::Column::CreatedAt)
        .all(self.db)
        .await?,
    )
  }
}
