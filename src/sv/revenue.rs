//! Revenue reporting with a non-blocking net-revenue consistency flag.
//!
//! Revenue feeds report decimal amounts. They are checked against the
//! 0.01 tolerance as received, then converted to cents for storage, and
//! the flag is kept with the event. Events reported in cents use the exact
//! cents check.

use serde::Serialize;

use crate::{
  entity::revenue_event,
  money::cents_from_decimal,
  prelude::*,
  sv::commission::BPS_DENOMINATOR,
};

pub const NET_TOLERANCE: f64 = 0.01;

pub fn is_net_revenue_consistent(gross: f64, fee: f64, net: f64) -> bool {
  (net - (gross - fee)).abs() < NET_TOLERANCE
}

pub fn is_net_revenue_consistent_cents(gross: i64, fee: i64, net: i64) -> bool {
  gross.checked_sub(fee) == Some(net)
}

/// Producer share truncates; the platform keeps the remainder. Shares above
/// `BPS_DENOMINATOR` are capped.
pub fn split_net_cents(net: i64, producer_share_bps: u32) -> (i64, i64) {
  let bps = (producer_share_bps as i64).min(BPS_DENOMINATOR);
  let producer =
    (net as i128 * bps as i128).div_euclid(BPS_DENOMINATOR as i128) as i64;
  (producer, net - producer)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalAmounts {
  pub gross: f64,
  pub fee: f64,
  pub net: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CentsAmounts {
  pub gross: i64,
  pub fee: i64,
  pub net: i64,
}

pub struct Revenue<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Revenue<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn record(
    &self,
    deal_id: &str,
    amounts: DecimalAmounts,
    producer_share_bps: u32,
  ) -> Result<revenue_event::Model> {
    let DecimalAmounts { gross, fee, net } = amounts;
    if ![gross, fee, net].iter().all(|v| v.is_finite()) {
      return Err(Error::InvalidArgs("Revenue amounts must be finite".into()));
    }

    let consistent = is_net_revenue_consistent(gross, fee, net);
    let cents = CentsAmounts {
      gross: cents_from_decimal(gross),
      fee: cents_from_decimal(fee),
      net: cents_from_decimal(net),
    };

    self.insert(deal_id, cents, producer_share_bps, consistent).await
  }

  pub async fn record_cents(
    &self,
    deal_id: &str,
    amounts: CentsAmounts,
    producer_share_bps: u32,
  ) -> Result<revenue_event::Model> {
    let consistent =
      is_net_revenue_consistent_cents(amounts.gross, amounts.fee, amounts.net);
    self.insert(deal_id, amounts, producer_share_bps, consistent).await
  }

  async fn insert(
    &self,
    deal_id: &str,
    amounts: CentsAmounts,
    producer_share_bps: u32,
    consistent: bool,
  ) -> Result<revenue_event::Model> {
    if deal_id.trim().is_empty() {
      return Err(Error::InvalidArgs("Deal id is required".into()));
    }
    if amounts.gross < 0 || amounts.fee < 0 {
      return Err(Error::InvalidArgs(
        "Gross revenue and fee must be non-negative".into(),
      ));
    }
    if producer_share_bps as i64 > BPS_DENOMINATOR {
      return Err(Error::InvalidArgs(
        "Producer share must be between 0 and 10000 bps".into(),
      ));
    }

    let (producer, platform) = split_net_cents(amounts.net, producer_share_bps);

    let event = revenue_event::ActiveModel {
      id: NotSet,
      deal_id: Set(deal_id.to_string()),
      gross_cents: Set(amounts.gross),
      fee_cents: Set(amounts.fee),
      net_cents: Set(amounts.net),
      producer_cents: Set(producer),
      platform_cents: Set(platform),
      net_consistent: Set(consistent),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(self.db)
    .await?;

    if !consistent {
      warn!(
        "Revenue event {} for deal {} has inconsistent net revenue",
        event.id, event.deal_id
      );
    }

    Ok(event)
  }

  pub async fn for_deal(
    &self,
    deal_id: &str,
  ) -> Result<Vec<revenue_event::Model>> {
    Ok(
      revenue_event::Entity::find()
        .filter(revenue_event::Column::DealId.eq(deal_id))
        .order_by_asc(revenue_event::Column::Id)
        .all(self.db)
        .await?,
    )
  }

  /// Events flagged for human review. Nothing is corrected.
  pub async fn audit(&self) -> Result<Vec<revenue_event::Model>> {
    Ok(
      revenue_event::Entity::find()
        .filter(revenue_event::Column::NetConsistent.eq(false))
        .order_by_asc(revenue_event::Column::Id)
        .all(self.db)
        .await?,
    )
  }
}

#[derive(Debug, Serialize)]
pub struct DealRevenue {
  pub deal_id: String,
  pub events: Vec<revenue_event::Model>,
  pub flagged: usize,
}

impl DealRevenue {
  pub fn new(deal_id: String, events: Vec<revenue_event::Model>) -> Self {
    let flagged = events.iter().filter(|e| !e.net_consistent).count();
    Self { deal_id, events, flagged }
  }
}
