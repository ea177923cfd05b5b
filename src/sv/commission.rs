use sea_orm::SqlErr;
use serde::Serialize;

use crate::{
  entity::{
    CommissionStatus, partner_commission, payout, payout_destination,
    referral,
  },
  prelude::*,
  sv::{
    referral::count_active_dancers_at,
    transfer::{Transfer, TransferRequest},
  },
};

pub const BPS_DENOMINATOR: i64 = 10_000;

/// Active-dancer thresholds, highest first.
const TIERS: [(u64, Rate); 4] =
  [(150, Rate(1000)), (75, Rate(700)), (25, Rate(500)), (1, Rate(300))];

/// Commission rate in basis points. Only the tier table constructs one, so
/// a rate never exceeds `BPS_DENOMINATOR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Rate(u32);

impl Rate {
  pub const ZERO: Rate = Rate(0);

  pub fn bps(self) -> u32 {
    self.0
  }

  pub fn as_fraction(self) -> f64 {
    self.0 as f64 / BPS_DENOMINATOR as f64
  }

  pub fn is_zero(self) -> bool {
    self.0 == 0
  }

  /// `floor(amount_cents * rate)`, never rounding up. The product is taken
  /// in i128 and the result is no larger in magnitude than the input.
  pub fn apply(self, amount_cents: i64) -> i64 {
    let scaled = amount_cents as i128 * self.0 as i128;
    scaled.div_euclid(BPS_DENOMINATOR as i128) as i64
  }
}

pub fn resolve_commission_rate(active_dancers: u64) -> Rate {
  TIERS
    .iter()
    .find(|(threshold, _)| active_dancers >= *threshold)
    .map_or(Rate::ZERO, |&(_, rate)| rate)
}

/// Result of the best-effort commission step attached to a payout.
/// Failures are reported here instead of propagating to the payout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommissionOutcome {
  Created { commission: partner_commission::Model },
  NoReferrer,
  ZeroRate { active: u64 },
  ZeroAmount { active: u64, rate_bps: u32 },
  AlreadyRecorded,
  Skipped { reason: String },
}

impl CommissionOutcome {
  pub fn commission(&self) -> Option<&partner_commission::Model> {
    match self {
      Self::Created { commission } => Some(commission),
      _ => None,
    }
  }
}

/// Rate and amount owed for a payout, or why nothing is owed.
fn owed(active: u64, payout_amount_cents: i64) -> Result<(Rate, i64), Owed> {
  let rate = resolve_commission_rate(active);
  if rate.is_zero() {
    return Err(Owed::ZeroRate);
  }

  let amount = rate.apply(payout_amount_cents);
  if amount <= 0 {
    return Err(Owed::ZeroAmount(rate));
  }

  Ok((rate, amount))
}

#[derive(Debug, PartialEq, Eq)]
enum Owed {
  ZeroRate,
  ZeroAmount(Rate),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CommissionSummary {
  pub pending_count: u64,
  pub pending_cents: i64,
  pub paid_count: u64,
  pub paid_cents: i64,
}

pub struct Commission<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Commission<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Creates the partner commission for a completed payout if one is owed.
  /// Never fails: errors are logged and reported as `Skipped`.
  pub async fn create_if_applicable(
    &self,
    payout: &payout::Model,
  ) -> CommissionOutcome {
    match self.try_create(payout).await {
      Ok(outcome) => outcome,
      Err(err) => {
        warn!("Commission for payout {} skipped: {}", payout.id, err);
        CommissionOutcome::Skipped { reason: err.to_string() }
      }
    }
  }

  async fn try_create(
    &self,
    payout: &payout::Model,
  ) -> Result<CommissionOutcome> {
    let txn = self.db.begin().await?;

    let Some(referral) =
      referral::Entity::find_by_id(payout.dancer_id).one(&txn).await?
    else {
      return Ok(CommissionOutcome::NoReferrer);
    };

    let now = Utc::now().naive_utc();
    let active = count_active_dancers_at(
      &txn,
      referral.partner_id,
      Some(payout.dancer_id),
      now,
    )
    .await?;

    let (rate, amount) = match owed(active, payout.amount_cents) {
      Ok(owed) => owed,
      Err(Owed::ZeroRate) => return Ok(CommissionOutcome::ZeroRate { active }),
      Err(Owed::ZeroAmount(rate)) => {
        return Ok(CommissionOutcome::ZeroAmount {
          active,
          rate_bps: rate.bps(),
        });
      }
    };

    let inserted = partner_commission::ActiveModel {
      id: NotSet,
      partner_id: Set(referral.partner_id),
      payout_id: Set(payout.id.clone()),
      dancer_id: Set(payout.dancer_id),
      payout_amount_cents: Set(payout.amount_cents),
      rate_bps: Set(rate.bps() as i32),
      amount_cents: Set(amount),
      status: Set(CommissionStatus::Pending),
      transfer_ref: Set(None),
      created_at: Set(now),
      paid_at: Set(None),
    }
    .insert(&txn)
    .await;

    match inserted {
      Ok(commission) => {
        txn.commit().await?;
        info!(
          "Commission {} for partner {}: {} at {} bps ({} active)",
          commission.id,
          commission.partner_id,
          crate::money::format_cents(amount),
          rate.bps(),
          active
        );
        Ok(CommissionOutcome::Created { commission })
      }
      Err(err)
        if matches!(
          err.sql_err(),
          Some(SqlErr::UniqueConstraintViolation(_))
        ) =>
      {
        debug!("Commission for payout {} already recorded", payout.id);
        Ok(CommissionOutcome::AlreadyRecorded)
      }
      Err(err) => Err(err.into()),
    }
  }

  pub async fn by_id(
    &self,
    commission_id: i32,
  ) -> Result<partner_commission::Model> {
    partner_commission::Entity::find_by_id(commission_id)
      .one(self.db)
      .await?
      .ok_or(Error::CommissionNotFound)
  }

  pub async fn by_payout(
    &self,
    payout_id: &str,
  ) -> Result<Option<partner_commission::Model>> {
    Ok(
      partner_commission::Entity::find()
        .filter(partner_commission::Column::PayoutId.eq(payout_id))
        .one(self.db)
        .await?,
    )
  }

  pub async fn by_partner(
    &self,
    partner_id: i32,
  ) -> Result<Vec<partner_commission::Model>> {
    Ok(
      partner_commission::Entity::find()
        .filter(partner_commission::Column::PartnerId.eq(partner_id))
        .order_by_desc(partner_commission::Column::CreatedAt)
        .all(self.db)
        .await?,
    )
  }

  pub async fn summary(&self, partner_id: i32) -> Result<CommissionSummary> {
    let commissions = self.by_partner(partner_id).await?;

    Ok(commissions.iter().fold(
      CommissionSummary::default(),
      |mut summary, commission| {
        match commission.status {
          CommissionStatus::Pending => {
            summary.pending_count += 1;
            summary.pending_cents =
              summary.pending_cents.saturating_add(commission.amount_cents);
          }
          CommissionStatus::Paid => {
            summary.paid_count += 1;
            summary.paid_cents =
              summary.paid_cents.saturating_add(commission.amount_cents);
          }
        }
        summary
      },
    ))
  }

  /// Settles a pending commission. A failed transfer leaves it pending
  /// for an explicit retry.
  pub async fn pay(
    &self,
    commission_id: i32,
    transfer: &dyn Transfer,
  ) -> Result<partner_commission::Model> {
    let commission = self.by_id(commission_id).await?;

    if commission.status == CommissionStatus::Paid {
      return Err(Error::CommissionAlreadyPaid);
    }

    let destination =
      payout_destination::Entity::find_by_id(commission.partner_id)
        .one(self.db)
        .await?
        .filter(|d| d.verified)
        .ok_or(Error::DestinationUnverified)?;

    let request = TransferRequest::for_commission(
      commission.id,
      commission.partner_id,
      destination.account_ref,
      commission.amount_cents,
    );

    let transfer_ref = transfer.send(&request).await.inspect_err(|err| {
      warn!(
        "Transfer via {} for commission {} failed: {}",
        transfer.name(),
        commission.id,
        err
      );
    })?;

    let result = partner_commission::Entity::update_many()
      .set(partner_commission::ActiveModel {
        status: Set(CommissionStatus::Paid),
        transfer_ref: Set(Some(transfer_ref.clone())),
        paid_at: Set(Some(Utc::now().naive_utc())),
        ..Default::default()
      })
      .filter(partner_commission::Column::Id.eq(commission.id))
      .filter(partner_commission::Column::Status.eq(CommissionStatus::Pending))
      .exec(self.db)
      .await?;

    if result.rows_affected == 0 {
      error!(
        "Commission {} settled concurrently, transfer {} needs review",
        commission.id, transfer_ref
      );
      return Err(Error::CommissionAlreadyPaid);
    }

    info!(
      "Commission {} paid to partner {} via {} ({})",
      commission.id,
      commission.partner_id,
      transfer.name(),
      transfer_ref
    );

    self.by_id(commission.id).await
  }
}
