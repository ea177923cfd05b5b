use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, Request, State},
  http::StatusCode,
  middleware::Next,
  response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{
    dancer, partner, partner_commission, payout, payout_destination, referral,
    revenue_event, submission,
  },
  error::Status,
  prelude::*,
  state::AppState,
  sv::{
    commission::{CommissionSummary, resolve_commission_rate},
    payout::PayoutReceipt,
    revenue::{CentsAmounts, DealRevenue, DecimalAmounts},
  },
};

type App = State<Arc<AppState>>;

pub async fn require_api_key(
  State(app): App,
  req: Request,
  next: Next,
) -> Response {
  let authorized = req
    .headers()
    .get("x-api-key")
    .and_then(|key| key.to_str().ok())
    .is_some_and(|key| key == app.config.api_secret);

  if !authorized {
    return (
      StatusCode::UNAUTHORIZED,
      Json(Status { success: false, msg: Some("Invalid API key".into()) }),
    )
      .into_response();
  }

  next.run(req).await
}

pub async fn health() -> Json<Status> {
  Json(Status { success: true, msg: None })
}

#[derive(Deserialize)]
pub struct NewName {
  name: String,
}

pub async fn create_partner(
  State(app): App,
  Json(req): Json<NewName>,
) -> Result<Json<partner::Model>> {
  Ok(Json(app.sv().partner.create(&req.name).await?))
}

pub async fn create_dancer(
  State(app): App,
  Json(req): Json<NewName>,
) -> Result<Json<dancer::Model>> {
  Ok(Json(app.sv().dancer.create(&req.name).await?))
}

#[derive(Serialize)]
pub struct DancerView {
  #[serde(flatten)]
  dancer: dancer::Model,
  referred_by: Option<i32>,
}

pub async fn get_dancer(
  State(app): App,
  Path(dancer_id): Path<i32>,
) -> Result<Json<DancerView>> {
  let sv = app.sv();
  let dancer = sv.dancer.by_id(dancer_id).await?;
  let referred_by = sv.referral.referrer_of(dancer_id).await?;
  Ok(Json(DancerView { dancer, referred_by }))
}

#[derive(Deserialize)]
pub struct NewReferral {
  partner_id: i32,
  dancer_id: i32,
}

pub async fn create_referral(
  State(app): App,
  Json(req): Json<NewReferral>,
) -> Result<Json<referral::Model>> {
  Ok(Json(app.sv().referral.refer(req.partner_id, req.dancer_id).await?))
}

pub async fn partner_referrals(
  State(app): App,
  Path(partner_id): Path<i32>,
) -> Result<Json<Vec<i32>>> {
  let sv = app.sv();
  sv.partner.by_id(partner_id).await?;
  Ok(Json(sv.referral.referred_dancers(partner_id).await?))
}

#[derive(Deserialize)]
pub struct TierQuery {
  dancer_id: Option<i32>,
}

#[derive(Serialize)]
pub struct TierView {
  partner_id: i32,
  active_dancers: u64,
  rate_bps: u32,
  rate: f64,
}

/// Current tier, optionally as seen by a payout to one of the partner's
/// own referred dancers.
pub async fn partner_tier(
  State(app): App,
  Path(partner_id): Path<i32>,
  Query(query): Query<TierQuery>,
) -> Result<Json<TierView>> {
  let sv = app.sv();
  sv.partner.by_id(partner_id).await?;

  let active = match query.dancer_id {
    Some(dancer_id) => {
      if sv.referral.referrer_of(dancer_id).await? != Some(partner_id) {
        return Err(Error::InvalidArgs(
          "Dancer was not referred by this partner".into(),
        ));
      }
      sv.referral.count_active_dancers(partner_id, dancer_id).await?
    }
    None => sv.referral.active_dancers(partner_id).await?,
  };
  let rate = resolve_commission_rate(active);

  Ok(Json(TierView {
    partner_id,
    active_dancers: active,
    rate_bps: rate.bps(),
    rate: rate.as_fraction(),
  }))
}

#[derive(Deserialize)]
pub struct NewSubmission {
  dancer_id: i32,
  video_url: String,
}

pub async fn create_submission(
  State(app): App,
  Json(req): Json<NewSubmission>,
) -> Result<Json<submission::Model>> {
  Ok(Json(app.sv().submission.submit(req.dancer_id, &req.video_url).await?))
}

#[derive(Deserialize)]
pub struct Review {
  approved: bool,
}

pub async fn review_submission(
  State(app): App,
  Path(submission_id): Path<i32>,
  Json(req): Json<Review>,
) -> Result<Json<submission::Model>> {
  Ok(Json(app.sv().submission.review(submission_id, req.approved).await?))
}

#[derive(Deserialize)]
pub struct NewPayout {
  dancer_id: i32,
  amount_cents: i64,
}

pub async fn complete_payout(
  State(app): App,
  Json(req): Json<NewPayout>,
) -> Result<Json<PayoutReceipt>> {
  Ok(Json(app.sv().payout.complete(req.dancer_id, req.amount_cents).await?))
}

pub async fn dancer_payouts(
  State(app): App,
  Path(dancer_id): Path<i32>,
) -> Result<Json<Vec<payout::Model>>> {
  Ok(Json(app.sv().payout.by_dancer(dancer_id).await?))
}

pub async fn payout_commission(
  State(app): App,
  Path(payout_id): Path<String>,
) -> Result<Json<Option<partner_commission::Model>>> {
  Ok(Json(app.sv().commission.by_payout(&payout_id).await?))
}

#[derive(Serialize)]
pub struct PartnerCommissions {
  partner_id: i32,
  summary: CommissionSummary,
  commissions: Vec<partner_commission::Model>,
}

pub async fn partner_commissions(
  State(app): App,
  Path(partner_id): Path<i32>,
) -> Result<Json<PartnerCommissions>> {
  let sv = app.sv();
  sv.partner.by_id(partner_id).await?;

  Ok(Json(PartnerCommissions {
    partner_id,
    summary: sv.commission.summary(partner_id).await?,
    commissions: sv.commission.by_partner(partner_id).await?,
  }))
}

pub async fn pay_commission(
  State(app): App,
  Path(commission_id): Path<i32>,
) -> Result<Json<partner_commission::Model>> {
  let commission =
    app.sv().commission.pay(commission_id, app.transfer.as_ref()).await?;
  Ok(Json(commission))
}

#[derive(Deserialize)]
pub struct NewDestination {
  account_ref: String,
}

pub async fn put_destination(
  State(app): App,
  Path(partner_id): Path<i32>,
  Json(req): Json<NewDestination>,
) -> Result<Json<payout_destination::Model>> {
  Ok(Json(app.sv().destination.upsert(partner_id, &req.account_ref).await?))
}

pub async fn verify_destination(
  State(app): App,
  Path(partner_id): Path<i32>,
) -> Result<Json<payout_destination::Model>> {
  Ok(Json(app.sv().destination.verify(partner_id).await?))
}

pub async fn get_destination(
  State(app): App,
  Path(partner_id): Path<i32>,
) -> Result<Json<Option<payout_destination::Model>>> {
  Ok(Json(app.sv().destination.get(partner_id).await?))
}

/// Feeds report either decimal dollars or integer cents.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RevenueAmounts {
  Cents { gross_cents: i64, fee_cents: i64, net_cents: i64 },
  Decimal { gross: f64, fee: f64, net: f64 },
}

#[derive(Deserialize)]
pub struct NewRevenue {
  deal_id: String,
  #[serde(flatten)]
  amounts: RevenueAmounts,
  #[serde(default)]
  producer_share_bps: u32,
}

pub async fn record_revenue(
  State(app): App,
  Json(req): Json<NewRevenue>,
) -> Result<Json<revenue_event::Model>> {
  let revenue = app.sv().revenue;

  let event = match req.amounts {
    RevenueAmounts::Cents { gross_cents, fee_cents, net_cents } => {
      revenue
        .record_cents(
          &req.deal_id,
          CentsAmounts { gross: gross_cents, fee: fee_cents, net: net_cents },
          req.producer_share_bps,
        )
        .await?
    }
    RevenueAmounts::Decimal { gross, fee, net } => {
      revenue
        .record(
          &req.deal_id,
          DecimalAmounts { gross, fee, net },
          req.producer_share_bps,
        )
        .await?
    }
  };

  Ok(Json(event))
}

pub async fn deal_revenue(
  State(app): App,
  Path(deal_id): Path<String>,
) -> Result<Json<DealRevenue>> {
  let events = app.sv().revenue.for_deal(&deal_id).await?;
  Ok(Json(DealRevenue::new(deal_id, events)))
}
