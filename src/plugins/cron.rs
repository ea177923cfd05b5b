use std::sync::Arc;

use async_trait::async_trait;

use crate::{
  money::format_cents, plugins::Plugin, prelude::*, state::AppState,
};

/// Periodically logs revenue events whose net figure does not reconcile.
/// Read-only: flagged events are left for human review.
pub struct RevenueAudit;

#[async_trait]
impl Plugin for RevenueAudit {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let every = app.config.audit_interval;
    if every.is_zero() {
      info!("Revenue audit disabled via config (0 interval)");
      return Ok(());
    }

    info!(
      "Revenue audit started (interval: {})",
      humantime::format_duration(every)
    );

    let mut interval = tokio::time::interval(every);

    loop {
      interval.tick().await;

      match run_audit(&app).await {
        Ok(0) => debug!("Revenue audit: all events reconcile"),
        Ok(flagged) => warn!("Revenue audit: {} event(s) flagged", flagged),
        Err(err) => error!("Revenue audit failed: {}", err),
      }
    }
  }
}

async fn run_audit(app: &AppState) -> Result<usize> {
  let flagged = app.sv().revenue.audit().await?;

  for event in &flagged {
    warn!(
      "Deal {} event {}: net {} but gross {} - fee {} = {}",
      event.deal_id,
      event.id,
      format_cents(event.net_cents),
      format_cents(event.gross_cents),
      format_cents(event.fee_cents),
      format_cents(event.gross_cents - event.fee_cents)
    );
  }

  Ok(flagged.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    config::Config,
    sv::{
      revenue::{CentsAmounts, DecimalAmounts},
      test_utils::test_db,
      transfer::ManualTransfer,
    },
  };

  #[tokio::test]
  async fn test_audit_counts_flagged_events() {
    let db = test_db::setup().await;
    let app = AppState::from_parts(
      db,
      Config::for_tests(),
      Arc::new(ManualTransfer),
    );

    let revenue = app.sv().revenue;
    revenue
      .record("deal", DecimalAmounts { gross: 10.0, fee: 1.0, net: 9.0 }, 0)
      .await
      .unwrap();
    revenue
      .record_cents("deal", CentsAmounts { gross: 1000, fee: 100, net: 850 }, 0)
      .await
      .unwrap();

    assert_eq!(run_audit(&app).await.unwrap(), 1);
  }

  #[tokio::test]
  async fn test_disabled_audit_returns() {
    let app = AppState::from_parts(
      test_db::setup().await,
      Config::for_tests(),
      Arc::new(ManualTransfer),
    );

    RevenueAudit.start(Arc::new(app)).await.unwrap();
  }
}
