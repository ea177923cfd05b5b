pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_partners_and_dancers;
mod m20261001_000002_create_referrals;
mod m20261001_000003_create_submissions;
mod m20261001_000004_create_payouts;
mod m20261002_000005_create_partner_commissions;
mod m20261002_000006_create_payout_destinations;
mod m20261003_000007_create_revenue_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20261001_000001_create_partners_and_dancers::Migration),
      Box::new(m20261001_000002_create_referrals::Migration),
      Box::new(m20261001_000003_create_submissions::Migration),
      Box::new(m20261001_000004_create_payouts::Migration),
      Box::new(m20261002_000005_create_partner_commissions::Migration),
      Box::new(m20261002_000006_create_payout_destinations::Migration),
      Box::new(m20261003_000007_create_revenue_events::Migration),
    ]
  }
}
