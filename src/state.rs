use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use crate::{
  config::Config,
  prelude::*,
  sv::{
    Sv,
    transfer::{HttpTransfer, ManualTransfer, Transfer},
  },
};

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
  pub transfer: Arc<dyn Transfer>,
}

impl AppState {
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    let db = Database::connect(&config.database_url)
      .await
      .context("Failed to connect to database")?;

    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    let transfer: Arc<dyn Transfer> = match &config.transfer {
      Some(transfer) => Arc::new(HttpTransfer::new(
        transfer.api_url.clone(),
        transfer.api_token.clone(),
      )),
      None => {
        warn!("No transfer provider configured, commissions settle manually");
        Arc::new(ManualTransfer)
      }
    };

    info!("Commission transfers via `{}`", transfer.name());

    Ok(Self::from_parts(db, config, transfer))
  }

  pub fn from_parts(
    db: DatabaseConnection,
    config: Config,
    transfer: Arc<dyn Transfer>,
  ) -> Self {
    Self { db, config, transfer }
  }

  pub fn sv(&self) -> Sv<'_> {
    Sv::new(&self.db)
  }
}
