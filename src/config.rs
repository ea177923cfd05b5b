use std::env;

use anyhow::Context;

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  pub api_secret: String,
  pub transfer: Option<TransferConfig>,
  /// Zero disables the revenue audit loop.
  pub audit_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct TransferConfig {
  pub api_url: String,
  pub api_token: String,
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    let database_url = env::var("DATABASE_URL")
      .unwrap_or_else(|_| "sqlite:danceverse.db?mode=rwc".into());

    let port = match env::var("PORT") {
      Ok(port) => port.parse().context("Invalid PORT")?,
      Err(_) => 3000,
    };

    let api_secret = env::var("API_SECRET").context("API_SECRET not set")?;

    let transfer =
      match (env::var("TRANSFER_API_URL"), env::var("TRANSFER_API_TOKEN")) {
        (Ok(api_url), Ok(api_token)) => {
          Some(TransferConfig { api_url, api_token })
        }
        _ => None,
      };

    let audit_interval = parse_interval(
      &env::var("AUDIT_INTERVAL").unwrap_or_else(|_| "1h".into()),
    )?;

    Ok(Self { database_url, port, api_secret, transfer, audit_interval })
  }
}

fn parse_interval(raw: &str) -> anyhow::Result<Duration> {
  humantime::parse_duration(raw.trim())
    .with_context(|| format!("Invalid AUDIT_INTERVAL `{raw}`"))
}

#[cfg(test)]
impl Config {
  pub fn for_tests() -> Self {
    Self {
      database_url: "sqlite::memory:".into(),
      port: 0,
      api_secret: "secret".into(),
      transfer: None,
      audit_interval: Duration::ZERO,
    }
  }
}
