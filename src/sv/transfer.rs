//! Downstream payout rail used to settle partner commissions.
//!
//! `HttpTransfer` talks to an external transfer provider: JSON body signed
//! with HMAC-SHA256 (hex, `X-Signature`), bearer token auth and an
//! idempotency key derived from the commission id. `ManualTransfer` is used
//! when no provider is configured and admins settle off-platform.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::{Client, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::prelude::*;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
  pub idempotency_key: String,
  pub partner_id: i32,
  pub destination: String,
  pub amount_cents: i64,
  pub currency: &'static str,
}

impl TransferRequest {
  pub fn for_commission(
    commission_id: i32,
    partner_id: i32,
    destination: String,
    amount_cents: i64,
  ) -> Self {
    Self {
      idempotency_key: format!("commission-{commission_id}"),
      partner_id,
      destination,
      amount_cents,
      currency: "usd",
    }
  }
}

#[async_trait]
pub trait Transfer: Send + Sync {
  fn name(&self) -> &'static str;

  /// Moves funds and returns the provider's transfer reference.
  async fn send(&self, request: &TransferRequest) -> Result<String>;
}

#[derive(Clone)]
pub struct HttpTransfer {
  client: Client,
  api_url: String,
  api_token: String,
}

#[derive(Debug, Deserialize)]
struct TransferResponse {
  id: String,
}

impl HttpTransfer {
  pub fn new(api_url: String, api_token: String) -> Self {
    Self { client: Client::new(), api_url, api_token }
  }

  pub fn sign(api_token: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(api_token.as_bytes())
      .expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
  }
}

#[async_trait]
impl Transfer for HttpTransfer {
  fn name(&self) -> &'static str {
    "http"
  }

  async fn send(&self, request: &TransferRequest) -> Result<String> {
    let url = format!("{}/transfers", self.api_url.trim_end_matches('/'));
    let body = json::to_vec(request).map_err(|e| {
      Error::Internal(format!("Failed to encode transfer: {}", e))
    })?;

    let response = self
      .client
      .post(&url)
      .bearer_auth(&self.api_token)
      .header(CONTENT_TYPE, "application/json")
      .header("Idempotency-Key", &request.idempotency_key)
      .header("X-Signature", Self::sign(&self.api_token, &body))
      .body(body)
      .send()
      .await
      .map_err(|e| Error::Transfer(format!("Request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
      let text = response.text().await.unwrap_or_default();
      return Err(Error::Transfer(format!("{}: {}", status, text)));
    }

    let response: TransferResponse = response.json().await.map_err(|e| {
      Error::Transfer(format!("Failed to parse response: {}", e))
    })?;

    Ok(response.id)
  }
}

pub struct ManualTransfer;

#[async_trait]
impl Transfer for ManualTransfer {
  fn name(&self) -> &'static str {
    "manual"
  }

  async fn send(&self, request: &TransferRequest) -> Result<String> {
    info!(
      "Manual transfer of {} to partner {} ({})",
      crate::money::format_cents(request.amount_cents),
      request.partner_id,
      request.idempotency_key
    );
    Ok(format!("manual-{}", Uuid::new_v4()))
  }
}
