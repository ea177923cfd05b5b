use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("database error: {0}")]
  Db(#[from] sea_orm::DbErr),
  #[error("partner not found")]
  PartnerNotFound,
  #[error("dancer not found")]
  DancerNotFound,
  #[error("submission not found")]
  SubmissionNotFound,
  #[error("commission not found")]
  CommissionNotFound,
  #[error("commission already paid")]
  CommissionAlreadyPaid,
  #[error("partner has no verified payout destination")]
  DestinationUnverified,
  #[error("dancer already has a referring partner")]
  AlreadyReferred,
  #[error("invalid arguments: {0}")]
  InvalidArgs(String),
  #[error("transfer failed: {0}")]
  Transfer(String),
  #[error("internal error: {0}")]
  Internal(String),
}

impl Error {
  pub fn status_code(&self) -> StatusCode {
    match self {
      Self::PartnerNotFound
      | Self::DancerNotFound
      | Self::SubmissionNotFound
      | Self::CommissionNotFound => StatusCode::NOT_FOUND,
      Self::CommissionAlreadyPaid | Self::AlreadyReferred => {
        StatusCode::CONFLICT
      }
      Self::DestinationUnverified => StatusCode::UNPROCESSABLE_ENTITY,
      Self::InvalidArgs(_) => StatusCode::BAD_REQUEST,
      Self::Transfer(_) => StatusCode::BAD_GATEWAY,
      Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

#[derive(Serialize)]
pub struct Status {
  pub success: bool,
  pub msg: Option<String>,
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!("request failed: {self}");
    }
    (status, Json(Status { success: false, msg: Some(self.to_string()) }))
      .into_response()
  }
}
