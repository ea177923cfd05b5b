mod handlers;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use async_trait::async_trait;
use axum::{
  Router, middleware,
  routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{prelude::*, state::AppState};

pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let governor_conf = Arc::new(
      GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(100)
        .finish()
        .context("Failed to build rate limiter config")?,
    );

    let governor_limiter = governor_conf.limiter().clone();

    tokio::spawn(async move {
      loop {
        tokio::time::sleep(Duration::from_secs(60)).await;
        governor_limiter.retain_recent();
      }
    });

    let port = app.config.port;
    let router = router(app)
      .layer(
        ServiceBuilder::new()
          .layer(TraceLayer::new_for_http())
          .layer(GovernorLayer::new(governor_conf))
          .layer(
            CorsLayer::new()
              .allow_origin(Any)
              .allow_methods(Any)
              .allow_headers(Any),
          ),
      )
      .into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
      .await
      .with_context(|| format!("Failed to bind {addr}"))?;

    info!("HTTP Server listening on {addr}");

    axum::serve(listener, router)
      .with_graceful_shutdown(async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutting down HTTP server");
      })
      .await
      .context("HTTP server error")
  }
}

pub fn router(app: Arc<AppState>) -> Router {
  let api = Router::new()
    .route("/partners", post(handlers::create_partner))
    .route("/partners/{id}/referrals", get(handlers::partner_referrals))
    .route("/partners/{id}/tier", get(handlers::partner_tier))
    .route("/partners/{id}/commissions", get(handlers::partner_commissions))
    .route(
      "/partners/{id}/destination",
      put(handlers::put_destination).get(handlers::get_destination),
    )
    .route(
      "/partners/{id}/destination/verify",
      post(handlers::verify_destination),
    )
    .route("/dancers", post(handlers::create_dancer))
    .route("/dancers/{id}", get(handlers::get_dancer))
    .route("/dancers/{id}/payouts", get(handlers::dancer_payouts))
    .route("/referrals", post(handlers::create_referral))
    .route("/submissions", post(handlers::create_submission))
    .route("/submissions/{id}/review", post(handlers::review_submission))
    .route("/payouts", post(handlers::complete_payout))
    .route("/payouts/{id}/commission", get(handlers::payout_commission))
    .route("/commissions/{id}/pay", post(handlers::pay_commission))
    .route("/revenue", post(handlers::record_revenue))
    .route("/revenue/{id}", get(handlers::deal_revenue))
    .route_layer(middleware::from_fn_with_state(
      app.clone(),
      handlers::require_api_key,
    ));

  Router::new()
    .route("/health", get(handlers::health))
    .nest("/api", api)
    .with_state(app)
}

#[cfg(test)]
mod tests {
  use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
  };
  use tower::ServiceExt;

  use super::*;
  use crate::{
    config::Config,
    sv::{test_utils::test_db, transfer::ManualTransfer},
  };

  async fn app() -> Router {
    let state = AppState::from_parts(
      test_db::setup().await,
      Config::for_tests(),
      Arc::new(ManualTransfer),
    );
    router(Arc::new(state))
  }

  async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<json::Value>,
  ) -> (StatusCode, json::Value) {
    let mut request = Request::builder()
      .method(method)
      .uri(uri)
      .header("x-api-key", "secret");

    let body = match body {
      Some(body) => {
        request = request.header("content-type", "application/json");
        Body::from(body.to_string())
      }
      None => Body::empty(),
    };

    let response =
      router.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      json::Value::Null
    } else {
      json::from_slice(&bytes).unwrap()
    };

    (status, value)
  }

  #[tokio::test]
  async fn test_health_is_public() {
    let router = app().await;
    let response = router
      .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn test_api_requires_key() {
    let router = app().await;
    let response = router
      .oneshot(
        Request::builder()
          .method(Method::POST)
          .uri("/api/partners")
          .header("content-type", "application/json")
          .body(Body::from(r#"{"name":"Crew"}"#))
          .unwrap(),
      )
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn test_payout_to_paid_commission() {
    let router = app().await;

    let (_, partner) = call(
      &router,
      Method::POST,
      "/api/partners",
      Some(json::json!({ "name": "Crew" })),
    )
    .await;
    let partner_id = partner["id"].as_i64().unwrap();

    let (_, dancer) = call(
      &router,
      Method::POST,
      "/api/dancers",
      Some(json::json!({ "name": "Ana" })),
    )
    .await;
    let dancer_id = dancer["id"].as_i64().unwrap();

    let (status, _) = call(
      &router,
      Method::POST,
      "/api/referrals",
      Some(json::json!({ "partner_id": partner_id, "dancer_id": dancer_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, receipt) = call(
      &router,
      Method::POST,
      "/api/payouts",
      Some(json::json!({ "dancer_id": dancer_id, "amount_cents": 5000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["commission"]["outcome"], "created");
    assert_eq!(receipt["commission"]["commission"]["amount_cents"], 150);
    let commission_id =
      receipt["commission"]["commission"]["id"].as_i64().unwrap();

    let pay = format!("/api/commissions/{commission_id}/pay");
    let (status, _) = call(&router, Method::POST, &pay, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let destination = format!("/api/partners/{partner_id}/destination");
    call(
      &router,
      Method::PUT,
      &destination,
      Some(json::json!({ "account_ref": "acct_crew" })),
    )
    .await;
    let (status, _) =
      call(&router, Method::POST, &format!("{destination}/verify"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, paid) = call(&router, Method::POST, &pay, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paid");

    let (status, body) = call(&router, Method::POST, &pay, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (_, listing) = call(
      &router,
      Method::GET,
      &format!("/api/partners/{partner_id}/commissions"),
      None,
    )
    .await;
    assert_eq!(listing["summary"]["paid_cents"], 150);
  }

  #[tokio::test]
  async fn test_tier_and_revenue_views() {
    let router = app().await;

    let (_, partner) = call(
      &router,
      Method::POST,
      "/api/partners",
      Some(json::json!({ "name": "Crew" })),
    )
    .await;
    let partner_id = partner["id"].as_i64().unwrap();

    let (_, tier) = call(
      &router,
      Method::GET,
      &format!("/api/partners/{partner_id}/tier"),
      None,
    )
    .await;
    assert_eq!(tier["active_dancers"], 0);
    assert_eq!(tier["rate_bps"], 0);

    let (_, stranger) = call(
      &router,
      Method::POST,
      "/api/dancers",
      Some(json::json!({ "name": "Stranger" })),
    )
    .await;
    let (status, _) = call(
      &router,
      Method::GET,
      &format!(
        "/api/partners/{partner_id}/tier?dancer_id={}",
        stranger["id"]
      ),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    call(
      &router,
      Method::POST,
      "/api/referrals",
      Some(json::json!({
        "partner_id": partner_id,
        "dancer_id": stranger["id"]
      })),
    )
    .await;
    let (status, tier) = call(
      &router,
      Method::GET,
      &format!(
        "/api/partners/{partner_id}/tier?dancer_id={}",
        stranger["id"]
      ),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tier["active_dancers"], 1);
    assert_eq!(tier["rate_bps"], 300);

    let (status, event) = call(
      &router,
      Method::POST,
      "/api/revenue",
      Some(json::json!({
        "deal_id": "deal-9",
        "gross": 100.0,
        "fee": 20.0,
        "net": 79.98,
        "producer_share_bps": 7000
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["net_consistent"], false);

    call(
      &router,
      Method::POST,
      "/api/revenue",
      Some(json::json!({
        "deal_id": "deal-9",
        "gross_cents": 10000,
        "fee_cents": 2000,
        "net_cents": 8000
      })),
    )
    .await;

    let (_, report) =
      call(&router, Method::GET, "/api/revenue/deal-9", None).await;
    assert_eq!(report["events"].as_array().unwrap().len(), 2);
    assert_eq!(report["flagged"], 1);
  }

  #[tokio::test]
  async fn test_unknown_commission_is_not_found() {
    let router = app().await;
    let (status, _) =
      call(&router, Method::POST, "/api/commissions/7/pay", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
