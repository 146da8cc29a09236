//! HTTP gateway (Axum) for uploading offers and leads, scoring them and
//! reading results and provider usage.
//!
//! This module is primarily used by the `leadscore` server binary.

pub mod error;
pub mod handler;
pub mod state;


use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{
    leads_handler, offer_handler, results_handler, score_handler, usage_handler,
    usage_reset_handler,
};
pub use state::HandlerState;

pub const LEADSCORE_STATUS_HEADER: &str = "x-leadscore-status";
pub const LEADSCORE_STATUS_HEALTHY: &str = "healthy";
pub const LEADSCORE_STATUS_READY: &str = "ready";

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/offer", post(offer_handler))
        .route("/v1/leads", post(leads_handler))
        .route("/v1/score", post(score_handler))
        .route("/v1/results", get(results_handler))
        .route("/v1/usage", get(usage_handler).delete(usage_reset_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub providers: Vec<String>,
    pub provider_mode: &'static str,
    pub offer_loaded: bool,
    pub leads: usize,
    pub rate_limit_remaining: BTreeMap<String, usize>,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        LEADSCORE_STATUS_HEADER,
        HeaderValue::from_static(LEADSCORE_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let offer_loaded = state.store.offer().is_ok_and(|offer| offer.is_some());
    let leads = state.store.leads().map(|leads| leads.len()).unwrap_or(0);
    let is_ready = !state.shutdown.is_cancelled();

    let components = ComponentStatus {
        http: LEADSCORE_STATUS_READY,
        providers: state.scorer.orchestrator().provider_ids(),
        provider_mode: if state.mock_provider { "offline" } else { "remote" },
        offer_loaded,
        leads,
        rate_limit_remaining: state.scorer.orchestrator().rate_limit_remaining(),
    };

    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "shutting_down")
    };

    let mut headers = HeaderMap::new();
    headers.insert(LEADSCORE_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
