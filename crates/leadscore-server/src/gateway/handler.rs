use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use leadscore::model::{Lead, LeadId, Offer};
use leadscore::scoring::{BatchEntry, ScoredLead, ScoringFailure};

use crate::gateway::LEADSCORE_STATUS_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;

#[derive(Debug, Serialize)]
pub struct LeadsResponse {
    pub count: usize,
    /// Leads missing at least one field; they lose the completeness points.
    pub incomplete: usize,
    pub lead_ids: Vec<LeadId>,
}

/// One row of a results listing.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LeadResult<'a> {
    Scored(&'a ScoredLead),
    Failed(&'a ScoringFailure),
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse<'a> {
    pub total: usize,
    pub scored: usize,
    pub failed: usize,
    pub results: Vec<LeadResult<'a>>,
}

impl<'a> ResultsResponse<'a> {
    pub fn from_entries(entries: &'a [BatchEntry]) -> Self {
        let results: Vec<LeadResult<'a>> = entries
            .iter()
            .map(|(_, outcome)| match outcome {
                Ok(scored) => LeadResult::Scored(scored),
                Err(failure) => LeadResult::Failed(failure),
            })
            .collect();
        let scored = results
            .iter()
            .filter(|r| matches!(r, LeadResult::Scored(_)))
            .count();

        Self {
            total: results.len(),
            scored,
            failed: results.len() - scored,
            results,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UsageQuery {
    /// RFC 3339 lower bound for the summary window.
    pub since: Option<String>,
}

#[instrument(skip(state, body))]
pub async fn offer_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let offer: Offer = serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid offer schema: {}", e)))?;
    let offer = offer.normalized();

    if offer.name.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "offer name is required".to_string(),
        ));
    }

    let stored = state.store.put_offer(offer)?;
    info!(
        offer = %stored.name,
        use_cases = stored.ideal_use_cases.len(),
        "offer stored"
    );

    Ok((StatusCode::OK, Json(stored.as_ref())).into_response())
}

#[instrument(skip(state, body))]
pub async fn leads_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let leads: Vec<Lead> = serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid leads schema: {}", e)))?;

    if leads.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "at least one lead is required".to_string(),
        ));
    }

    let stored = state.store.put_leads(leads)?;
    let response = LeadsResponse {
        count: stored.len(),
        incomplete: stored.iter().filter(|lead| !lead.is_complete()).count(),
        lead_ids: stored.iter().map(|lead| lead.id).collect(),
    };
    info!(
        count = response.count,
        incomplete = response.incomplete,
        "leads stored"
    );

    Ok((StatusCode::OK, Json(response)).into_response())
}

#[instrument(skip(state))]
pub async fn score_handler(State(state): State<HandlerState>) -> Result<Response, GatewayError> {
    if state.shutdown.is_cancelled() {
        return Err(GatewayError::Unavailable("server is shutting down".to_string()));
    }

    let offer = state
        .store
        .offer()?
        .ok_or_else(|| GatewayError::InvalidRequest("no offer uploaded".to_string()))?;
    let leads = state.store.leads()?;
    if leads.is_empty() {
        return Err(GatewayError::InvalidRequest("no leads uploaded".to_string()));
    }

    let results = state
        .scorer
        .score_batch_with_cancel(&leads, &offer, &state.shutdown)
        .await;
    let response = ResultsResponse::from_entries(&results);

    let mut headers = HeaderMap::new();
    headers.insert(
        LEADSCORE_STATUS_HEADER,
        HeaderValue::from_static(if response.failed == 0 { "scored" } else { "partial" }),
    );
    let reply = (StatusCode::OK, headers, Json(&response)).into_response();

    state.store.put_results(results)?;
    Ok(reply)
}

#[instrument(skip(state))]
pub async fn results_handler(State(state): State<HandlerState>) -> Result<Response, GatewayError> {
    let results = state.store.results()?;
    Ok((StatusCode::OK, Json(ResultsResponse::from_entries(&results))).into_response())
}

#[instrument(skip(state))]
pub async fn usage_handler(
    State(state): State<HandlerState>,
    Query(query): Query<UsageQuery>,
) -> Result<Response, GatewayError> {
    let since = query
        .since
        .as_deref()
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|e| GatewayError::InvalidRequest(format!("invalid since '{raw}': {e}")))
        })
        .transpose()?;

    Ok((StatusCode::OK, Json(state.scorer.usage_summary(since))).into_response())
}

#[instrument(skip(state))]
pub async fn usage_reset_handler(State(state): State<HandlerState>) -> Response {
    state.scorer.reset_usage();
    StatusCode::NO_CONTENT.into_response()
}
