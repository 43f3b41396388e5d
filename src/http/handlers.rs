//! Status API handlers.
//!
//! # Responsibilities
//! - `/status`: run one full cycle on demand, return the reconciled batch
//! - `/history`: recent persisted records for one (state, document-type) pair
//! - `/freshness`: the staleness predicate the dashboard consumes
//!
//! # Design Decisions
//! - A broken crawler (502, `layout_changed`) is never presented like a
//!   service outage (normal records with offline verdicts)
//! - Query parameter names follow the dashboard contract: `state`,
//!   `documentType`

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::http::server::AppState;
use crate::monitor::CycleError;
use crate::status::DocumentType;

#[derive(Debug, Deserialize)]
pub struct PairParams {
    pub state: Option<String>,
    #[serde(rename = "documentType")]
    pub document_type: Option<String>,
}

fn parse_pair(params: &PairParams) -> Result<(String, DocumentType), Response> {
    let state = match params.state.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "state is required" })),
            )
                .into_response())
        }
    };
    let document_type = match params.document_type.as_deref() {
        None => DocumentType::Nfe,
        Some(raw) => match raw.parse() {
            Ok(dt) => dt,
            Err(()) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "documentType must be NFe or NFCe" })),
                )
                    .into_response())
            }
        },
    };
    Ok((state, document_type))
}

/// GET /status — run one cycle and return every reconciled record.
pub async fn status(State(state): State<AppState>) -> Response {
    match state.monitor.run_cycle().await {
        Ok(records) => Json(records).into_response(),
        Err(error @ CycleError::LayoutChanged) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "layout_changed", "message": error.to_string() })),
        )
            .into_response(),
        Err(error @ CycleError::PortalUnreachable(_)) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "portal_unreachable", "message": error.to_string() })),
        )
            .into_response(),
    }
}

/// GET /history?state=CC&documentType=NFe|NFCe — newest first.
pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<PairParams>,
) -> Response {
    let (jurisdiction, document_type) = match parse_pair(&params) {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    match state.monitor.history(&jurisdiction, document_type).await {
        Ok(records) => Json(records).into_response(),
        Err(error) => {
            tracing::error!(error = %error, "History query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal failure" })),
            )
                .into_response()
        }
    }
}

/// GET /freshness?state=CC&documentType=... — staleness predicate.
pub async fn freshness(
    State(state): State<AppState>,
    Query(params): Query<PairParams>,
) -> Response {
    let (jurisdiction, document_type) = match parse_pair(&params) {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    let stale = state.monitor.is_stale(&jurisdiction, document_type);
    let observed_at = state
        .monitor
        .latest(&jurisdiction, document_type)
        .map(|r| r.observed_at);

    Json(json!({
        "state": jurisdiction,
        "documentType": document_type,
        "stale": stale,
        "observedAt": observed_at,
    }))
    .into_response()
}
