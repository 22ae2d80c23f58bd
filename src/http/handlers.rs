//! API route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::response::{bad_request, StatusBody};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::search::{RaceResult, SearchRequest};

/// Body of `POST /checkText`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckTextRequest {
    pub sites: Vec<String>,
    pub search_text: String,
}

impl From<CheckTextRequest> for SearchRequest {
    fn from(request: CheckTextRequest) -> Self {
        SearchRequest::new(request.sites, request.search_text)
    }
}

/// Race the given sites for the search text.
pub async fn check_text(
    State(state): State<AppState>,
    payload: Result<Json<CheckTextRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected malformed checkText body");
            metrics::record_request("/checkText", StatusCode::BAD_REQUEST.as_u16());
            return bad_request();
        }
    };

    if payload.search_text.is_empty() {
        tracing::warn!("Rejected checkText body with empty search_text");
        metrics::record_request("/checkText", StatusCode::BAD_REQUEST.as_u16());
        return bad_request();
    }

    tracing::debug!(sites = payload.sites.len(), "Starting race");

    let result = state.coordinator.race(payload.into()).await;
    let status = match result {
        RaceResult::Found(_) => StatusCode::OK,
        RaceResult::NotFound => StatusCode::NO_CONTENT,
    };
    metrics::record_request("/checkText", status.as_u16());

    result.into_response()
}

/// Liveness probe.
pub async fn check_health() -> Json<StatusBody> {
    Json(StatusBody::new("ok"))
}
