//! Response bodies and status mapping.
//!
//! # Responsibilities
//! - Map a race result to 200 + winner or 204 with no body
//! - Fixed JSON bodies for health and malformed input
//!
//! # Design Decisions
//! - `FoundAtSite` casing is part of the public wire format
//! - Per-site failures never reach a response

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::search::RaceResult;

/// Body of a successful `/checkText` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundResponse {
    #[serde(rename = "FoundAtSite")]
    pub found_at_site: String,
}

/// `{"status": "..."}` body used by health and error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

impl StatusBody {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

/// 400 with `{"status": "bad request"}`.
pub fn bad_request() -> Response {
    (StatusCode::BAD_REQUEST, Json(StatusBody::new("bad request"))).into_response()
}

impl IntoResponse for RaceResult {
    fn into_response(self) -> Response {
        match self {
            RaceResult::Found(found_at_site) => {
                (StatusCode::OK, Json(FoundResponse { found_at_site })).into_response()
            }
            RaceResult::NotFound => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
