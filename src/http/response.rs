//! Response shaping and error mapping.
//!
//! # Responsibilities
//! - Map upstream, validation and storage failures to HTTP status codes
//! - Render every error as `{"detail": "..."}`
//! - Render best-effort click outcomes as a 200 body
//!
//! # Status Mapping
//! ```text
//! upstream timeout      → 408
//! upstream status N     → N
//! upstream unavailable  → 500
//! station not found     → 404
//! bad query / body      → 422
//! duplicate status id   → 409
//! other storage failure → 500
//! ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::radio::{ClickOutcome, QueryError};
use crate::status::StoreError;
use crate::upstream::UpstreamError;

/// Error returned by any API handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Station not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream(UpstreamError::Timeout) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Upstream(UpstreamError::Status { status }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Upstream(UpstreamError::Unavailable { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(StoreError::Duplicate { .. }) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::Upstream(UpstreamError::Timeout) => "Radio API timeout".to_string(),
            ApiError::Upstream(UpstreamError::Status { status }) => {
                format!("Radio API error: {}", status)
            }
            ApiError::Upstream(UpstreamError::Unavailable { message }) => {
                format!("Radio API error: {}", message)
            }
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        (status, Json(ErrorBody { detail: self.detail() })).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::Validation(e.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Validation(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::Validation(e.body_text())
    }
}

/// Plain `{"message": ...}` body.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// Body of a click registration; always sent with 200.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ClickReceipt {
    pub registered: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ClickOutcome> for ClickReceipt {
    fn from(outcome: ClickOutcome) -> Self {
        match outcome {
            ClickOutcome::Registered => ClickReceipt {
                registered: true,
                message: "Click registered successfully",
                error: None,
            },
            ClickOutcome::Failed { error } => ClickReceipt {
                registered: false,
                message: "Click registration failed",
                error: Some(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Upstream(UpstreamError::Timeout), 408),
            (ApiError::Upstream(UpstreamError::Status { status: 503 }), 503),
            (ApiError::Upstream(UpstreamError::Status { status: 429 }), 429),
            (ApiError::Upstream(UpstreamError::Unavailable { message: "dns".into() }), 500),
            (ApiError::NotFound, 404),
            (ApiError::Validation("limit".into()), 422),
            (ApiError::Store(StoreError::Duplicate { id: Uuid::nil() }), 409),
        ];
        for (error, expected) in cases {
            assert_eq!(error.status().as_u16(), expected, "{:?}", error);
        }
    }

    #[test]
    fn test_details() {
        assert_eq!(ApiError::Upstream(UpstreamError::Timeout).detail(), "Radio API timeout");
        assert_eq!(
            ApiError::Upstream(UpstreamError::Status { status: 502 }).detail(),
            "Radio API error: 502"
        );
        assert_eq!(ApiError::NotFound.detail(), "Station not found");
    }

    #[test]
    fn test_click_receipt() {
        let ok = ClickReceipt::from(ClickOutcome::Registered);
        assert!(ok.registered);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"registered": true, "message": "Click registered successfully"})
        );

        let failed = ClickReceipt::from(ClickOutcome::Failed { error: "upstream timeout".into() });
        assert!(!failed.registered);
        assert_eq!(failed.error.as_deref(), Some("upstream timeout"));
    }
}
