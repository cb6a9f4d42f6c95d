//! Response types for the cost engine API.
//!
//! Two response families live here. The calculation-style endpoints
//! speak the `{ success, ... }` envelope; the CRUD resources are plain
//! REST and answer failures with an `{ error: { code, message } }`
//! body. Both map [`EngineError`] onto HTTP statuses the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::EngineError;
use crate::models::CostBreakdown;

/// Envelope for a successful cost calculation:
/// `{ "success": true, "data": { ... } }`.
#[derive(Debug, Serialize)]
pub struct CalculationEnvelope {
    /// Always true on this variant.
    pub success: bool,
    /// The computed breakdown.
    pub data: CostBreakdown,
}

impl CalculationEnvelope {
    /// Wraps a breakdown in the success envelope.
    pub fn new(data: CostBreakdown) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Envelope for the kilometers-only endpoint:
/// `{ "success": true, "kmCost": "8.00" }`.
#[derive(Debug, Serialize)]
pub struct KilometersEnvelope {
    /// Always true on this variant.
    pub success: bool,
    /// The computed kilometers cost.
    #[serde(rename = "kmCost")]
    pub km_cost: rust_decimal::Decimal,
}

/// Envelope for a successful project save:
/// `{ "success": true, "projectId": "..." }`.
#[derive(Debug, Serialize)]
pub struct ProjectSaveEnvelope {
    /// Always true on this variant.
    pub success: bool,
    /// The id of the created or updated project.
    #[serde(rename = "projectId")]
    pub project_id: uuid::Uuid,
}

/// Response of the distance lookup endpoint.
///
/// Carries the resolved distance under both keys older clients read.
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    /// Driving distance in kilometers.
    pub distance: rust_decimal::Decimal,
    /// The same value under the key newer clients read.
    pub kilometers: rust_decimal::Decimal,
}

/// A failure on an envelope endpoint: `{ "success": false, "error": "..." }`.
#[derive(Debug)]
pub struct EnvelopeFailure {
    /// The HTTP status.
    pub status: StatusCode,
    /// The user-facing error message.
    pub error: String,
}

impl EnvelopeFailure {
    /// A 400 envelope failure.
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
        }
    }
}

impl IntoResponse for EnvelopeFailure {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "success": false, "error": self.error })),
        )
            .into_response()
    }
}

impl From<EngineError> for EnvelopeFailure {
    fn from(error: EngineError) -> Self {
        let (status, _code) = status_and_code(&error);
        Self {
            status,
            error: error.to_string(),
        }
    }
}

/// A failure on a REST resource: `{ "error": { "code", "message" } }`.
#[derive(Debug)]
pub struct ApiFailure {
    /// The HTTP status.
    pub status: StatusCode,
    /// Error code for programmatic handling.
    pub code: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "error": { "code": self.code, "message": self.message } })),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiFailure {
    fn from(error: EngineError) -> Self {
        let (status, code) = status_and_code(&error);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(%error, "Request failed");
        }
        Self {
            status,
            code,
            message: error.to_string(),
        }
    }
}

/// Maps an engine error onto its HTTP status and error code.
fn status_and_code(error: &EngineError) -> (StatusCode, &'static str) {
    match error {
        EngineError::MissingRate { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "MISSING_RATE"),
        EngineError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        EngineError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        EngineError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
        EngineError::Provider { .. } => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
        EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
        }
    }
}
