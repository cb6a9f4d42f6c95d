//! Handlers for the cost calculation endpoints.
//!
//! Each request fetches one snapshot of the current rates and runs the
//! pure calculator against it. A missing required rate aborts the whole
//! request with a message naming every absent rate; no partial
//! breakdown is ever returned.

use axum::extract::{State, rejection::JsonRejection};
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::request::{CalculationRequest, ImplementationRequest, KilometersRequest};
use crate::api::response::{CalculationEnvelope, EnvelopeFailure, KilometersEnvelope};
use crate::api::state::AppState;
use crate::calculation::{RATE_KILOMETER, RateTable, calculate_kilometers_cost, compute_breakdown};
use crate::models::TripParameters;

/// Handler for `POST /api/calculations` (technical visit).
pub async fn technical_visit(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return reject(correlation_id, rejection),
    };

    info!(
        correlation_id = %correlation_id,
        engagement = "technical_visit",
        "Processing calculation request"
    );
    calculate(correlation_id, &state, request.into()).await
}

/// Handler for `POST /api/calculations/implementation`.
///
/// Accepts both the current camelCase field names and the legacy
/// `impl_*` names.
pub async fn implementation(
    State(state): State<AppState>,
    payload: Result<Json<ImplementationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return reject(correlation_id, rejection),
    };

    info!(
        correlation_id = %correlation_id,
        engagement = "implementation",
        "Processing calculation request"
    );
    calculate(correlation_id, &state, request.into()).await
}

/// Handler for `POST /api/calculations/kilometers`.
///
/// A zero or negative distance answers immediately without touching the
/// rate table, so a missing `KmVL` rate cannot fail a request that does
/// not bill distance.
pub async fn kilometers(
    State(state): State<AppState>,
    payload: Result<Json<KilometersRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return reject(correlation_id, rejection),
    };

    if request.kilometers <= Decimal::ZERO {
        return Json(KilometersEnvelope {
            success: true,
            km_cost: Decimal::ZERO,
        })
        .into_response();
    }

    let rates = match state.store().rates_by_descriptions(&[RATE_KILOMETER]).await {
        Ok(rates) => rates,
        Err(error) => {
            warn!(correlation_id = %correlation_id, %error, "Rate fetch failed");
            return EnvelopeFailure::from(error).into_response();
        }
    };

    match calculate_kilometers_cost(request.kilometers, &RateTable::new(rates)) {
        Ok(km_cost) => {
            info!(
                correlation_id = %correlation_id,
                kilometers = %request.kilometers,
                %km_cost,
                "Kilometers calculation completed"
            );
            Json(KilometersEnvelope {
                success: true,
                km_cost,
            })
            .into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, %error, "Kilometers calculation failed");
            EnvelopeFailure::from(error).into_response()
        }
    }
}

/// Runs the breakdown for either engagement kind.
async fn calculate(correlation_id: Uuid, state: &AppState, params: TripParameters) -> Response {
    let rates = match state.store().current_rates().await {
        Ok(rates) => rates,
        Err(error) => {
            warn!(correlation_id = %correlation_id, %error, "Rate fetch failed");
            return EnvelopeFailure::from(error).into_response();
        }
    };

    match compute_breakdown(&params, &RateTable::new(rates)) {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                total_cost = %breakdown.total_cost,
                "Calculation completed successfully"
            );
            Json(CalculationEnvelope::new(breakdown)).into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, %error, "Calculation failed");
            EnvelopeFailure::from(error).into_response()
        }
    }
}

fn reject(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let message = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %message, "Malformed calculation request");
    EnvelopeFailure::bad_request(message).into_response()
}
