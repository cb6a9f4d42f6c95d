//! Handler for the distance lookup endpoint.

use axum::extract::{State, rejection::JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::info;

use crate::api::request::DistanceRequest;
use crate::api::response::DistanceResponse;
use crate::api::state::AppState;
use crate::distance::kilometers_or_zero;

/// Handler for `POST /api/calculate-distance`.
///
/// Resolves a postal code to driving kilometers. Provider failures are
/// soft: the response is a successful zero-kilometer answer the user can
/// override by hand. Only a missing postal code is a client error.
pub async fn calculate_distance(
    State(state): State<AppState>,
    payload: Result<Json<DistanceRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let postal_code = match request.postal_code.as_deref().map(str::trim) {
        Some(postal_code) if !postal_code.is_empty() => postal_code.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Postal code is required" })),
            )
                .into_response();
        }
    };

    let kilometers = kilometers_or_zero(state.distance(), &postal_code).await;
    info!(postal_code, %kilometers, "Distance lookup completed");

    Json(DistanceResponse {
        distance: kilometers,
        kilometers,
    })
    .into_response()
}
