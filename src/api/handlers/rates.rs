//! Handlers for the `/api/rates` resource.
//!
//! Rate edits never mutate a row in place: creating or updating retires
//! the previous current row for the description and inserts a new one,
//! so the admin screen keeps a history behind every value.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::api::response::ApiFailure;
use crate::api::state::AppState;
use crate::error::EngineError;
use crate::models::{CreateRateValue, RateValue, UpdateRateValue};

/// Query string for the rate listing.
#[derive(Debug, Default, Deserialize)]
pub struct RatesQuery {
    /// When set, lists the rates in effect at this instant instead of
    /// the current ones.
    pub as_of: Option<DateTime<Utc>>,
}

/// Handler for `GET /api/rates`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RatesQuery>,
) -> Result<Json<Vec<RateValue>>, ApiFailure> {
    let rates = match query.as_of {
        Some(at) => state.store().rates_as_of(at).await?,
        None => state.store().current_rates().await?,
    };
    Ok(Json(rates))
}

/// Handler for `GET /api/rates/{id}`.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RateValue>, ApiFailure> {
    let rate = state
        .store()
        .rate_by_id(id)
        .await?
        .ok_or(EngineError::NotFound {
            entity: "Rate",
            id,
        })?;
    Ok(Json(rate))
}

/// Handler for `GET /api/rates/history/{description}`.
pub async fn history(
    State(state): State<AppState>,
    Path(description): Path<String>,
) -> Result<Json<Vec<RateValue>>, ApiFailure> {
    let rates = state.store().rate_history(&description).await?;
    Ok(Json(rates))
}

/// Handler for `POST /api/rates`.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRateValue>,
) -> Result<(StatusCode, Json<RateValue>), ApiFailure> {
    if input.description.trim().is_empty() {
        return Err(EngineError::validation("rate description is required").into());
    }

    let rate = state.store().create_rate(input).await?;
    info!(description = %rate.description, value = %rate.value, "Rate created");
    Ok((StatusCode::CREATED, Json(rate)))
}

/// Handler for `PUT /api/rates/{id}`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateRateValue>,
) -> Result<Json<RateValue>, ApiFailure> {
    let rate = state
        .store()
        .update_rate(id, input)
        .await?
        .ok_or(EngineError::NotFound {
            entity: "Rate",
            id,
        })?;
    info!(description = %rate.description, value = %rate.value, "Rate updated");
    Ok(Json(rate))
}

/// Handler for `DELETE /api/rates/{id}`.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    if state.store().delete_rate(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(EngineError::NotFound {
            entity: "Rate",
            id,
        }
        .into())
    }
}
