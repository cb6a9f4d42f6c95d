//! Handlers for the `/api/companies` resource and its nested contacts.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::info;
use uuid::Uuid;

use crate::api::handlers::SearchQuery;
use crate::api::response::ApiFailure;
use crate::api::state::AppState;
use crate::error::EngineError;
use crate::models::{
    Company, Contact, CreateCompany, CreateContact, UpdateCompany, UpdateContact,
};

/// Handler for `GET /api/companies`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Company>>, ApiFailure> {
    let companies = state.store().list_companies(query.q.as_deref()).await?;
    Ok(Json(companies))
}

/// Handler for `GET /api/companies/{id}`.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>, ApiFailure> {
    let company = state
        .store()
        .get_company(id)
        .await?
        .ok_or(EngineError::NotFound {
            entity: "Company",
            id,
        })?;
    Ok(Json(company))
}

/// Handler for `POST /api/companies`.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCompany>,
) -> Result<(StatusCode, Json<Company>), ApiFailure> {
    if input.name.trim().is_empty() {
        return Err(EngineError::validation("company name is required").into());
    }

    let company = state.store().create_company(input).await?;
    info!(company_id = %company.id, name = %company.name, "Company created");
    Ok((StatusCode::CREATED, Json(company)))
}

/// Handler for `PUT /api/companies/{id}`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCompany>,
) -> Result<Json<Company>, ApiFailure> {
    let company = state
        .store()
        .update_company(id, input)
        .await?
        .ok_or(EngineError::NotFound {
            entity: "Company",
            id,
        })?;
    Ok(Json(company))
}

/// Handler for `DELETE /api/companies/{id}`.
///
/// Also removes the company's contacts.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    if state.store().delete_company(id).await? {
        info!(company_id = %id, "Company deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(EngineError::NotFound {
            entity: "Company",
            id,
        }
        .into())
    }
}

/// Handler for `GET /api/companies/{id}/contacts`.
pub async fn list_contacts(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<Contact>>, ApiFailure> {
    let contacts = state.store().list_contacts(company_id).await?;
    Ok(Json(contacts))
}

/// Handler for `POST /api/companies/{id}/contacts`.
pub async fn create_contact(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(input): Json<CreateContact>,
) -> Result<(StatusCode, Json<Contact>), ApiFailure> {
    if input.name.trim().is_empty() {
        return Err(EngineError::validation("contact name is required").into());
    }

    // The company must exist before a contact can hang off it.
    state
        .store()
        .get_company(company_id)
        .await?
        .ok_or(EngineError::NotFound {
            entity: "Company",
            id: company_id,
        })?;

    let contact = state.store().create_contact(company_id, input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// Handler for `PUT /api/contacts/{id}`.
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateContact>,
) -> Result<Json<Contact>, ApiFailure> {
    let contact = state
        .store()
        .update_contact(id, input)
        .await?
        .ok_or(EngineError::NotFound {
            entity: "Contact",
            id,
        })?;
    Ok(Json(contact))
}

/// Handler for `DELETE /api/contacts/{id}`.
pub async fn remove_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    if state.store().delete_contact(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(EngineError::NotFound {
            entity: "Contact",
            id,
        }
        .into())
    }
}
