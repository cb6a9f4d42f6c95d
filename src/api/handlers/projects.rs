//! Handlers for the `/api/projects` resource.

use axum::Json;
use axum::extract::{Path, Query, State, rejection::JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::handlers::SearchQuery;
use crate::api::request::ProjectSaveRequest;
use crate::api::response::{ApiFailure, EnvelopeFailure, ProjectSaveEnvelope};
use crate::api::state::AppState;
use crate::error::{EngineError, EngineResult};
use crate::models::{Project, ProjectSummary, SaveProject};

/// Handler for `POST /api/projects`.
///
/// Creates the project, or updates it in place when the request carries
/// the id of an existing one. The visit and implementation are written
/// together by the store.
pub async fn save(
    State(state): State<AppState>,
    payload: Result<Json<ProjectSaveRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let message = rejection.body_text();
            warn!(error = %message, "Malformed project save request");
            return EnvelopeFailure::bad_request(message).into_response();
        }
    };

    let input = match build_save(&state, request).await {
        Ok(input) => input,
        Err(error) => {
            warn!(%error, "Project save rejected");
            return EnvelopeFailure::from(error).into_response();
        }
    };

    match state.store().save_project(input).await {
        Ok(project) => {
            info!(
                project_id = %project.id,
                total_cost = %project.total_cost,
                "Project saved"
            );
            (
                StatusCode::CREATED,
                Json(ProjectSaveEnvelope {
                    success: true,
                    project_id: project.id,
                }),
            )
                .into_response()
        }
        Err(error) => {
            warn!(%error, "Project save failed");
            EnvelopeFailure::from(error).into_response()
        }
    }
}

/// Validates the request and resolves the client identity.
///
/// When a client id is given the company record fills in any missing
/// client name or PHC number; otherwise a client name is required.
async fn build_save(state: &AppState, request: ProjectSaveRequest) -> EngineResult<SaveProject> {
    let name = request.project_name.trim();
    if name.is_empty() {
        return Err(EngineError::validation("project name is required"));
    }

    let entered_name = request
        .client_name
        .filter(|client_name| !client_name.trim().is_empty());

    let (client_name, phc_id) = match request.client_id {
        Some(client_id) => {
            let company = state
                .store()
                .get_company(client_id)
                .await?
                .ok_or(EngineError::NotFound {
                    entity: "Company",
                    id: client_id,
                })?;
            (
                entered_name.unwrap_or(company.name),
                request.phc_id.or(company.phc_number),
            )
        }
        None => {
            let client_name =
                entered_name.ok_or_else(|| EngineError::validation("client name is required"))?;
            (client_name, request.phc_id)
        }
    };

    Ok(SaveProject {
        id: request.id,
        name: name.to_string(),
        company_id: request.client_id,
        client_name,
        phc_id,
        contact_name: request.contact_name,
        visit: request.visit.map(Into::into),
        implementation: request.implementation.into(),
    })
}

/// Handler for `GET /api/projects`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProjectSummary>>, ApiFailure> {
    let projects = state.store().list_projects(query.q.as_deref()).await?;
    Ok(Json(projects))
}

/// Handler for `GET /api/projects/{id}`.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, ApiFailure> {
    let project = state
        .store()
        .get_project(id)
        .await?
        .ok_or(EngineError::NotFound {
            entity: "Project",
            id,
        })?;
    Ok(Json(project))
}
