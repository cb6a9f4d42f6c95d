//! HTTP API module for the cost engine.
//!
//! The calculation, distance and project-save endpoints speak the
//! `{ success, ... }` envelope; rates, companies and contacts are plain
//! REST resources.

mod handlers;
mod request;
mod response;
mod state;

use axum::Router;
use axum::routing::{get, post, put};

pub use request::{
    CalculationRequest, DistanceRequest, EngagementRequest, ImplementationRequest,
    KilometersRequest, ProjectSaveRequest,
};
pub use response::{ApiFailure, CalculationEnvelope, EnvelopeFailure};
pub use state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/calculations", post(handlers::calculations::technical_visit))
        .route(
            "/api/calculations/implementation",
            post(handlers::calculations::implementation),
        )
        .route(
            "/api/calculations/kilometers",
            post(handlers::calculations::kilometers),
        )
        .route(
            "/api/calculate-distance",
            post(handlers::distance::calculate_distance),
        )
        .route(
            "/api/projects",
            post(handlers::projects::save).get(handlers::projects::list),
        )
        .route("/api/projects/:id", get(handlers::projects::get_by_id))
        .route(
            "/api/rates",
            get(handlers::rates::list).post(handlers::rates::create),
        )
        .route(
            "/api/rates/:id",
            get(handlers::rates::get_by_id)
                .put(handlers::rates::update)
                .delete(handlers::rates::remove),
        )
        .route(
            "/api/rates/history/:description",
            get(handlers::rates::history),
        )
        .route(
            "/api/companies",
            get(handlers::companies::list).post(handlers::companies::create),
        )
        .route(
            "/api/companies/:id",
            get(handlers::companies::get_by_id)
                .put(handlers::companies::update)
                .delete(handlers::companies::remove),
        )
        .route(
            "/api/companies/:id/contacts",
            get(handlers::companies::list_contacts).post(handlers::companies::create_contact),
        )
        .route(
            "/api/contacts/:id",
            put(handlers::companies::update_contact).delete(handlers::companies::remove_contact),
        )
        .with_state(state)
}
