//! HTTP request handlers, grouped by resource.

pub mod calculations;
pub mod companies;
pub mod distance;
pub mod projects;
pub mod rates;

use serde::Deserialize;

/// Query string for list endpoints with a free-text search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring to filter by.
    pub q: Option<String>,
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
