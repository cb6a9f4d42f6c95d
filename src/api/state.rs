//! Application state for the cost engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::distance::DistanceProvider;
use crate::store::RecordStore;

/// Shared application state.
///
/// Holds the injected record store and distance provider behind trait
/// objects, so handlers are testable against in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
    distance: Arc<dyn DistanceProvider>,
}

impl AppState {
    /// Creates a new application state with the given dependencies.
    pub fn new(store: Arc<dyn RecordStore>, distance: Arc<dyn DistanceProvider>) -> Self {
        Self { store, distance }
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Returns the distance provider.
    pub fn distance(&self) -> &dyn DistanceProvider {
        self.distance.as_ref()
    }
}
