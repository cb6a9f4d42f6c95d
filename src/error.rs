//! Error types for the project cost engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing costs or
//! reading and writing records.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the cost engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use cost_engine::error::EngineError;
///
/// let error = EngineError::MissingRate {
///     descriptions: vec!["KmVL".to_string()],
/// };
/// assert_eq!(error.to_string(), "Missing required rate values: KmVL");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// One or more required rates were absent from the record store.
    ///
    /// Callers must never substitute zero for a required rate; the whole
    /// calculation is aborted instead.
    #[error("Missing required rate values: {}", descriptions.join(", "))]
    MissingRate {
        /// Every rate description that was required but not found.
        descriptions: Vec<String>,
    },

    /// A request carried absent or invalid required fields.
    #[error("Validation error: {message}")]
    Validation {
        /// A user-facing description of what was invalid.
        message: String,
    },

    /// A record with the given id does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was looked up (e.g. "Project").
        entity: &'static str,
        /// The id that was not found.
        id: Uuid,
    },

    /// The record store failed to execute a query.
    #[error("Record store error: {0}")]
    Store(#[from] sqlx::Error),

    /// The distance provider failed or returned no usable route.
    ///
    /// Recovered locally by substituting zero kilometers; this variant
    /// never reaches an HTTP response from the calculation endpoints.
    #[error("Distance provider error: {message}")]
    Provider {
        /// A description of the provider failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::MissingRate`] for a single description.
    pub fn missing_rate(description: impl Into<String>) -> Self {
        EngineError::MissingRate {
            descriptions: vec![description.into()],
        }
    }

    /// Builds a [`EngineError::Validation`] from a message.
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_rate_displays_all_descriptions() {
        let error = EngineError::MissingRate {
            descriptions: vec!["minimum_day".to_string(), "1Dia".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Missing required rate values: minimum_day, 1Dia"
        );
    }

    #[test]
    fn test_missing_rate_helper_builds_single_entry() {
        let error = EngineError::missing_rate("EstadiaVL");
        assert_eq!(error.to_string(), "Missing required rate values: EstadiaVL");
    }

    #[test]
    fn test_validation_displays_message() {
        let error = EngineError::validation("project name is required");
        assert_eq!(
            error.to_string(),
            "Validation error: project name is required"
        );
    }

    #[test]
    fn test_not_found_displays_entity_and_id() {
        let id = Uuid::nil();
        let error = EngineError::NotFound {
            entity: "Project",
            id,
        };
        assert_eq!(
            error.to_string(),
            "Project not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_provider_displays_message() {
        let error = EngineError::Provider {
            message: "no route found".to_string(),
        };
        assert_eq!(error.to_string(), "Distance provider error: no route found");
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_rate() -> EngineResult<()> {
            Err(EngineError::missing_rate("KmVL"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_rate()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
