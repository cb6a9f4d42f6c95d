//! Distance lookup.
//!
//! Turns a destination postal code into driving kilometers from the
//! configured origin address. The provider is a convenience: its result
//! pre-fills the kilometers field and the user can always override it,
//! so every failure is soft — callers go through
//! [`kilometers_or_zero`] and never surface a provider error.

mod routes_client;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::warn;

use crate::error::EngineResult;

pub use routes_client::RoutesClient;

/// An external routing/geocoding provider.
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Driving distance in kilometers from the configured origin to the
    /// given postal code.
    async fn driving_kilometers(&self, postal_code: &str) -> EngineResult<Decimal>;
}

/// Resolves a postal code to kilometers, substituting zero on failure.
///
/// This is the only way the HTTP layer consumes the provider: a route
/// that cannot be resolved logs a warning and defaults to zero instead
/// of failing the request.
pub async fn kilometers_or_zero(provider: &dyn DistanceProvider, postal_code: &str) -> Decimal {
    match provider.driving_kilometers(postal_code).await {
        Ok(kilometers) => kilometers,
        Err(error) => {
            warn!(%error, postal_code, "Distance lookup failed, defaulting to zero");
            Decimal::ZERO
        }
    }
}

/// A provider that always answers with the same distance.
///
/// Used by the test suites in place of the network client.
pub struct FixedDistance(pub Decimal);

#[async_trait]
impl DistanceProvider for FixedDistance {
    async fn driving_kilometers(&self, _postal_code: &str) -> EngineResult<Decimal> {
        Ok(self.0)
    }
}

/// A provider that always fails.
///
/// Used by tests to exercise the soft-fail path.
pub struct UnavailableDistance;

#[async_trait]
impl DistanceProvider for UnavailableDistance {
    async fn driving_kilometers(&self, _postal_code: &str) -> EngineResult<Decimal> {
        Err(crate::error::EngineError::Provider {
            message: "provider unavailable".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_kilometers_or_zero_passes_through_success() {
        let provider = FixedDistance(Decimal::from_str("42.5").unwrap());
        let km = kilometers_or_zero(&provider, "2735-521").await;
        assert_eq!(km, Decimal::from_str("42.5").unwrap());
    }

    #[tokio::test]
    async fn test_kilometers_or_zero_swallows_failure() {
        let km = kilometers_or_zero(&UnavailableDistance, "2735-521").await;
        assert_eq!(km, Decimal::ZERO);
    }
}
