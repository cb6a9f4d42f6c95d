//! Google Routes API client.
//!
//! Calls the `computeRoutes` endpoint with a fixed origin address and a
//! destination built from the postal code, and reads the route length
//! from `routes[0].distanceMeters`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::DistanceConfig;
use crate::error::{EngineError, EngineResult};

use super::DistanceProvider;

/// A [`DistanceProvider`] backed by the Google Routes API.
pub struct RoutesClient {
    client: reqwest::Client,
    endpoint: String,
    origin_address: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RoutesResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    #[serde(rename = "distanceMeters")]
    distance_meters: i64,
}

impl RoutesClient {
    /// Builds a client from the distance configuration.
    ///
    /// The HTTP client carries a request timeout so a hanging provider
    /// degrades into the zero-kilometers fallback instead of stalling
    /// the request.
    pub fn new(config: &DistanceConfig, api_key: String) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::Provider {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            origin_address: config.origin_address.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl DistanceProvider for RoutesClient {
    async fn driving_kilometers(&self, postal_code: &str) -> EngineResult<Decimal> {
        if self.api_key.is_empty() {
            return Err(EngineError::Provider {
                message: "routes API key is not configured".to_string(),
            });
        }

        let destination = format!("{postal_code}, Portugal");
        let body = serde_json::json!({
            "origin": { "address": self.origin_address },
            "destination": { "address": destination },
            "travelMode": "DRIVE",
            "routingPreference": "TRAFFIC_AWARE",
            "computeAlternativeRoutes": false,
            "languageCode": "pt-PT",
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", "routes.distanceMeters")
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Provider {
                message: format!("routes request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Provider {
                message: format!("routes request returned {status}"),
            });
        }

        let payload: RoutesResponse =
            response.json().await.map_err(|e| EngineError::Provider {
                message: format!("routes response was not valid JSON: {e}"),
            })?;

        let meters = payload
            .routes
            .first()
            .map(|route| route.distance_meters)
            .ok_or_else(|| EngineError::Provider {
                message: format!("no route found for {postal_code}"),
            })?;

        let kilometers = (Decimal::from(meters) / Decimal::from(1000)).round_dp(1);
        debug!(postal_code, %kilometers, "Resolved driving distance");
        Ok(kilometers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_response_parses_distance() {
        let json = r#"{"routes": [{"distanceMeters": 12345}]}"#;
        let response: RoutesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.routes[0].distance_meters, 12345);
    }

    #[test]
    fn test_routes_response_tolerates_empty_body() {
        let response: RoutesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.routes.is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_is_a_provider_error() {
        let config = DistanceConfig::default();
        let client = RoutesClient::new(&config, String::new()).unwrap();
        let err = client.driving_kilometers("2735-521").await.unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }
}
