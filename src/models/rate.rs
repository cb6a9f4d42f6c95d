//! Rate value model and DTOs.
//!
//! Rates are named, currency-denominated unit prices read by the cost
//! calculator. Each description has at most one current row at a time;
//! editing a rate retires the old row and inserts a fresh one, so the
//! full history stays queryable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named unit price from the `rate_values` table.
///
/// # Example
///
/// ```
/// use cost_engine::models::RateValue;
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let rate = RateValue {
///     id: Uuid::new_v4(),
///     description: "KmVL".to_string(),
///     value: Decimal::from_str("0.40").unwrap(),
///     currency: "EUR".to_string(),
///     is_current: true,
///     effective_from: Utc::now(),
/// };
/// assert!(rate.is_current);
/// ```
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct RateValue {
    /// Unique identifier of this rate row.
    pub id: Uuid,
    /// The rate name used as the lookup key (e.g. "NHorasDiurnasVL").
    pub description: String,
    /// The unit price.
    pub value: Decimal,
    /// ISO currency code (e.g. "EUR").
    pub currency: String,
    /// Whether this row is the active version of the rate.
    pub is_current: bool,
    /// When this row became the active version.
    pub effective_from: DateTime<Utc>,
}

/// DTO for creating a new rate value.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRateValue {
    /// The rate name used as the lookup key.
    pub description: String,
    /// The unit price.
    pub value: Decimal,
    /// ISO currency code. Defaults to EUR.
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// DTO for updating an existing rate value. All fields are optional.
///
/// An update retires the current row for the rate's description and
/// inserts a new current row, preserving history.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRateValue {
    /// New rate name, if changed.
    pub description: Option<String>,
    /// New unit price, if changed.
    pub value: Option<Decimal>,
    /// New currency code, if changed.
    pub currency: Option<String>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_rate_value_serialization() {
        let rate = RateValue {
            id: Uuid::nil(),
            description: "KmVL".to_string(),
            value: Decimal::from_str("0.40").unwrap(),
            currency: "EUR".to_string(),
            is_current: true,
            effective_from: DateTime::parse_from_rfc3339("2026-01-15T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let json = serde_json::to_string(&rate).unwrap();
        assert!(json.contains("\"description\":\"KmVL\""));
        assert!(json.contains("\"value\":\"0.40\""));
        assert!(json.contains("\"is_current\":true"));
    }

    #[test]
    fn test_create_rate_value_defaults_currency() {
        let json = r#"{"description": "minimum_day", "value": "100.00"}"#;
        let create: CreateRateValue = serde_json::from_str(json).unwrap();
        assert_eq!(create.description, "minimum_day");
        assert_eq!(create.value, Decimal::from_str("100.00").unwrap());
        assert_eq!(create.currency, "EUR");
    }

    #[test]
    fn test_update_rate_value_partial() {
        let json = r#"{"value": "0.45"}"#;
        let update: UpdateRateValue = serde_json::from_str(json).unwrap();
        assert!(update.description.is_none());
        assert_eq!(update.value, Some(Decimal::from_str("0.45").unwrap()));
        assert!(update.currency.is_none());
    }
}
