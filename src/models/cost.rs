//! Cost breakdown model.
//!
//! A [`CostBreakdown`] is the derived output of one engagement's cost
//! calculation. It is recomputed from scratch on every request and never
//! mutated in place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The structured result of a cost calculation.
///
/// `total_cost` is always the exact sum of the five components plus the
/// external service cost; currency rounding to two decimals is left to
/// the presentation layer.
///
/// Serialized with camelCase keys because this struct is the `data`
/// payload of the calculation endpoints.
///
/// # Example
///
/// ```
/// use cost_engine::models::CostBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let breakdown = CostBreakdown::new(
///     dec("450"),
///     dec("0"),
///     dec("8.00"),
///     dec("450"),
///     dec("200"),
///     dec("35"),
/// );
/// assert_eq!(breakdown.total_cost, dec("1143.00"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Cost of the daytime working hours.
    pub daytime_cost: Decimal,
    /// Cost of the nighttime working hours.
    pub nighttime_cost: Decimal,
    /// Cost of the driven kilometers.
    pub km_cost: Decimal,
    /// Cost of accommodation for the team.
    pub accommodation_cost: Decimal,
    /// Cost of meals across the stay.
    pub meals_cost: Decimal,
    /// Sum of all components plus the external service cost.
    pub total_cost: Decimal,
}

impl CostBreakdown {
    /// Builds a breakdown from its five components and the external
    /// service cost, deriving the total.
    pub fn new(
        daytime_cost: Decimal,
        nighttime_cost: Decimal,
        km_cost: Decimal,
        accommodation_cost: Decimal,
        meals_cost: Decimal,
        external_service_cost: Decimal,
    ) -> Self {
        let total_cost = daytime_cost
            + nighttime_cost
            + km_cost
            + accommodation_cost
            + meals_cost
            + external_service_cost;
        Self {
            daytime_cost,
            nighttime_cost,
            km_cost,
            accommodation_cost,
            meals_cost,
            total_cost,
        }
    }

    /// A breakdown with every component zero.
    pub fn zero() -> Self {
        Self::new(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
    }
}
