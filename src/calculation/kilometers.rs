//! Kilometers cost calculation.

use rust_decimal::Decimal;

use crate::error::EngineResult;

use super::rates::{RATE_KILOMETER, RateTable};

/// Calculates the travel cost: `kilometers × KmVL`.
///
/// When `kilometers` is zero or negative the cost is zero and no rate
/// lookup is performed, so a missing `KmVL` rate cannot fail a request
/// that does not bill distance.
///
/// # Example
///
/// ```
/// use cost_engine::calculation::{calculate_kilometers_cost, RateTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let rates = RateTable::from_pairs([("KmVL", dec("0.40"))]);
///
/// let cost = calculate_kilometers_cost(dec("20"), &rates).unwrap();
/// assert_eq!(cost, dec("8.00"));
/// ```
pub fn calculate_kilometers_cost(kilometers: Decimal, rates: &RateTable) -> EngineResult<Decimal> {
    if kilometers <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let km_rate = rates.require(RATE_KILOMETER)?;
    Ok(kilometers * km_rate)
}
