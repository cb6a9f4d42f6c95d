//! Accommodation cost calculation.

use rust_decimal::Decimal;

use crate::error::EngineResult;

use super::rates::{RATE_ACCOMMODATION, RateTable};

/// Calculates the accommodation cost:
/// `EstadiaVL × ceil(num_people) × max(num_nights, 1)`.
///
/// Rooms are booked per whole person, so fractional headcounts round up.
/// When accommodation is requested with zero recorded nights, one night
/// is still billed.
///
/// Returns zero (and performs no rate lookup) when `has_accommodation`
/// is false.
///
/// # Example
///
/// ```
/// use cost_engine::calculation::{calculate_accommodation_cost, RateTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let rates = RateTable::from_pairs([("EstadiaVL", dec("150"))]);
///
/// // 2.5 people round up to 3; 0 nights bill as 1.
/// let cost = calculate_accommodation_cost(true, dec("2.5"), 0, &rates).unwrap();
/// assert_eq!(cost, dec("450"));
/// ```
pub fn calculate_accommodation_cost(
    has_accommodation: bool,
    num_people: Decimal,
    num_nights: u32,
    rates: &RateTable,
) -> EngineResult<Decimal> {
    if !has_accommodation {
        return Ok(Decimal::ZERO);
    }

    let accommodation_rate = rates.require(RATE_ACCOMMODATION)?;
    let billed_people = num_people.ceil();
    let billed_nights = Decimal::from(num_nights.max(1));

    Ok(accommodation_rate * billed_people * billed_nights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_rates() -> RateTable {
        RateTable::from_pairs([(RATE_ACCOMMODATION, dec("150"))])
    }

    /// AC-001: people round up, zero nights bill as one
    #[test]
    fn test_ac_001_ceil_people_minimum_one_night() {
        let rates = test_rates();
        assert_eq!(
            calculate_accommodation_cost(true, dec("2.5"), 0, &rates).unwrap(),
            dec("450")
        );
    }

    /// AC-002: whole people, several nights
    #[test]
    fn test_ac_002_whole_people_multiple_nights() {
        let rates = test_rates();
        assert_eq!(
            calculate_accommodation_cost(true, dec("2"), 3, &rates).unwrap(),
            dec("900")
        );
    }

    /// AC-003: no accommodation means no cost and no rate read
    #[test]
    fn test_ac_003_disabled_is_free() {
        let rates = RateTable::default();
        assert_eq!(
            calculate_accommodation_cost(false, dec("4"), 2, &rates).unwrap(),
            Decimal::ZERO
        );
    }

    /// AC-004: enabled with no rate errors
    #[test]
    fn test_ac_004_missing_rate_errors() {
        let rates = RateTable::default();
        let err = calculate_accommodation_cost(true, dec("1"), 1, &rates).unwrap_err();
        assert_eq!(err.to_string(), "Missing required rate values: EstadiaVL");
    }
}
