//! Daytime-hours cost calculation.
//!
//! Daytime work is priced from a bracket table keyed by the hour count
//! rounded to the nearest whole hour, not linearly: short call-outs pay a
//! minimum, mid-length visits pay per period, and anything from seven
//! hours up pays the full-day rate.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;

use crate::error::EngineResult;

use super::rates::{
    RATE_DAYTIME_HOUR, RATE_FULL_DAY, RATE_MINIMUM_DAY, RATE_ONE_PERIOD_DAY, RateTable,
};

/// Rounds an hour input to the nearest whole hour, halves away from zero.
fn rounded_hours(hours: Decimal) -> i64 {
    hours
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

/// Returns the daytime bracket cost for a single person.
///
/// The bracket table, by rounded hours:
///
/// | hours | cost |
/// |-------|------|
/// | ≤ 1   | `minimum_day` |
/// | 2     | `minimum_day` + `NHorasDiurnasVL` |
/// | 3–4   | `1periodoDia` |
/// | 5     | `1periodoDia` + `NHorasDiurnasVL` |
/// | 6     | `1periodoDia` + 2 × `NHorasDiurnasVL` |
/// | ≥ 7   | `1Dia` |
///
/// # Errors
///
/// Fails with [`EngineError::MissingRate`](crate::error::EngineError)
/// naming every absent rate when any of the four daytime rates is not in
/// the table.
pub fn daytime_bracket_cost(hours: Decimal, rates: &RateTable) -> EngineResult<Decimal> {
    let [minimum_day, hourly_increment, one_period, full_day] = rates.require_many([
        RATE_MINIMUM_DAY,
        RATE_DAYTIME_HOUR,
        RATE_ONE_PERIOD_DAY,
        RATE_FULL_DAY,
    ])?;

    let cost = match rounded_hours(hours) {
        h if h <= 1 => minimum_day,
        2 => minimum_day + hourly_increment,
        3 | 4 => one_period,
        5 => one_period + hourly_increment,
        6 => one_period + hourly_increment * Decimal::TWO,
        _ => full_day,
    };

    Ok(cost)
}

/// Calculates the daytime cost for a team.
///
/// The bracket cost is multiplied by the exact (possibly fractional)
/// number of people.
///
/// # Example
///
/// ```
/// use cost_engine::calculation::{calculate_daytime_cost, RateTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let rates = RateTable::from_pairs([
///     ("minimum_day", dec("100")),
///     ("NHorasDiurnasVL", dec("50")),
///     ("1periodoDia", dec("250")),
///     ("1Dia", dec("500")),
/// ]);
///
/// // 2 hours, 3 people: (100 + 50) × 3
/// let cost = calculate_daytime_cost(dec("2"), dec("3"), &rates).unwrap();
/// assert_eq!(cost, dec("450"));
/// ```
pub fn calculate_daytime_cost(
    hours: Decimal,
    num_people: Decimal,
    rates: &RateTable,
) -> EngineResult<Decimal> {
    Ok(daytime_bracket_cost(hours, rates)? * num_people)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_rates() -> RateTable {
        RateTable::from_pairs([
            (RATE_MINIMUM_DAY, dec("100")),
            (RATE_DAYTIME_HOUR, dec("50")),
            (RATE_ONE_PERIOD_DAY, dec("250")),
            (RATE_FULL_DAY, dec("500")),
        ])
    }

    /// DH-001: the full bracket table for one person
    #[test]
    fn test_dh_001_bracket_table() {
        let rates = test_rates();
        let cases = [
            ("0", "100"),
            ("1", "100"),
            ("2", "150"),
            ("3", "250"),
            ("4", "250"),
            ("5", "300"),
            ("6", "350"),
            ("7", "500"),
            ("8", "500"),
            ("12", "500"),
        ];

        for (hours, expected) in cases {
            let cost = daytime_bracket_cost(dec(hours), &rates).unwrap();
            assert_eq!(cost, dec(expected), "hours = {hours}");
        }
    }

    /// DH-002: fractional hours round to the nearest bracket
    #[test]
    fn test_dh_002_fractional_hours_round() {
        let rates = test_rates();
        // 2.5 rounds away from zero to 3 -> one period
        assert_eq!(daytime_bracket_cost(dec("2.5"), &rates).unwrap(), dec("250"));
        // 1.4 rounds to 1 -> minimum
        assert_eq!(daytime_bracket_cost(dec("1.4"), &rates).unwrap(), dec("100"));
        // 6.6 rounds to 7 -> full day
        assert_eq!(daytime_bracket_cost(dec("6.6"), &rates).unwrap(), dec("500"));
    }

    /// DH-003: team cost scales by exact people count
    #[test]
    fn test_dh_003_people_multiplier() {
        let rates = test_rates();
        // Worked example from the rate table: 2h, 3 people
        assert_eq!(
            calculate_daytime_cost(dec("2"), dec("3"), &rates).unwrap(),
            dec("450")
        );
        // Fractional people are billed exactly, not rounded
        assert_eq!(
            calculate_daytime_cost(dec("8"), dec("0.5"), &rates).unwrap(),
            dec("250.0")
        );
    }

    /// DH-004: missing rates abort with every absent name
    #[test]
    fn test_dh_004_missing_rates_error() {
        let rates = RateTable::from_pairs([(RATE_MINIMUM_DAY, dec("100"))]);
        let err = daytime_bracket_cost(dec("3"), &rates).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("NHorasDiurnasVL"));
        assert!(message.contains("1periodoDia"));
        assert!(message.contains("1Dia"));
    }

    #[test]
    fn test_same_inputs_same_output() {
        let rates = test_rates();
        let first = calculate_daytime_cost(dec("5"), dec("2.5"), &rates).unwrap();
        let second = calculate_daytime_cost(dec("5"), dec("2.5"), &rates).unwrap();
        assert_eq!(first, second);
    }
}
