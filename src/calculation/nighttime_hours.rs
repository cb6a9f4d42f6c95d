//! Nighttime-hours cost calculation.
//!
//! Nighttime work is priced from the minimum-night charge plus one
//! hourly increment per rounded hour beyond the first, capped at the
//! seven-hour bracket.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::EngineResult;

use super::rates::{RATE_MINIMUM_NIGHT, RATE_NIGHTTIME_HOUR, RateTable};

fn rounded_hours(hours: Decimal) -> i64 {
    hours
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

/// Returns the nighttime bracket cost for a single person.
///
/// The bracket table, by rounded hours:
///
/// | hours | cost |
/// |-------|------|
/// | ≤ 1   | `minimum_night` |
/// | 2     | `minimum_night` + 1 × `NHorasNoturnaVL` |
/// | 3     | `minimum_night` + 2 × `NHorasNoturnaVL` |
/// | 4     | `minimum_night` + 3 × `NHorasNoturnaVL` |
/// | 5     | `minimum_night` + 4 × `NHorasNoturnaVL` |
/// | 6     | `minimum_night` + 5 × `NHorasNoturnaVL` |
/// | ≥ 7   | `minimum_night` + 6 × `NHorasNoturnaVL` |
pub fn nighttime_bracket_cost(hours: Decimal, rates: &RateTable) -> EngineResult<Decimal> {
    let [minimum_night, hourly_increment] =
        rates.require_many([RATE_MINIMUM_NIGHT, RATE_NIGHTTIME_HOUR])?;

    let increments = match rounded_hours(hours) {
        h if h <= 1 => 0,
        h @ 2..=6 => h - 1,
        _ => 6,
    };

    Ok(minimum_night + hourly_increment * Decimal::from(increments))
}

/// Calculates the nighttime cost for a team: bracket cost multiplied by
/// the exact (possibly fractional) number of people.
pub fn calculate_nighttime_cost(
    hours: Decimal,
    num_people: Decimal,
    rates: &RateTable,
) -> EngineResult<Decimal> {
    Ok(nighttime_bracket_cost(hours, rates)? * num_people)
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
            (RATE_MINIMUM_NIGHT, dec("250")),
            (RATE_NIGHTTIME_HOUR, dec("75")),
        ])
    }

    /// NH-001: the full bracket table for one person
    #[test]
    fn test_nh_001_bracket_table() {
        let rates = test_rates();
        let cases = [
            ("0", "250"),
            ("1", "250"),
            ("2", "325"),
            ("3", "400"),
            ("4", "475"),
            ("5", "550"),
            ("6", "625"),
            ("7", "700"),
            ("8", "700"),
            ("12", "700"),
        ];

        for (hours, expected) in cases {
            let cost = nighttime_bracket_cost(dec(hours), &rates).unwrap();
            assert_eq!(cost, dec(expected), "hours = {hours}");
        }
    }

    /// NH-002: fractional hours round to the nearest bracket
    #[test]
    fn test_nh_002_fractional_hours_round() {
        let rates = test_rates();
        // 1.5 rounds away from zero to 2
        assert_eq!(
            nighttime_bracket_cost(dec("1.5"), &rates).unwrap(),
            dec("325")
        );
        // 6.4 rounds to 6
        assert_eq!(
            nighttime_bracket_cost(dec("6.4"), &rates).unwrap(),
            dec("625")
        );
    }

    /// NH-003: team cost scales by exact people count
    #[test]
    fn test_nh_003_people_multiplier() {
        let rates = test_rates();
        assert_eq!(
            calculate_nighttime_cost(dec("2"), dec("2"), &rates).unwrap(),
            dec("650")
        );
        assert_eq!(
            calculate_nighttime_cost(dec("1"), dec("1.5"), &rates).unwrap(),
            dec("375.0")
        );
    }

    /// NH-004: missing rates abort with every absent name
    #[test]
    fn test_nh_004_missing_rates_error() {
        let rates = RateTable::default();
        let err = nighttime_bracket_cost(dec("3"), &rates).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("minimum_night"));
        assert!(message.contains("NHorasNoturnaVL"));
    }
}
