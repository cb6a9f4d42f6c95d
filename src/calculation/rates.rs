//! Rate table snapshot used by the cost functions.
//!
//! Handlers fetch the current rate rows from the record store once per
//! request and build a [`RateTable`] from them; the cost functions then
//! run as pure lookups against the snapshot, which keeps them
//! deterministic and free of I/O.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::RateValue;

/// Rate name: minimum charge for a short daytime call-out (≤ 1h).
pub const RATE_MINIMUM_DAY: &str = "minimum_day";
/// Rate name: daytime hourly increment.
pub const RATE_DAYTIME_HOUR: &str = "NHorasDiurnasVL";
/// Rate name: one daytime period (3–4h bracket).
pub const RATE_ONE_PERIOD_DAY: &str = "1periodoDia";
/// Rate name: a full working day (7h+ bracket).
pub const RATE_FULL_DAY: &str = "1Dia";
/// Rate name: minimum charge for a short nighttime call-out (≤ 1h).
pub const RATE_MINIMUM_NIGHT: &str = "minimum_night";
/// Rate name: nighttime hourly increment.
pub const RATE_NIGHTTIME_HOUR: &str = "NHorasNoturnaVL";
/// Rate name: price per driven kilometer.
pub const RATE_KILOMETER: &str = "KmVL";
/// Rate name: accommodation per person per night.
pub const RATE_ACCOMMODATION: &str = "EstadiaVL";
/// Rate name: price per meal.
pub const RATE_MEAL: &str = "NRefeicaoVL";

/// An in-memory snapshot of the current rate values, keyed by description.
///
/// # Example
///
/// ```
/// use cost_engine::calculation::{RateTable, RATE_KILOMETER};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = RateTable::from_pairs([(RATE_KILOMETER, Decimal::from_str("0.40").unwrap())]);
/// assert_eq!(
///     table.require(RATE_KILOMETER).unwrap(),
///     Decimal::from_str("0.40").unwrap()
/// );
/// assert!(table.require("EstadiaVL").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    values: HashMap<String, Decimal>,
}

impl RateTable {
    /// Builds a table from rate rows, keeping only current ones.
    pub fn new(rates: impl IntoIterator<Item = RateValue>) -> Self {
        let values = rates
            .into_iter()
            .filter(|rate| rate.is_current)
            .map(|rate| (rate.description, rate.value))
            .collect();
        Self { values }
    }

    /// Builds a table directly from `(description, value)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, Decimal)>) -> Self {
        let values = pairs
            .into_iter()
            .map(|(description, value)| (description.to_string(), value))
            .collect();
        Self { values }
    }

    /// Looks up a rate value by description.
    pub fn get(&self, description: &str) -> Option<Decimal> {
        self.values.get(description).copied()
    }

    /// Looks up a required rate, failing with [`EngineError::MissingRate`]
    /// when it is absent. Required rates are never defaulted to zero.
    pub fn require(&self, description: &str) -> EngineResult<Decimal> {
        self.get(description)
            .ok_or_else(|| EngineError::missing_rate(description))
    }

    /// Looks up a set of required rates at once.
    ///
    /// Returns the values in input order, or a single
    /// [`EngineError::MissingRate`] naming every absent description so the
    /// caller can report them all in one message.
    pub fn require_many<const N: usize>(
        &self,
        descriptions: [&str; N],
    ) -> EngineResult<[Decimal; N]> {
        let mut values = [Decimal::ZERO; N];
        let mut missing = Vec::new();

        for (slot, description) in values.iter_mut().zip(descriptions) {
            match self.get(description) {
                Some(value) => *slot = value,
                None => missing.push(description.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(values)
        } else {
            Err(EngineError::MissingRate {
                descriptions: missing,
            })
        }
    }

    /// Number of rates in the snapshot.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the snapshot holds no rates.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rate_row(description: &str, value: &str, is_current: bool) -> RateValue {
        RateValue {
            id: Uuid::new_v4(),
            description: description.to_string(),
            value: dec(value),
            currency: "EUR".to_string(),
            is_current,
            effective_from: Utc::now(),
        }
    }

    /// RT-001: current rows are kept, retired rows are not
    #[test]
    fn test_rt_001_only_current_rows_enter_the_table() {
        let table = RateTable::new(vec![
            rate_row(RATE_KILOMETER, "0.40", true),
            rate_row(RATE_KILOMETER, "0.35", false),
            rate_row(RATE_MEAL, "25.00", true),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(RATE_KILOMETER), Some(dec("0.40")));
        assert_eq!(table.get(RATE_MEAL), Some(dec("25.00")));
    }

    /// RT-002: require on a present rate returns its value
    #[test]
    fn test_rt_002_require_present_rate() {
        let table = RateTable::from_pairs([(RATE_MINIMUM_DAY, dec("100"))]);
        assert_eq!(table.require(RATE_MINIMUM_DAY).unwrap(), dec("100"));
    }

    /// RT-003: require on an absent rate names it
    #[test]
    fn test_rt_003_require_absent_rate_errors() {
        let table = RateTable::default();
        let err = table.require(RATE_ACCOMMODATION).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required rate values: EstadiaVL"
        );
    }

    /// RT-004: require_many reports every missing description at once
    #[test]
    fn test_rt_004_require_many_collects_all_missing() {
        let table = RateTable::from_pairs([(RATE_MINIMUM_DAY, dec("100"))]);

        let err = table
            .require_many([RATE_MINIMUM_DAY, RATE_DAYTIME_HOUR, RATE_FULL_DAY])
            .unwrap_err();

        match err {
            EngineError::MissingRate { descriptions } => {
                assert_eq!(descriptions, vec!["NHorasDiurnasVL", "1Dia"]);
            }
            other => panic!("Expected MissingRate, got {:?}", other),
        }
    }

    /// RT-005: require_many preserves input order
    #[test]
    fn test_rt_005_require_many_preserves_order() {
        let table = RateTable::from_pairs([
            (RATE_MINIMUM_DAY, dec("100")),
            (RATE_DAYTIME_HOUR, dec("50")),
        ]);

        let [minimum, hourly] = table
            .require_many([RATE_MINIMUM_DAY, RATE_DAYTIME_HOUR])
            .unwrap();
        assert_eq!(minimum, dec("100"));
        assert_eq!(hourly, dec("50"));
    }

    #[test]
    fn test_empty_table() {
        let table = RateTable::default();
        assert!(table.is_empty());
        assert_eq!(table.get(RATE_MEAL), None);
    }
}
