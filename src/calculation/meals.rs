//! Meals cost calculation.

use rust_decimal::Decimal;

use crate::error::EngineResult;

use super::rates::{RATE_MEAL, RateTable};

/// Calculates the meals cost:
/// `NRefeicaoVL × ceil(num_people) × num_meals × (num_days + num_nights)`.
///
/// Meals are charged per person-meal across the full stay (days plus
/// nights), with the headcount rounded up so fractional people are not
/// under-billed.
///
/// Returns zero (and performs no rate lookup) when `num_meals` is zero.
///
/// # Example
///
/// ```
/// use cost_engine::calculation::{calculate_meals_cost, RateTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let rates = RateTable::from_pairs([("NRefeicaoVL", dec("25"))]);
///
/// // 2 meals, 1.5 people (bills as 2), 1 day + 1 night: 25 × 2 × 2 × 2
/// let cost = calculate_meals_cost(2, dec("1.5"), 1, 1, &rates).unwrap();
/// assert_eq!(cost, dec("200"));
/// ```
pub fn calculate_meals_cost(
    num_meals: u32,
    num_people: Decimal,
    num_days: u32,
    num_nights: u32,
    rates: &RateTable,
) -> EngineResult<Decimal> {
    if num_meals == 0 {
        return Ok(Decimal::ZERO);
    }

    let meal_rate = rates.require(RATE_MEAL)?;
    let billed_people = num_people.ceil();
    let stay_length = Decimal::from(num_days + num_nights);

    Ok(meal_rate * billed_people * Decimal::from(num_meals) * stay_length)
}
