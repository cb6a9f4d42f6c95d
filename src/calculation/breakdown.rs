//! Cost breakdown aggregation.
//!
//! [`compute_breakdown`] is the single entry point the HTTP handlers use:
//! it runs every component calculation against one rate snapshot and
//! assembles the [`CostBreakdown`]. Any missing required rate aborts the
//! whole computation; no partial breakdown is ever produced.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{CostBreakdown, TripParameters};

use super::accommodation::calculate_accommodation_cost;
use super::daytime_hours::calculate_daytime_cost;
use super::kilometers::calculate_kilometers_cost;
use super::meals::calculate_meals_cost;
use super::nighttime_hours::calculate_nighttime_cost;
use super::rates::RateTable;

/// Computes the full cost breakdown for one engagement.
///
/// The daytime and nighttime components are included only when the
/// corresponding hour input is positive; an engagement with no nighttime
/// hours is not billed the nighttime minimum. The kilometers,
/// accommodation and meals components carry their own zero-input rules.
///
/// # Example
///
/// ```
/// use cost_engine::calculation::{compute_breakdown, RateTable};
/// use cost_engine::models::TripParameters;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// let rates = RateTable::from_pairs([
///     ("minimum_day", dec("100")),
///     ("NHorasDiurnasVL", dec("50")),
///     ("1periodoDia", dec("250")),
///     ("1Dia", dec("500")),
///     ("KmVL", dec("0.40")),
/// ]);
///
/// let params = TripParameters {
///     num_days: 1,
///     num_people: dec("3"),
///     daytime_hours: dec("2"),
///     kilometers: dec("20"),
///     ..TripParameters::default()
/// };
///
/// let breakdown = compute_breakdown(&params, &rates).unwrap();
/// assert_eq!(breakdown.daytime_cost, dec("450"));
/// assert_eq!(breakdown.km_cost, dec("8.00"));
/// assert_eq!(breakdown.total_cost, dec("458.00"));
/// ```
pub fn compute_breakdown(
    params: &TripParameters,
    rates: &RateTable,
) -> EngineResult<CostBreakdown> {
    let daytime_cost = if params.daytime_hours > Decimal::ZERO {
        calculate_daytime_cost(params.daytime_hours, params.num_people, rates)?
    } else {
        Decimal::ZERO
    };

    let nighttime_cost = if params.nighttime_hours > Decimal::ZERO {
        calculate_nighttime_cost(params.nighttime_hours, params.num_people, rates)?
    } else {
        Decimal::ZERO
    };

    let km_cost = calculate_kilometers_cost(params.kilometers, rates)?;

    let accommodation_cost = calculate_accommodation_cost(
        params.has_accommodation,
        params.num_people,
        params.num_nights,
        rates,
    )?;

    let meals_cost = calculate_meals_cost(
        params.num_meals,
        params.num_people,
        params.num_days,
        params.num_nights,
        rates,
    )?;

    Ok(CostBreakdown::new(
        daytime_cost,
        nighttime_cost,
        km_cost,
        accommodation_cost,
        meals_cost,
        params.external_service_cost,
    ))
}
