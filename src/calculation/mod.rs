//! Calculation logic for the cost engine.
//!
//! This module contains the rate table snapshot and all the cost
//! functions: daytime and nighttime bracket costs, kilometers,
//! accommodation, meals, and the breakdown aggregation that the HTTP
//! handlers call.

mod accommodation;
mod breakdown;
mod daytime_hours;
mod kilometers;
mod meals;
mod nighttime_hours;
mod rates;

pub use accommodation::calculate_accommodation_cost;
pub use breakdown::compute_breakdown;
pub use daytime_hours::{calculate_daytime_cost, daytime_bracket_cost};
pub use kilometers::calculate_kilometers_cost;
pub use meals::calculate_meals_cost;
pub use nighttime_hours::{calculate_nighttime_cost, nighttime_bracket_cost};
pub use rates::{
    RATE_ACCOMMODATION, RATE_DAYTIME_HOUR, RATE_FULL_DAY, RATE_KILOMETER, RATE_MEAL,
    RATE_MINIMUM_DAY, RATE_MINIMUM_NIGHT, RATE_NIGHTTIME_HOUR, RATE_ONE_PERIOD_DAY, RateTable,
};
