//! Trip parameter model.
//!
//! A [`TripParameters`] captures everything staff enter for one billable
//! engagement (a technical visit or an implementation). It is built per
//! request and never persisted on its own; only the project save writes
//! the raw inputs together with the derived cost breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the work takes place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    /// Work performed at the organization's own premises.
    #[default]
    Internal,
    /// Work performed at the client's site.
    External,
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationType::Internal => write!(f, "internal"),
            LocationType::External => write!(f, "external"),
        }
    }
}

impl FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(LocationType::Internal),
            "external" => Ok(LocationType::External),
            other => Err(format!("unknown location type: {other}")),
        }
    }
}

/// The inputs of one engagement's cost calculation.
///
/// `num_people` may be fractional (staff enter half-people for shared
/// allocations, e.g. 0.5 or 2.5); hour and kilometer inputs are kept as
/// decimals as well so the calculator owns all rounding policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripParameters {
    /// Where the work takes place.
    #[serde(default)]
    pub location_type: LocationType,
    /// Number of working days.
    pub num_days: u32,
    /// Number of overnight stays.
    pub num_nights: u32,
    /// Number of people assigned, possibly fractional.
    pub num_people: Decimal,
    /// Daytime working hours per day.
    pub daytime_hours: Decimal,
    /// Nighttime working hours per night.
    pub nighttime_hours: Decimal,
    /// Driving distance to the site in kilometers.
    pub kilometers: Decimal,
    /// Whether accommodation is booked for the team.
    pub has_accommodation: bool,
    /// Number of meals per person.
    pub num_meals: u32,
    /// Cost of subcontracted external services, added to the total as-is.
    pub external_service_cost: Decimal,
}

impl Default for TripParameters {
    fn default() -> Self {
        Self {
            location_type: LocationType::Internal,
            num_days: 0,
            num_nights: 0,
            num_people: Decimal::ONE,
            daytime_hours: Decimal::ZERO,
            nighttime_hours: Decimal::ZERO,
            kilometers: Decimal::ZERO,
            has_accommodation: false,
            num_meals: 0,
            external_service_cost: Decimal::ZERO,
        }
    }
}
