//! Request types for the cost engine API.
//!
//! The calculation endpoints accept camelCase JSON with every field
//! optional — absent fields fall back to the same defaults the entry
//! form uses (one person, everything else zero). The implementation
//! endpoint additionally accepts the legacy `impl_*` field names older
//! clients still send.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CostBreakdown, Engagement, LocationType, TripParameters};

fn default_people() -> Decimal {
    Decimal::ONE
}

/// Request body for the technical-visit calculation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// Where the work takes place.
    #[serde(default)]
    pub location_type: LocationType,
    /// Number of working days.
    #[serde(default)]
    pub num_days: u32,
    /// Number of overnight stays.
    #[serde(default)]
    pub num_nights: u32,
    /// Number of people assigned, possibly fractional. Defaults to 1.
    #[serde(default = "default_people")]
    pub num_people: Decimal,
    /// Daytime working hours.
    #[serde(default)]
    pub daytime_hours: Decimal,
    /// Nighttime working hours.
    #[serde(default)]
    pub nighttime_hours: Decimal,
    /// Driving distance in kilometers.
    #[serde(default)]
    pub kilometers: Decimal,
    /// Whether accommodation is booked.
    #[serde(default)]
    pub has_accommodation: bool,
    /// Number of meals per person.
    #[serde(default)]
    pub num_meals: u32,
    /// Cost of subcontracted external services.
    #[serde(default)]
    pub external_service_cost: Decimal,
}

impl From<CalculationRequest> for TripParameters {
    fn from(req: CalculationRequest) -> Self {
        TripParameters {
            location_type: req.location_type,
            num_days: req.num_days,
            num_nights: req.num_nights,
            num_people: req.num_people,
            daytime_hours: req.daytime_hours,
            nighttime_hours: req.nighttime_hours,
            kilometers: req.kilometers,
            has_accommodation: req.has_accommodation,
            num_meals: req.num_meals,
            external_service_cost: req.external_service_cost,
        }
    }
}

/// Request body for the implementation calculation endpoint.
///
/// Same shape as [`CalculationRequest`] plus the legacy `impl_*` aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationRequest {
    /// Where the work takes place.
    #[serde(default)]
    pub location_type: LocationType,
    /// Number of working days.
    #[serde(default, alias = "impl_days")]
    pub num_days: u32,
    /// Number of overnight stays.
    #[serde(default, alias = "impl_nights")]
    pub num_nights: u32,
    /// Number of people assigned, possibly fractional. Defaults to 1.
    #[serde(default = "default_people", alias = "impl_people")]
    pub num_people: Decimal,
    /// Daytime working hours.
    #[serde(default, alias = "impl_day_hours")]
    pub daytime_hours: Decimal,
    /// Nighttime working hours.
    #[serde(default, alias = "impl_night_hours")]
    pub nighttime_hours: Decimal,
    /// Driving distance in kilometers.
    #[serde(default, alias = "impl_kilometers")]
    pub kilometers: Decimal,
    /// Whether accommodation is booked.
    #[serde(default, alias = "impl_accommodation")]
    pub has_accommodation: bool,
    /// Number of meals per person.
    #[serde(default, alias = "impl_meals")]
    pub num_meals: u32,
    /// Cost of subcontracted external services.
    #[serde(default, alias = "impl_external_service")]
    pub external_service_cost: Decimal,
}

impl From<ImplementationRequest> for TripParameters {
    fn from(req: ImplementationRequest) -> Self {
        TripParameters {
            location_type: req.location_type,
            num_days: req.num_days,
            num_nights: req.num_nights,
            num_people: req.num_people,
            daytime_hours: req.daytime_hours,
            nighttime_hours: req.nighttime_hours,
            kilometers: req.kilometers,
            has_accommodation: req.has_accommodation,
            num_meals: req.num_meals,
            external_service_cost: req.external_service_cost,
        }
    }
}

/// Request body for the kilometers-only calculation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KilometersRequest {
    /// Driving distance in kilometers.
    #[serde(default)]
    pub kilometers: Decimal,
}

/// Request body for the distance lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceRequest {
    /// Destination postal code.
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// One engagement inside a project save: the form inputs plus the
/// breakdown the calculation endpoint returned for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRequest {
    /// The form inputs.
    #[serde(flatten)]
    pub params: CalculationRequest,
    /// The computed cost breakdown.
    pub costs: CostBreakdown,
}

impl From<EngagementRequest> for Engagement {
    fn from(req: EngagementRequest) -> Self {
        Engagement {
            params: req.params.into(),
            costs: req.costs,
        }
    }
}

/// Request body for the project save endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSaveRequest {
    /// Existing project id; saving with a known id updates in place.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Project display name.
    pub project_name: String,
    /// The client company picked from the register, when any.
    #[serde(default)]
    pub client_id: Option<Uuid>,
    /// Client name as entered on the form. Falls back to the company
    /// name when a client id is given.
    #[serde(default)]
    pub client_name: Option<String>,
    /// The client's ERP reference number.
    #[serde(default)]
    pub phc_id: Option<String>,
    /// The contact person for this project.
    #[serde(default)]
    pub contact_name: Option<String>,
    /// The technical visit, when one was priced.
    #[serde(default)]
    pub visit: Option<EngagementRequest>,
    /// The implementation engagement.
    pub implementation: EngagementRequest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_calculation_request_defaults() {
        let request: CalculationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.num_people, Decimal::ONE);
        assert_eq!(request.num_days, 0);
        assert_eq!(request.kilometers, Decimal::ZERO);
        assert!(!request.has_accommodation);
    }

    #[test]
    fn test_calculation_request_camel_case() {
        let json = r#"{
            "locationType": "external",
            "numDays": 2,
            "numNights": 1,
            "numPeople": 2.5,
            "daytimeHours": 8,
            "nighttimeHours": 2,
            "kilometers": 20,
            "hasAccommodation": true,
            "numMeals": 2,
            "externalServiceCost": 35.5
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.location_type, LocationType::External);
        assert_eq!(request.num_people, dec("2.5"));
        assert_eq!(request.external_service_cost, dec("35.5"));
    }

    #[test]
    fn test_implementation_request_accepts_legacy_field_names() {
        let json = r#"{
            "impl_days": 3,
            "impl_nights": 2,
            "impl_people": 1.5,
            "impl_day_hours": 6,
            "impl_night_hours": 0,
            "impl_kilometers": 120,
            "impl_accommodation": true,
            "impl_meals": 4,
            "impl_external_service": 200
        }"#;

        let request: ImplementationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.num_days, 3);
        assert_eq!(request.num_people, dec("1.5"));
        assert_eq!(request.kilometers, dec("120"));
        assert!(request.has_accommodation);
    }

    #[test]
    fn test_implementation_request_accepts_current_field_names() {
        let json = r#"{"numDays": 2, "daytimeHours": 4}"#;
        let request: ImplementationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.num_days, 2);
        assert_eq!(request.daytime_hours, dec("4"));
    }

    #[test]
    fn test_project_save_request_nested_engagements() {
        let json = r#"{
            "projectName": "ERP rollout",
            "clientName": "Acme Lda",
            "implementation": {
                "numDays": 2,
                "numPeople": 2,
                "daytimeHours": 8,
                "costs": {
                    "daytimeCost": "1000",
                    "nighttimeCost": "0",
                    "kmCost": "0",
                    "accommodationCost": "0",
                    "mealsCost": "0",
                    "totalCost": "1000"
                }
            }
        }"#;

        let request: ProjectSaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.project_name, "ERP rollout");
        assert!(request.visit.is_none());
        assert_eq!(request.implementation.params.num_days, 2);
        assert_eq!(request.implementation.costs.total_cost, dec("1000"));

        let engagement: Engagement = request.implementation.into();
        assert_eq!(engagement.params.num_people, dec("2"));
    }
}
