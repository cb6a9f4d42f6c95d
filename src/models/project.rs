//! Project model and DTOs.
//!
//! A project aggregates the client identity with the priced engagements:
//! an optional technical visit and the implementation itself. Saving a
//! project again with the same id replaces its engagements in place.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CostBreakdown, TripParameters};

/// One priced engagement: the raw inputs together with the derived costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    /// The parameters staff entered.
    pub params: TripParameters,
    /// The breakdown computed from the parameters and the rate table.
    pub costs: CostBreakdown,
}

/// A saved project with its engagements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier of the project.
    pub id: Uuid,
    /// Project display name.
    pub name: String,
    /// The client company, when picked from the company register.
    pub company_id: Option<Uuid>,
    /// Client name as entered on the form.
    pub client_name: String,
    /// The client's ERP reference number.
    pub phc_id: Option<String>,
    /// The contact person for this project.
    pub contact_name: Option<String>,
    /// The technical visit, when one was priced.
    pub visit: Option<Engagement>,
    /// The implementation engagement.
    pub implementation: Engagement,
    /// Sum of the engagement totals.
    pub total_cost: Decimal,
    /// When the project was first saved.
    pub created_at: DateTime<Utc>,
    /// When the project was last saved.
    pub updated_at: DateTime<Utc>,
}

/// Input for saving a project.
///
/// When `id` is `Some` and a project with that id exists, the save
/// updates it in place; otherwise a new project is created.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveProject {
    /// Existing project id, for updates.
    pub id: Option<Uuid>,
    /// Project display name.
    pub name: String,
    /// The client company, when picked from the company register.
    pub company_id: Option<Uuid>,
    /// Client name as entered on the form.
    pub client_name: String,
    /// The client's ERP reference number.
    pub phc_id: Option<String>,
    /// The contact person for this project.
    pub contact_name: Option<String>,
    /// The technical visit, when one was priced.
    pub visit: Option<Engagement>,
    /// The implementation engagement.
    pub implementation: Engagement,
}

impl SaveProject {
    /// The project-level total: the engagement totals summed.
    pub fn total_cost(&self) -> Decimal {
        let visit_total = self
            .visit
            .as_ref()
            .map(|e| e.costs.total_cost)
            .unwrap_or(Decimal::ZERO);
        visit_total + self.implementation.costs.total_cost
    }
}

/// A row in the project search listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Unique identifier of the project.
    pub id: Uuid,
    /// Project display name.
    pub name: String,
    /// Client name as entered on the form.
    pub client_name: String,
    /// Sum of the engagement totals.
    pub total_cost: Decimal,
    /// When the project was last saved.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn engagement_with_total(total: &str) -> Engagement {
        Engagement {
            params: TripParameters::default(),
            costs: CostBreakdown::new(
                dec(total),
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::ZERO,
            ),
        }
    }

    #[test]
    fn test_total_cost_sums_both_engagements() {
        let save = SaveProject {
            id: None,
            name: "ERP rollout".to_string(),
            company_id: None,
            client_name: "Acme Lda".to_string(),
            phc_id: Some("PHC-1042".to_string()),
            contact_name: None,
            visit: Some(engagement_with_total("450")),
            implementation: engagement_with_total("1250.50"),
        };

        assert_eq!(save.total_cost(), dec("1700.50"));
    }

    #[test]
    fn test_total_cost_without_visit() {
        let save = SaveProject {
            id: None,
            name: "ERP rollout".to_string(),
            company_id: None,
            client_name: "Acme Lda".to_string(),
            phc_id: None,
            contact_name: None,
            visit: None,
            implementation: engagement_with_total("1250.50"),
        };

        assert_eq!(save.total_cost(), dec("1250.50"));
    }
}
