//! Company and contact models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A client company row from the `companies` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier of the company.
    pub id: Uuid,
    /// Company display name.
    pub name: String,
    /// The client's reference number in the organization's ERP.
    pub phc_number: Option<String>,
    /// Street address, used as the default destination for distance lookups.
    pub address: Option<String>,
    /// Postal code of the company's site.
    pub postal_code: Option<String>,
    /// When the company was registered.
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new company.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompany {
    /// Company display name.
    pub name: String,
    /// The client's ERP reference number.
    pub phc_number: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Postal code of the company's site.
    pub postal_code: Option<String>,
}

/// DTO for updating a company. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompany {
    /// New display name, if changed.
    pub name: Option<String>,
    /// New ERP reference number, if changed.
    pub phc_number: Option<String>,
    /// New street address, if changed.
    pub address: Option<String>,
    /// New postal code, if changed.
    pub postal_code: Option<String>,
}

/// A contact person row from the `contacts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier of the contact.
    pub id: Uuid,
    /// The company this contact belongs to.
    pub company_id: Uuid,
    /// Contact display name.
    pub name: String,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

/// DTO for creating a new contact under a company.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContact {
    /// Contact display name.
    pub name: String,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

/// DTO for updating a contact. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContact {
    /// New display name, if changed.
    pub name: Option<String>,
    /// New email address, if changed.
    pub email: Option<String>,
    /// New phone number, if changed.
    pub phone: Option<String>,
}
