//! Record store abstraction.
//!
//! The engine reads and writes its records through the [`RecordStore`]
//! trait: a small filtered-read/CRUD query surface over the rate table,
//! the company register and saved projects. Handlers receive the store
//! as an injected `Arc<dyn RecordStore>`, so tests run against the
//! in-memory implementation with no database.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    Company, Contact, CreateCompany, CreateContact, CreateRateValue, Project, ProjectSummary,
    RateValue, SaveProject, UpdateCompany, UpdateContact, UpdateRateValue,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// The query surface the engine needs from its record store.
///
/// Rate invariant: at most one row per description is current. Both
/// implementations maintain this by retiring the previous current row
/// whenever a rate is created or updated, which also keeps the full
/// history queryable via [`rate_history`](RecordStore::rate_history)
/// and [`rates_as_of`](RecordStore::rates_as_of).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All rate rows where `is_current` is true.
    async fn current_rates(&self) -> EngineResult<Vec<RateValue>>;

    /// Current rate rows whose description is in the given list.
    async fn rates_by_descriptions(&self, descriptions: &[&str]) -> EngineResult<Vec<RateValue>>;

    /// Fetches one rate row by id.
    async fn rate_by_id(&self, id: Uuid) -> EngineResult<Option<RateValue>>;

    /// For each description, the rate row in effect at the given time.
    async fn rates_as_of(&self, at: DateTime<Utc>) -> EngineResult<Vec<RateValue>>;

    /// Every version of a rate, newest first.
    async fn rate_history(&self, description: &str) -> EngineResult<Vec<RateValue>>;

    /// Inserts a new current rate, retiring any current row with the
    /// same description.
    async fn create_rate(&self, input: CreateRateValue) -> EngineResult<RateValue>;

    /// Replaces a current rate row with an updated version, keeping the
    /// old row as history.
    async fn update_rate(&self, id: Uuid, input: UpdateRateValue) -> EngineResult<Option<RateValue>>;

    /// Deletes a rate row outright. Returns whether a row existed.
    async fn delete_rate(&self, id: Uuid) -> EngineResult<bool>;

    /// Companies, optionally filtered by a case-insensitive name search.
    async fn list_companies(&self, query: Option<&str>) -> EngineResult<Vec<Company>>;

    /// Fetches one company by id.
    async fn get_company(&self, id: Uuid) -> EngineResult<Option<Company>>;

    /// Registers a new company.
    async fn create_company(&self, input: CreateCompany) -> EngineResult<Company>;

    /// Applies the non-`None` fields of the update to a company.
    async fn update_company(&self, id: Uuid, input: UpdateCompany)
    -> EngineResult<Option<Company>>;

    /// Deletes a company and its contacts. Returns whether it existed.
    async fn delete_company(&self, id: Uuid) -> EngineResult<bool>;

    /// Contacts registered under a company.
    async fn list_contacts(&self, company_id: Uuid) -> EngineResult<Vec<Contact>>;

    /// Adds a contact to a company.
    async fn create_contact(&self, company_id: Uuid, input: CreateContact)
    -> EngineResult<Contact>;

    /// Applies the non-`None` fields of the update to a contact.
    async fn update_contact(&self, id: Uuid, input: UpdateContact)
    -> EngineResult<Option<Contact>>;

    /// Deletes a contact. Returns whether it existed.
    async fn delete_contact(&self, id: Uuid) -> EngineResult<bool>;

    /// Saves a project: creates it, or replaces the engagements of an
    /// existing project when the input carries its id. The project row
    /// and both engagements are written together.
    async fn save_project(&self, input: SaveProject) -> EngineResult<Project>;

    /// Fetches one project with its engagements.
    async fn get_project(&self, id: Uuid) -> EngineResult<Option<Project>>;

    /// Project summaries, newest first, optionally filtered by a
    /// case-insensitive search over project and client names.
    async fn list_projects(&self, query: Option<&str>) -> EngineResult<Vec<ProjectSummary>>;
}
