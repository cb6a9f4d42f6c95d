//! In-memory record store.
//!
//! A [`RecordStore`] implementation backed by maps behind a single
//! `RwLock`. Used by the test suites so calculations and handlers run
//! deterministically without a database; the lock also makes the
//! multi-record project save trivially atomic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    Company, Contact, CreateCompany, CreateContact, CreateRateValue, Project, ProjectSummary,
    RateValue, SaveProject, UpdateCompany, UpdateContact, UpdateRateValue,
};

use super::RecordStore;

#[derive(Default)]
struct Inner {
    rates: Vec<RateValue>,
    companies: HashMap<Uuid, Company>,
    contacts: HashMap<Uuid, Contact>,
    projects: HashMap<Uuid, Project>,
}

/// An in-memory [`RecordStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the standard nine EUR rates the
    /// calculator needs, at their default values.
    pub fn with_default_rates() -> Self {
        // Values in cents.
        let defaults = [
            ("NHorasDiurnasVL", 50_00),
            ("NHorasNoturnaVL", 75_00),
            ("KmVL", 40),
            ("EstadiaVL", 150_00),
            ("NRefeicaoVL", 25_00),
            ("minimum_day", 100_00),
            ("1periodoDia", 250_00),
            ("1Dia", 500_00),
            ("minimum_night", 250_00),
        ];

        let now = Utc::now();
        let rates = defaults
            .into_iter()
            .map(|(description, cents)| RateValue {
                id: Uuid::new_v4(),
                description: description.to_string(),
                value: Decimal::new(cents, 2),
                currency: "EUR".to_string(),
                is_current: true,
                effective_from: now,
            })
            .collect();

        Self {
            inner: RwLock::new(Inner {
                rates,
                ..Inner::default()
            }),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn current_rates(&self) -> EngineResult<Vec<RateValue>> {
        let inner = self.inner.read().await;
        let mut rates: Vec<RateValue> = inner
            .rates
            .iter()
            .filter(|r| r.is_current)
            .cloned()
            .collect();
        rates.sort_by(|a, b| a.description.cmp(&b.description));
        Ok(rates)
    }

    async fn rates_by_descriptions(&self, descriptions: &[&str]) -> EngineResult<Vec<RateValue>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rates
            .iter()
            .filter(|r| r.is_current && descriptions.contains(&r.description.as_str()))
            .cloned()
            .collect())
    }

    async fn rate_by_id(&self, id: Uuid) -> EngineResult<Option<RateValue>> {
        let inner = self.inner.read().await;
        Ok(inner.rates.iter().find(|r| r.id == id).cloned())
    }

    async fn rates_as_of(&self, at: DateTime<Utc>) -> EngineResult<Vec<RateValue>> {
        let inner = self.inner.read().await;
        let mut latest: HashMap<&str, &RateValue> = HashMap::new();
        for rate in inner.rates.iter().filter(|r| r.effective_from <= at) {
            match latest.get(rate.description.as_str()) {
                Some(existing) if existing.effective_from > rate.effective_from => {}
                _ => {
                    latest.insert(rate.description.as_str(), rate);
                }
            }
        }
        let mut rates: Vec<RateValue> = latest.into_values().cloned().collect();
        rates.sort_by(|a, b| a.description.cmp(&b.description));
        Ok(rates)
    }

    async fn rate_history(&self, description: &str) -> EngineResult<Vec<RateValue>> {
        let inner = self.inner.read().await;
        let mut history: Vec<RateValue> = inner
            .rates
            .iter()
            .filter(|r| r.description == description)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.effective_from.cmp(&a.effective_from));
        Ok(history)
    }

    async fn create_rate(&self, input: CreateRateValue) -> EngineResult<RateValue> {
        let mut inner = self.inner.write().await;
        for rate in inner
            .rates
            .iter_mut()
            .filter(|r| r.description == input.description)
        {
            rate.is_current = false;
        }

        let rate = RateValue {
            id: Uuid::new_v4(),
            description: input.description,
            value: input.value,
            currency: input.currency,
            is_current: true,
            effective_from: Utc::now(),
        };
        inner.rates.push(rate.clone());
        Ok(rate)
    }

    async fn update_rate(
        &self,
        id: Uuid,
        input: UpdateRateValue,
    ) -> EngineResult<Option<RateValue>> {
        let mut inner = self.inner.write().await;
        let Some(previous) = inner.rates.iter().find(|r| r.id == id).cloned() else {
            return Ok(None);
        };

        let description = input.description.unwrap_or(previous.description);
        for rate in inner
            .rates
            .iter_mut()
            .filter(|r| r.description == description || r.id == id)
        {
            rate.is_current = false;
        }

        let rate = RateValue {
            id: Uuid::new_v4(),
            description,
            value: input.value.unwrap_or(previous.value),
            currency: input.currency.unwrap_or(previous.currency),
            is_current: true,
            effective_from: Utc::now(),
        };
        inner.rates.push(rate.clone());
        Ok(Some(rate))
    }

    async fn delete_rate(&self, id: Uuid) -> EngineResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.rates.len();
        inner.rates.retain(|r| r.id != id);
        Ok(inner.rates.len() < before)
    }

    async fn list_companies(&self, query: Option<&str>) -> EngineResult<Vec<Company>> {
        let inner = self.inner.read().await;
        let needle = query.map(str::to_lowercase);
        let mut companies: Vec<Company> = inner
            .companies
            .values()
            .filter(|c| match &needle {
                Some(needle) => c.name.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn get_company(&self, id: Uuid) -> EngineResult<Option<Company>> {
        let inner = self.inner.read().await;
        Ok(inner.companies.get(&id).cloned())
    }

    async fn create_company(&self, input: CreateCompany) -> EngineResult<Company> {
        let mut inner = self.inner.write().await;
        let company = Company {
            id: Uuid::new_v4(),
            name: input.name,
            phc_number: input.phc_number,
            address: input.address,
            postal_code: input.postal_code,
            created_at: Utc::now(),
        };
        inner.companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn update_company(
        &self,
        id: Uuid,
        input: UpdateCompany,
    ) -> EngineResult<Option<Company>> {
        let mut inner = self.inner.write().await;
        let Some(company) = inner.companies.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = input.name {
            company.name = name;
        }
        if let Some(phc_number) = input.phc_number {
            company.phc_number = Some(phc_number);
        }
        if let Some(address) = input.address {
            company.address = Some(address);
        }
        if let Some(postal_code) = input.postal_code {
            company.postal_code = Some(postal_code);
        }
        Ok(Some(company.clone()))
    }

    async fn delete_company(&self, id: Uuid) -> EngineResult<bool> {
        let mut inner = self.inner.write().await;
        inner.contacts.retain(|_, contact| contact.company_id != id);
        Ok(inner.companies.remove(&id).is_some())
    }

    async fn list_contacts(&self, company_id: Uuid) -> EngineResult<Vec<Contact>> {
        let inner = self.inner.read().await;
        let mut contacts: Vec<Contact> = inner
            .contacts
            .values()
            .filter(|c| c.company_id == company_id)
            .cloned()
            .collect();
        contacts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(contacts)
    }

    async fn create_contact(
        &self,
        company_id: Uuid,
        input: CreateContact,
    ) -> EngineResult<Contact> {
        let mut inner = self.inner.write().await;
        let contact = Contact {
            id: Uuid::new_v4(),
            company_id,
            name: input.name,
            email: input.email,
            phone: input.phone,
        };
        inner.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn update_contact(
        &self,
        id: Uuid,
        input: UpdateContact,
    ) -> EngineResult<Option<Contact>> {
        let mut inner = self.inner.write().await;
        let Some(contact) = inner.contacts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = input.name {
            contact.name = name;
        }
        if let Some(email) = input.email {
            contact.email = Some(email);
        }
        if let Some(phone) = input.phone {
            contact.phone = Some(phone);
        }
        Ok(Some(contact.clone()))
    }

    async fn delete_contact(&self, id: Uuid) -> EngineResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.contacts.remove(&id).is_some())
    }

    async fn save_project(&self, input: SaveProject) -> EngineResult<Project> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let id = input.id.unwrap_or_else(Uuid::new_v4);
        let created_at = inner
            .projects
            .get(&id)
            .map(|existing| existing.created_at)
            .unwrap_or(now);

        let total_cost = input.total_cost();
        let project = Project {
            id,
            name: input.name,
            company_id: input.company_id,
            client_name: input.client_name,
            phc_id: input.phc_id,
            contact_name: input.contact_name,
            visit: input.visit,
            implementation: input.implementation,
            total_cost,
            created_at,
            updated_at: now,
        };
        inner.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: Uuid) -> EngineResult<Option<Project>> {
        let inner = self.inner.read().await;
        Ok(inner.projects.get(&id).cloned())
    }

    async fn list_projects(&self, query: Option<&str>) -> EngineResult<Vec<ProjectSummary>> {
        let inner = self.inner.read().await;
        let needle = query.map(str::to_lowercase);
        let mut summaries: Vec<ProjectSummary> = inner
            .projects
            .values()
            .filter(|p| match &needle {
                Some(needle) => {
                    p.name.to_lowercase().contains(needle)
                        || p.client_name.to_lowercase().contains(needle)
                }
                None => true,
            })
            .map(|p| ProjectSummary {
                id: p.id,
                name: p.name.clone(),
                client_name: p.client_name.clone(),
                total_cost: p.total_cost,
                updated_at: p.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }
}
