//! Postgres record store.
//!
//! A [`RecordStore`] implementation over sqlx. Multi-row writes (rate
//! replacement, company deletion, project save) run inside a single
//! transaction so the visit and implementation of a project can never be
//! persisted half-way.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    Company, Contact, CostBreakdown, CreateCompany, CreateContact, CreateRateValue, Engagement,
    Project, ProjectSummary, RateValue, SaveProject, TripParameters, UpdateCompany, UpdateContact,
    UpdateRateValue,
};

use super::RecordStore;

/// Column list shared across rate queries to avoid repetition.
const RATE_COLUMNS: &str = "id, description, value, currency, is_current, effective_from";

const COMPANY_COLUMNS: &str = "id, name, phc_number, address, postal_code, created_at";

const CONTACT_COLUMNS: &str = "id, company_id, name, email, phone";

const ENGAGEMENT_COLUMNS: &str = "kind, location_type, num_days, num_nights, num_people, \
     daytime_hours, nighttime_hours, kilometers, has_accommodation, num_meals, \
     external_service_cost, daytime_cost, nighttime_cost, km_cost, accommodation_cost, \
     meals_cost, total_cost";

const VISIT_KIND: &str = "technical_visit";
const IMPLEMENTATION_KIND: &str = "implementation";

/// A [`RecordStore`] backed by Postgres.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects a pool to the given database URL.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations, which also seed the default
    /// rate values on a fresh database.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// Verifies the database connection answers queries.
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Flat engagement row; `kind` discriminates visit vs implementation.
#[derive(FromRow)]
struct EngagementRow {
    kind: String,
    location_type: String,
    num_days: i32,
    num_nights: i32,
    num_people: Decimal,
    daytime_hours: Decimal,
    nighttime_hours: Decimal,
    kilometers: Decimal,
    has_accommodation: bool,
    num_meals: i32,
    external_service_cost: Decimal,
    daytime_cost: Decimal,
    nighttime_cost: Decimal,
    km_cost: Decimal,
    accommodation_cost: Decimal,
    meals_cost: Decimal,
    total_cost: Decimal,
}

impl EngagementRow {
    fn into_engagement(self) -> Engagement {
        Engagement {
            params: TripParameters {
                location_type: self.location_type.parse().unwrap_or_default(),
                num_days: u32::try_from(self.num_days).unwrap_or_default(),
                num_nights: u32::try_from(self.num_nights).unwrap_or_default(),
                num_people: self.num_people,
                daytime_hours: self.daytime_hours,
                nighttime_hours: self.nighttime_hours,
                kilometers: self.kilometers,
                has_accommodation: self.has_accommodation,
                num_meals: u32::try_from(self.num_meals).unwrap_or_default(),
                external_service_cost: self.external_service_cost,
            },
            costs: CostBreakdown {
                daytime_cost: self.daytime_cost,
                nighttime_cost: self.nighttime_cost,
                km_cost: self.km_cost,
                accommodation_cost: self.accommodation_cost,
                meals_cost: self.meals_cost,
                total_cost: self.total_cost,
            },
        }
    }
}

#[derive(FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    company_id: Option<Uuid>,
    client_name: String,
    phc_id: Option<String>,
    contact_name: Option<String>,
    total_cost: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

async fn insert_engagement(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    project_id: Uuid,
    kind: &str,
    engagement: &Engagement,
) -> Result<(), sqlx::Error> {
    let params = &engagement.params;
    let costs = &engagement.costs;
    sqlx::query(
        "INSERT INTO engagements (id, project_id, kind, location_type, num_days, num_nights, \
         num_people, daytime_hours, nighttime_hours, kilometers, has_accommodation, num_meals, \
         external_service_cost, daytime_cost, nighttime_cost, km_cost, accommodation_cost, \
         meals_cost, total_cost) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
         $18, $19)",
    )
    .bind(Uuid::new_v4())
    .bind(project_id)
    .bind(kind)
    .bind(params.location_type.to_string())
    .bind(params.num_days as i32)
    .bind(params.num_nights as i32)
    .bind(params.num_people)
    .bind(params.daytime_hours)
    .bind(params.nighttime_hours)
    .bind(params.kilometers)
    .bind(params.has_accommodation)
    .bind(params.num_meals as i32)
    .bind(params.external_service_cost)
    .bind(costs.daytime_cost)
    .bind(costs.nighttime_cost)
    .bind(costs.km_cost)
    .bind(costs.accommodation_cost)
    .bind(costs.meals_cost)
    .bind(costs.total_cost)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[async_trait]
impl RecordStore for PgStore {
    async fn current_rates(&self) -> EngineResult<Vec<RateValue>> {
        let query = format!(
            "SELECT {RATE_COLUMNS} FROM rate_values WHERE is_current ORDER BY description"
        );
        let rates = sqlx::query_as::<_, RateValue>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rates)
    }

    async fn rates_by_descriptions(&self, descriptions: &[&str]) -> EngineResult<Vec<RateValue>> {
        let query = format!(
            "SELECT {RATE_COLUMNS} FROM rate_values \
             WHERE is_current AND description = ANY($1) ORDER BY description"
        );
        let owned: Vec<String> = descriptions.iter().map(|d| d.to_string()).collect();
        let rates = sqlx::query_as::<_, RateValue>(&query)
            .bind(owned)
            .fetch_all(&self.pool)
            .await?;
        Ok(rates)
    }

    async fn rate_by_id(&self, id: Uuid) -> EngineResult<Option<RateValue>> {
        let query = format!("SELECT {RATE_COLUMNS} FROM rate_values WHERE id = $1");
        let rate = sqlx::query_as::<_, RateValue>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(rate)
    }

    async fn rates_as_of(&self, at: DateTime<Utc>) -> EngineResult<Vec<RateValue>> {
        let query = format!(
            "SELECT DISTINCT ON (description) {RATE_COLUMNS} FROM rate_values \
             WHERE effective_from <= $1 ORDER BY description, effective_from DESC"
        );
        let rates = sqlx::query_as::<_, RateValue>(&query)
            .bind(at)
            .fetch_all(&self.pool)
            .await?;
        Ok(rates)
    }

    async fn rate_history(&self, description: &str) -> EngineResult<Vec<RateValue>> {
        let query = format!(
            "SELECT {RATE_COLUMNS} FROM rate_values WHERE description = $1 \
             ORDER BY effective_from DESC"
        );
        let rates = sqlx::query_as::<_, RateValue>(&query)
            .bind(description)
            .fetch_all(&self.pool)
            .await?;
        Ok(rates)
    }

    async fn create_rate(&self, input: CreateRateValue) -> EngineResult<RateValue> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE rate_values SET is_current = FALSE WHERE description = $1 AND is_current")
            .bind(&input.description)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO rate_values (id, description, value, currency, is_current, effective_from) \
             VALUES ($1, $2, $3, $4, TRUE, $5) RETURNING {RATE_COLUMNS}"
        );
        let rate = sqlx::query_as::<_, RateValue>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.description)
            .bind(input.value)
            .bind(&input.currency)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rate)
    }

    async fn update_rate(
        &self,
        id: Uuid,
        input: UpdateRateValue,
    ) -> EngineResult<Option<RateValue>> {
        let mut tx = self.pool.begin().await?;

        let query = format!("SELECT {RATE_COLUMNS} FROM rate_values WHERE id = $1");
        let Some(previous) = sqlx::query_as::<_, RateValue>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let description = input.description.unwrap_or(previous.description);
        sqlx::query(
            "UPDATE rate_values SET is_current = FALSE \
             WHERE (description = $1 OR id = $2) AND is_current",
        )
        .bind(&description)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO rate_values (id, description, value, currency, is_current, effective_from) \
             VALUES ($1, $2, $3, $4, TRUE, $5) RETURNING {RATE_COLUMNS}"
        );
        let rate = sqlx::query_as::<_, RateValue>(&query)
            .bind(Uuid::new_v4())
            .bind(&description)
            .bind(input.value.unwrap_or(previous.value))
            .bind(input.currency.unwrap_or(previous.currency))
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(rate))
    }

    async fn delete_rate(&self, id: Uuid) -> EngineResult<bool> {
        let result = sqlx::query("DELETE FROM rate_values WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_companies(&self, query: Option<&str>) -> EngineResult<Vec<Company>> {
        let companies = match query {
            Some(needle) => {
                let sql = format!(
                    "SELECT {COMPANY_COLUMNS} FROM companies WHERE name ILIKE $1 ORDER BY name"
                );
                sqlx::query_as::<_, Company>(&sql)
                    .bind(format!("%{needle}%"))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY name");
                sqlx::query_as::<_, Company>(&sql).fetch_all(&self.pool).await?
            }
        };
        Ok(companies)
    }

    async fn get_company(&self, id: Uuid) -> EngineResult<Option<Company>> {
        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1");
        let company = sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn create_company(&self, input: CreateCompany) -> EngineResult<Company> {
        let query = format!(
            "INSERT INTO companies (id, name, phc_number, address, postal_code, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COMPANY_COLUMNS}"
        );
        let company = sqlx::query_as::<_, Company>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.phc_number)
            .bind(&input.address)
            .bind(&input.postal_code)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(company)
    }

    async fn update_company(
        &self,
        id: Uuid,
        input: UpdateCompany,
    ) -> EngineResult<Option<Company>> {
        let query = format!(
            "UPDATE companies SET \
                name = COALESCE($2, name), \
                phc_number = COALESCE($3, phc_number), \
                address = COALESCE($4, address), \
                postal_code = COALESCE($5, postal_code) \
             WHERE id = $1 RETURNING {COMPANY_COLUMNS}"
        );
        let company = sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phc_number)
            .bind(&input.address)
            .bind(&input.postal_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn delete_company(&self, id: Uuid) -> EngineResult<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM contacts WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_contacts(&self, company_id: Uuid) -> EngineResult<Vec<Contact>> {
        let query =
            format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE company_id = $1 ORDER BY name");
        let contacts = sqlx::query_as::<_, Contact>(&query)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(contacts)
    }

    async fn create_contact(
        &self,
        company_id: Uuid,
        input: CreateContact,
    ) -> EngineResult<Contact> {
        let query = format!(
            "INSERT INTO contacts (id, company_id, name, email, phone) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {CONTACT_COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&query)
            .bind(Uuid::new_v4())
            .bind(company_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn update_contact(
        &self,
        id: Uuid,
        input: UpdateContact,
    ) -> EngineResult<Option<Contact>> {
        let query = format!(
            "UPDATE contacts SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                phone = COALESCE($4, phone) \
             WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn delete_contact(&self, id: Uuid) -> EngineResult<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn save_project(&self, input: SaveProject) -> EngineResult<Project> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();
        let id = input.id.unwrap_or_else(Uuid::new_v4);
        let total_cost = input.total_cost();

        let created_at: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT created_at FROM projects WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let created_at = created_at.unwrap_or(now);

        sqlx::query(
            "INSERT INTO projects (id, name, company_id, client_name, phc_id, contact_name, \
             total_cost, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (id) DO UPDATE SET \
                name = EXCLUDED.name, \
                company_id = EXCLUDED.company_id, \
                client_name = EXCLUDED.client_name, \
                phc_id = EXCLUDED.phc_id, \
                contact_name = EXCLUDED.contact_name, \
                total_cost = EXCLUDED.total_cost, \
                updated_at = EXCLUDED.updated_at",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.company_id)
        .bind(&input.client_name)
        .bind(&input.phc_id)
        .bind(&input.contact_name)
        .bind(total_cost)
        .bind(created_at)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        // Engagements are replaced wholesale on every save.
        sqlx::query("DELETE FROM engagements WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if let Some(visit) = &input.visit {
            insert_engagement(&mut tx, id, VISIT_KIND, visit).await?;
        }
        insert_engagement(&mut tx, id, IMPLEMENTATION_KIND, &input.implementation).await?;

        tx.commit().await?;

        Ok(Project {
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
        })
    }

    async fn get_project(&self, id: Uuid) -> EngineResult<Option<Project>> {
        let query = "SELECT id, name, company_id, client_name, phc_id, contact_name, total_cost, \
             created_at, updated_at FROM projects WHERE id = $1";
        let Some(row) = sqlx::query_as::<_, ProjectRow>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let query = format!("SELECT {ENGAGEMENT_COLUMNS} FROM engagements WHERE project_id = $1");
        let engagement_rows = sqlx::query_as::<_, EngagementRow>(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        let mut visit = None;
        let mut implementation = None;
        for engagement_row in engagement_rows {
            match engagement_row.kind.as_str() {
                VISIT_KIND => visit = Some(engagement_row.into_engagement()),
                IMPLEMENTATION_KIND => implementation = Some(engagement_row.into_engagement()),
                other => {
                    tracing::warn!(project_id = %id, kind = other, "Unknown engagement kind");
                }
            }
        }

        let implementation = match implementation {
            Some(engagement) => engagement,
            None => {
                // A project without an implementation row is a data bug;
                // surface it as a missing row rather than fabricating one.
                return Err(sqlx::Error::RowNotFound.into());
            }
        };

        Ok(Some(Project {
            id: row.id,
            name: row.name,
            company_id: row.company_id,
            client_name: row.client_name,
            phc_id: row.phc_id,
            contact_name: row.contact_name,
            visit,
            implementation,
            total_cost: row.total_cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }

    async fn list_projects(&self, query: Option<&str>) -> EngineResult<Vec<ProjectSummary>> {
        #[derive(FromRow)]
        struct SummaryRow {
            id: Uuid,
            name: String,
            client_name: String,
            total_cost: Decimal,
            updated_at: DateTime<Utc>,
        }

        let rows = match query {
            Some(needle) => {
                sqlx::query_as::<_, SummaryRow>(
                    "SELECT id, name, client_name, total_cost, updated_at FROM projects \
                     WHERE name ILIKE $1 OR client_name ILIKE $1 ORDER BY updated_at DESC",
                )
                .bind(format!("%{needle}%"))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SummaryRow>(
                    "SELECT id, name, client_name, total_cost, updated_at FROM projects \
                     ORDER BY updated_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows
            .into_iter()
            .map(|row| ProjectSummary {
                id: row.id,
                name: row.name,
                client_name: row.client_name,
                total_cost: row.total_cost,
                updated_at: row.updated_at,
            })
            .collect())
    }
}
