//! PostgreSQL implementation of appliance repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{
    Appliance, AppliancePatch, DocumentType, LinkedDocument, MaintenanceTask,
    MaintenanceTaskPatch, NewAppliance, NewLinkedDocument, NewMaintenanceTask, NewSupportContact,
    ServiceProvider, SupportContact, TaskFrequency, TaskStatus,
};
use crate::domain::repositories::ApplianceRepository;
use crate::error::AppError;

const APPLIANCE_COLUMNS: &str = "id, user_id, name, brand, model, purchase_date, \
     warranty_duration_months, serial_number, purchase_location, notes, created_at, updated_at";
const CONTACT_COLUMNS: &str = "id, appliance_id, name, company, phone, email, website, notes";
const TASK_COLUMNS: &str = "id, appliance_id, task_name, scheduled_date, frequency, \
     service_provider, notes, status, completed_date";
const DOCUMENT_COLUMNS: &str = "id, appliance_id, title, url, document_type";

#[derive(FromRow)]
struct ApplianceRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    brand: String,
    model: String,
    purchase_date: NaiveDate,
    warranty_duration_months: i32,
    serial_number: Option<String>,
    purchase_location: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApplianceRow {
    fn into_appliance(self) -> Result<Appliance, AppError> {
        let months = u32::try_from(self.warranty_duration_months).map_err(|_| {
            AppError::internal(
                "Stored warranty duration is negative",
                json!({ "id": self.id }),
            )
        })?;

        Ok(Appliance {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            brand: self.brand,
            model: self.model,
            purchase_date: self.purchase_date,
            warranty_duration_months: months,
            serial_number: self.serial_number,
            purchase_location: self.purchase_location,
            notes: self.notes,
            support_contacts: Vec::new(),
            maintenance_tasks: Vec::new(),
            linked_documents: Vec::new(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ContactRow {
    id: Uuid,
    appliance_id: Uuid,
    name: String,
    company: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    website: Option<String>,
    notes: Option<String>,
}

impl From<ContactRow> for SupportContact {
    fn from(r: ContactRow) -> Self {
        SupportContact {
            id: r.id,
            appliance_id: r.appliance_id,
            name: r.name,
            company: r.company,
            phone: r.phone,
            email: r.email,
            website: r.website,
            notes: r.notes,
        }
    }
}

#[derive(FromRow)]
struct TaskRow {
    id: Uuid,
    appliance_id: Uuid,
    task_name: String,
    scheduled_date: NaiveDate,
    frequency: String,
    service_provider: Option<Json<ServiceProvider>>,
    notes: Option<String>,
    status: String,
    completed_date: Option<NaiveDate>,
}

impl TryFrom<TaskRow> for MaintenanceTask {
    type Error = AppError;

    fn try_from(r: TaskRow) -> Result<Self, Self::Error> {
        let frequency = r
            .frequency
            .parse::<TaskFrequency>()
            .map_err(|e| AppError::internal(e, json!({ "task_id": r.id })))?;
        let status = r
            .status
            .parse::<TaskStatus>()
            .map_err(|e| AppError::internal(e, json!({ "task_id": r.id })))?;

        Ok(MaintenanceTask {
            id: r.id,
            appliance_id: r.appliance_id,
            task_name: r.task_name,
            scheduled_date: r.scheduled_date,
            frequency,
            service_provider: r.service_provider.map(|Json(p)| p),
            notes: r.notes,
            status,
            completed_date: r.completed_date,
        })
    }
}

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    appliance_id: Uuid,
    title: String,
    url: String,
    document_type: String,
}

impl TryFrom<DocumentRow> for LinkedDocument {
    type Error = AppError;

    fn try_from(r: DocumentRow) -> Result<Self, Self::Error> {
        let document_type = r
            .document_type
            .parse::<DocumentType>()
            .map_err(|e| AppError::internal(e, json!({ "document_id": r.id })))?;

        Ok(LinkedDocument {
            id: r.id,
            appliance_id: r.appliance_id,
            title: r.title,
            url: r.url,
            document_type,
        })
    }
}

fn months_to_db(months: u32) -> Result<i32, AppError> {
    i32::try_from(months).map_err(|_| {
        AppError::bad_request(
            "Warranty duration is too large",
            json!({ "warranty_duration_months": months }),
        )
    })
}

/// PostgreSQL repository for appliances and their nested records.
///
/// Every statement is scoped by `user_id` so one user can never read or
/// modify another user's appliances. Nested rows are removed by
/// `ON DELETE CASCADE`.
pub struct PgApplianceRepository {
    pool: Arc<PgPool>,
}

impl PgApplianceRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Loads nested records for the given appliances and attaches them.
    async fn attach_nested(&self, appliances: &mut [Appliance]) -> Result<(), AppError> {
        if appliances.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = appliances.iter().map(|a| a.id).collect();

        let contacts: Vec<ContactRow> = sqlx::query_as(&format!(
            "SELECT {CONTACT_COLUMNS} FROM support_contacts \
             WHERE appliance_id = ANY($1) ORDER BY created_at, id"
        ))
        .bind(&ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let tasks: Vec<TaskRow> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM maintenance_tasks \
             WHERE appliance_id = ANY($1) ORDER BY scheduled_date, created_at, id"
        ))
        .bind(&ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let documents: Vec<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM linked_documents \
             WHERE appliance_id = ANY($1) ORDER BY created_at, id"
        ))
        .bind(&ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let index: HashMap<Uuid, usize> = appliances
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id, i))
            .collect();

        for row in contacts {
            if let Some(&i) = index.get(&row.appliance_id) {
                appliances[i].support_contacts.push(row.into());
            }
        }
        for row in tasks {
            if let Some(&i) = index.get(&row.appliance_id) {
                appliances[i].maintenance_tasks.push(row.try_into()?);
            }
        }
        for row in documents {
            if let Some(&i) = index.get(&row.appliance_id) {
                appliances[i].linked_documents.push(row.try_into()?);
            }
        }

        Ok(())
    }

    async fn fetch_for_update(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Appliance>, AppError> {
        let row: Option<ApplianceRow> = sqlx::query_as(&format!(
            "SELECT {APPLIANCE_COLUMNS} FROM appliances \
             WHERE id = $1 AND user_id = $2 FOR UPDATE"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

        row.map(ApplianceRow::into_appliance).transpose()
    }
}

#[async_trait]
impl ApplianceRepository for PgApplianceRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Appliance>, AppError> {
        let rows: Vec<ApplianceRow> = sqlx::query_as(&format!(
            "SELECT {APPLIANCE_COLUMNS} FROM appliances \
             WHERE user_id = $1 ORDER BY created_at DESC, id"
        ))
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut appliances = rows
            .into_iter()
            .map(ApplianceRow::into_appliance)
            .collect::<Result<Vec<_>, _>>()?;
        self.attach_nested(&mut appliances).await?;

        Ok(appliances)
    }

    async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Appliance>, AppError> {
        let row: Option<ApplianceRow> = sqlx::query_as(&format!(
            "SELECT {APPLIANCE_COLUMNS} FROM appliances WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut appliances = [row.into_appliance()?];
        self.attach_nested(&mut appliances).await?;

        let [appliance] = appliances;
        Ok(Some(appliance))
    }

    async fn create(&self, new_appliance: NewAppliance) -> Result<Appliance, AppError> {
        let row: ApplianceRow = sqlx::query_as(&format!(
            "INSERT INTO appliances (id, user_id, name, brand, model, purchase_date, \
                 warranty_duration_months, serial_number, purchase_location, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {APPLIANCE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(new_appliance.user_id)
        .bind(&new_appliance.name)
        .bind(&new_appliance.brand)
        .bind(&new_appliance.model)
        .bind(new_appliance.purchase_date)
        .bind(months_to_db(new_appliance.warranty_duration_months)?)
        .bind(&new_appliance.serial_number)
        .bind(&new_appliance.purchase_location)
        .bind(&new_appliance.notes)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.into_appliance()
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: AppliancePatch,
    ) -> Result<Option<Appliance>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut appliance) = Self::fetch_for_update(&mut tx, user_id, id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut appliance, Utc::now());

        sqlx::query(
            "UPDATE appliances SET name = $1, brand = $2, model = $3, purchase_date = $4, \
                 warranty_duration_months = $5, serial_number = $6, purchase_location = $7, \
                 notes = $8, updated_at = $9 \
             WHERE id = $10 AND user_id = $11",
        )
        .bind(&appliance.name)
        .bind(&appliance.brand)
        .bind(&appliance.model)
        .bind(appliance.purchase_date)
        .bind(months_to_db(appliance.warranty_duration_months)?)
        .bind(&appliance.serial_number)
        .bind(&appliance.purchase_location)
        .bind(&appliance.notes)
        .bind(appliance.updated_at)
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut appliances = [appliance];
        self.attach_nested(&mut appliances).await?;
        let [appliance] = appliances;
        Ok(Some(appliance))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM appliances WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_contact(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        contact: NewSupportContact,
    ) -> Result<Option<SupportContact>, AppError> {
        let row: Option<ContactRow> = sqlx::query_as(&format!(
            "INSERT INTO support_contacts \
                 (id, appliance_id, name, company, phone, email, website, notes) \
             SELECT $1, a.id, $3, $4, $5, $6, $7, $8 \
             FROM appliances a WHERE a.id = $2 AND a.user_id = $9 \
             RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(appliance_id)
        .bind(&contact.name)
        .bind(&contact.company)
        .bind(&contact.phone)
        .bind(&contact.email)
        .bind(&contact.website)
        .bind(&contact.notes)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(SupportContact::from))
    }

    async fn remove_contact(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        contact_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM support_contacts c USING appliances a \
             WHERE c.id = $1 AND c.appliance_id = $2 \
               AND a.id = c.appliance_id AND a.user_id = $3",
        )
        .bind(contact_id)
        .bind(appliance_id)
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task: NewMaintenanceTask,
    ) -> Result<Option<MaintenanceTask>, AppError> {
        let row: Option<TaskRow> = sqlx::query_as(&format!(
            "INSERT INTO maintenance_tasks \
                 (id, appliance_id, task_name, scheduled_date, frequency, \
                  service_provider, notes, status, completed_date) \
             SELECT $1, a.id, $3, $4, $5, $6, $7, $8, $9 \
             FROM appliances a WHERE a.id = $2 AND a.user_id = $10 \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(appliance_id)
        .bind(&task.task_name)
        .bind(task.scheduled_date)
        .bind(task.frequency.as_str())
        .bind(task.service_provider.map(Json))
        .bind(&task.notes)
        .bind(task.status.as_str())
        .bind(task.completed_date)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(MaintenanceTask::try_from).transpose()
    }

    async fn update_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task_id: Uuid,
        patch: MaintenanceTaskPatch,
    ) -> Result<Option<MaintenanceTask>, AppError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<TaskRow> = sqlx::query_as(
            "SELECT t.id, t.appliance_id, t.task_name, t.scheduled_date, t.frequency, \
                    t.service_provider, t.notes, t.status, t.completed_date \
             FROM maintenance_tasks t JOIN appliances a ON a.id = t.appliance_id \
             WHERE t.id = $1 AND t.appliance_id = $2 AND a.user_id = $3 \
             FOR UPDATE OF t",
        )
        .bind(task_id)
        .bind(appliance_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut task = MaintenanceTask::try_from(row)?;
        patch.apply_to(&mut task);

        sqlx::query(
            "UPDATE maintenance_tasks SET task_name = $1, scheduled_date = $2, frequency = $3, \
                 service_provider = $4, notes = $5, status = $6, completed_date = $7 \
             WHERE id = $8",
        )
        .bind(&task.task_name)
        .bind(task.scheduled_date)
        .bind(task.frequency.as_str())
        .bind(task.service_provider.clone().map(Json))
        .bind(&task.notes)
        .bind(task.status.as_str())
        .bind(task.completed_date)
        .bind(task_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(task))
    }

    async fn remove_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM maintenance_tasks t USING appliances a \
             WHERE t.id = $1 AND t.appliance_id = $2 \
               AND a.id = t.appliance_id AND a.user_id = $3",
        )
        .bind(task_id)
        .bind(appliance_id)
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_document(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        document: NewLinkedDocument,
    ) -> Result<Option<LinkedDocument>, AppError> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            "INSERT INTO linked_documents (id, appliance_id, title, url, document_type) \
             SELECT $1, a.id, $3, $4, $5 \
             FROM appliances a WHERE a.id = $2 AND a.user_id = $6 \
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(appliance_id)
        .bind(&document.title)
        .bind(&document.url)
        .bind(document.document_type.as_str())
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(LinkedDocument::try_from).transpose()
    }

    async fn remove_document(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        document_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM linked_documents d USING appliances a \
             WHERE d.id = $1 AND d.appliance_id = $2 \
               AND a.id = d.appliance_id AND a.user_id = $3",
        )
        .bind(document_id)
        .bind(appliance_id)
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
