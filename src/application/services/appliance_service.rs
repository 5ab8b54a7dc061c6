//! Appliance management and warranty evaluation service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::domain::clock::Clock;
use crate::domain::entities::{
    Appliance, AppliancePatch, LinkedDocument, MaintenanceTask, MaintenanceTaskPatch,
    NewAppliance, NewLinkedDocument, NewMaintenanceTask, NewSupportContact, SupportContact,
    Warranty,
};
use crate::domain::repositories::ApplianceRepository;
use crate::domain::warranty::{StatusFilter, WarrantySummary};
use crate::error::AppError;

/// Upper bound for a warranty duration (100 years).
pub const MAX_WARRANTY_MONTHS: u32 = 1200;

/// An appliance together with its warranty as of the evaluation date.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedAppliance {
    pub appliance: Appliance,
    pub warranty: Warranty,
}

/// Listing criteria for [`ApplianceService::list_appliances`].
#[derive(Debug, Clone, Default)]
pub struct ApplianceQuery {
    pub status: StatusFilter,
    pub search: Option<String>,
}

/// Service for appliance CRUD and warranty-derived views.
///
/// Warranty status is computed on every read against the injected [`Clock`];
/// nothing derived is ever written back.
pub struct ApplianceService<R: ApplianceRepository + ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ApplianceRepository + ?Sized> ApplianceService<R> {
    /// Creates a new appliance service.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// The date warranties are currently evaluated against.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn evaluate(&self, appliance: Appliance, today: NaiveDate) -> EvaluatedAppliance {
        let warranty = appliance.warranty_on(today);
        EvaluatedAppliance {
            appliance,
            warranty,
        }
    }

    /// Lists a user's appliances matching the search text and status bucket.
    ///
    /// Search is applied first, over name, brand, and model.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_appliances(
        &self,
        user_id: Uuid,
        query: ApplianceQuery,
    ) -> Result<Vec<EvaluatedAppliance>, AppError> {
        let today = self.today();
        let search = query.search.unwrap_or_default();

        let appliances = self.repository.list_for_user(user_id).await?;

        Ok(appliances
            .into_iter()
            .filter(|a| a.matches_search(&search))
            .map(|a| self.evaluate(a, today))
            .filter(|e| query.status.matches(e.warranty.status))
            .collect())
    }

    /// Counts a user's appliances per warranty status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn summarize(&self, user_id: Uuid) -> Result<WarrantySummary, AppError> {
        let appliances = self.repository.list_for_user(user_id).await?;
        Ok(WarrantySummary::tally(&appliances, self.today()))
    }

    /// Retrieves one appliance with its warranty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no such appliance.
    pub async fn get_appliance(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<EvaluatedAppliance, AppError> {
        let appliance = self
            .repository
            .find(user_id, id)
            .await?
            .ok_or_else(|| appliance_not_found(id))?;

        Ok(self.evaluate(appliance, self.today()))
    }

    /// Creates an appliance.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the warranty duration is out of range.
    pub async fn create_appliance(
        &self,
        new_appliance: NewAppliance,
    ) -> Result<EvaluatedAppliance, AppError> {
        validate_duration(new_appliance.warranty_duration_months)?;

        let appliance = self.repository.create(new_appliance).await?;
        metrics::counter!("appliances_created_total").increment(1);
        tracing::info!(appliance_id = %appliance.id, user_id = %appliance.user_id, "Appliance created");

        Ok(self.evaluate(appliance, self.today()))
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the patch is empty or the duration is
    /// out of range, [`AppError::NotFound`] if the appliance does not exist.
    pub async fn update_appliance(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: AppliancePatch,
    ) -> Result<EvaluatedAppliance, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "Update must change at least one field",
                json!({ "id": id }),
            ));
        }
        if let Some(months) = patch.warranty_duration_months {
            validate_duration(months)?;
        }

        let appliance = self
            .repository
            .update(user_id, id, patch)
            .await?
            .ok_or_else(|| appliance_not_found(id))?;
        metrics::counter!("appliances_updated_total").increment(1);

        Ok(self.evaluate(appliance, self.today()))
    }

    /// Deletes an appliance with all of its nested records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the appliance does not exist.
    pub async fn delete_appliance(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(user_id, id).await? {
            return Err(appliance_not_found(id));
        }
        metrics::counter!("appliances_deleted_total").increment(1);
        tracing::info!(appliance_id = %id, user_id = %user_id, "Appliance deleted");
        Ok(())
    }

    pub async fn add_contact(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        contact: NewSupportContact,
    ) -> Result<SupportContact, AppError> {
        self.repository
            .add_contact(user_id, appliance_id, contact)
            .await?
            .ok_or_else(|| appliance_not_found(appliance_id))
    }

    pub async fn remove_contact(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        contact_id: Uuid,
    ) -> Result<(), AppError> {
        if self
            .repository
            .remove_contact(user_id, appliance_id, contact_id)
            .await?
        {
            Ok(())
        } else {
            Err(nested_not_found("Support contact", appliance_id, contact_id))
        }
    }

    pub async fn add_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task: NewMaintenanceTask,
    ) -> Result<MaintenanceTask, AppError> {
        self.repository
            .add_task(user_id, appliance_id, task)
            .await?
            .ok_or_else(|| appliance_not_found(appliance_id))
    }

    /// Updates a maintenance task.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the appliance or task does not exist.
    pub async fn update_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task_id: Uuid,
        patch: MaintenanceTaskPatch,
    ) -> Result<MaintenanceTask, AppError> {
        self.repository
            .update_task(user_id, appliance_id, task_id, patch)
            .await?
            .ok_or_else(|| nested_not_found("Maintenance task", appliance_id, task_id))
    }

    pub async fn remove_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task_id: Uuid,
    ) -> Result<(), AppError> {
        if self
            .repository
            .remove_task(user_id, appliance_id, task_id)
            .await?
        {
            Ok(())
        } else {
            Err(nested_not_found("Maintenance task", appliance_id, task_id))
        }
    }

    pub async fn add_document(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        document: NewLinkedDocument,
    ) -> Result<LinkedDocument, AppError> {
        self.repository
            .add_document(user_id, appliance_id, document)
            .await?
            .ok_or_else(|| appliance_not_found(appliance_id))
    }

    pub async fn remove_document(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        document_id: Uuid,
    ) -> Result<(), AppError> {
        if self
            .repository
            .remove_document(user_id, appliance_id, document_id)
            .await?
        {
            Ok(())
        } else {
            Err(nested_not_found("Linked document", appliance_id, document_id))
        }
    }

    /// Returns true if the underlying store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}

/// Rejects durations the warranty rule is not defined for.
pub fn validate_duration(months: u32) -> Result<(), AppError> {
    if months == 0 || months > MAX_WARRANTY_MONTHS {
        return Err(AppError::bad_request(
            "Warranty duration must be a positive number of months",
            json!({ "warranty_duration_months": months, "max": MAX_WARRANTY_MONTHS }),
        ));
    }
    Ok(())
}

fn appliance_not_found(id: Uuid) -> AppError {
    AppError::not_found("Appliance not found", json!({ "id": id }))
}

fn nested_not_found(kind: &str, appliance_id: Uuid, id: Uuid) -> AppError {
    AppError::not_found(
        format!("{kind} not found"),
        json!({ "appliance_id": appliance_id, "id": id }),
    )
}
