//! Repository trait for appliance data access.

use crate::domain::entities::{
    Appliance, AppliancePatch, LinkedDocument, MaintenanceTask, MaintenanceTaskPatch,
    NewAppliance, NewLinkedDocument, NewMaintenanceTask, NewSupportContact, SupportContact,
};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for appliances and their nested records.
///
/// Every operation is scoped to the owning user. A record owned by someone
/// else behaves exactly like a missing one (`None` / `false`).
///
/// Appliances are always returned with their support contacts, maintenance
/// tasks, and linked documents loaded. Changing a nested record does not
/// bump the appliance's `updated_at`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgApplianceRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryApplianceRepository`] - Process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplianceRepository: Send + Sync {
    /// Lists all appliances of a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Appliance>, AppError>;

    /// Finds a single appliance owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Appliance>, AppError>;

    /// Creates an appliance with empty nested collections.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_appliance: NewAppliance) -> Result<Appliance, AppError>;

    /// Partially updates an appliance.
    ///
    /// Returns `Ok(None)` if the appliance does not exist for this user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: AppliancePatch,
    ) -> Result<Option<Appliance>, AppError>;

    /// Deletes an appliance and everything attached to it.
    ///
    /// Returns `Ok(false)` if nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Adds a support contact. `Ok(None)` if the appliance is not found.
    async fn add_contact(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        contact: NewSupportContact,
    ) -> Result<Option<SupportContact>, AppError>;

    /// Removes a support contact. `Ok(false)` if not found.
    async fn remove_contact(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        contact_id: Uuid,
    ) -> Result<bool, AppError>;

    /// Schedules a maintenance task. `Ok(None)` if the appliance is not found.
    async fn add_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task: NewMaintenanceTask,
    ) -> Result<Option<MaintenanceTask>, AppError>;

    /// Partially updates a maintenance task. `Ok(None)` if not found.
    async fn update_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task_id: Uuid,
        patch: MaintenanceTaskPatch,
    ) -> Result<Option<MaintenanceTask>, AppError>;

    /// Removes a maintenance task. `Ok(false)` if not found.
    async fn remove_task(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        task_id: Uuid,
    ) -> Result<bool, AppError>;

    /// Links a document. `Ok(None)` if the appliance is not found.
    async fn add_document(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        document: NewLinkedDocument,
    ) -> Result<Option<LinkedDocument>, AppError>;

    /// Unlinks a document. `Ok(false)` if not found.
    async fn remove_document(
        &self,
        user_id: Uuid,
        appliance_id: Uuid,
        document_id: Uuid,
    ) -> Result<bool, AppError>;

    /// Returns true if the backing store is reachable.
    async fn health_check(&self) -> bool;
}
