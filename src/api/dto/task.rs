//! DTOs for maintenance task endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::{non_blank, optional_email, trimmed};
use crate::domain::entities::{
    MaintenanceTask, MaintenanceTaskPatch, NewMaintenanceTask, ServiceProvider, TaskFrequency,
    TaskStatus,
};
use crate::utils::text::normalize_optional;

/// Service provider as sent by clients.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceProviderBody {
    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub name: String,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(custom(function = "optional_email"))]
    pub email: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl From<ServiceProviderBody> for ServiceProvider {
    fn from(body: ServiceProviderBody) -> Self {
        ServiceProvider {
            name: trimmed(body.name),
            phone: normalize_optional(body.phone),
            email: normalize_optional(body.email),
            notes: normalize_optional(body.notes),
        }
    }
}

/// Request body for `POST /api/appliances/{id}/tasks`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTaskRequest {
    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub task_name: String,

    pub scheduled_date: NaiveDate,

    pub frequency: TaskFrequency,

    #[validate(nested)]
    pub service_provider: Option<ServiceProviderBody>,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,

    pub completed_date: Option<NaiveDate>,
}

impl From<CreateTaskRequest> for NewMaintenanceTask {
    fn from(req: CreateTaskRequest) -> Self {
        NewMaintenanceTask {
            task_name: trimmed(req.task_name),
            scheduled_date: req.scheduled_date,
            frequency: req.frequency,
            service_provider: req.service_provider.map(Into::into),
            notes: normalize_optional(req.notes),
            status: req.status,
            completed_date: req.completed_date,
        }
    }
}

/// Request body for `PUT /api/appliances/{id}/tasks/{task_id}`.
///
/// Absent fields are unchanged; `null` clears `serviceProvider`, `notes`,
/// and `completedDate`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTaskRequest {
    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub task_name: Option<String>,

    pub scheduled_date: Option<NaiveDate>,

    pub frequency: Option<TaskFrequency>,

    /// Checked by [`UpdateTaskRequest::validate_all`].
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub service_provider: Option<Option<ServiceProviderBody>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 5000))]
    pub notes: Option<Option<String>>,

    pub status: Option<TaskStatus>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub completed_date: Option<Option<NaiveDate>>,
}

impl UpdateTaskRequest {
    /// Validates the request including a replacement service provider.
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;
        if let Some(Some(provider)) = &self.service_provider {
            provider.validate()?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.task_name.is_none()
            && self.scheduled_date.is_none()
            && self.frequency.is_none()
            && self.service_provider.is_none()
            && self.notes.is_none()
            && self.status.is_none()
            && self.completed_date.is_none()
    }
}

impl From<UpdateTaskRequest> for MaintenanceTaskPatch {
    fn from(req: UpdateTaskRequest) -> Self {
        MaintenanceTaskPatch {
            task_name: req.task_name.map(trimmed),
            scheduled_date: req.scheduled_date,
            frequency: req.frequency,
            service_provider: req.service_provider.map(|p| p.map(Into::into)),
            notes: req.notes.map(normalize_optional),
            status: req.status,
            completed_date: req.completed_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub appliance_id: Uuid,
    pub task_name: String,
    pub scheduled_date: NaiveDate,
    pub frequency: TaskFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<ServiceProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
}

impl From<MaintenanceTask> for TaskResponse {
    fn from(t: MaintenanceTask) -> Self {
        Self {
            id: t.id,
            appliance_id: t.appliance_id,
            task_name: t.task_name,
            scheduled_date: t.scheduled_date,
            frequency: t.frequency,
            service_provider: t.service_provider,
            notes: t.notes,
            status: t.status,
            completed_date: t.completed_date,
        }
    }
}
