//! Maintenance task scheduled for an appliance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How often a task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskFrequency {
    #[serde(rename = "One-time")]
    OneTime,
    Monthly,
    Yearly,
    Custom,
}

impl TaskFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneTime => "One-time",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for TaskFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "One-time" => Ok(Self::OneTime),
            "Monthly" => Ok(Self::Monthly),
            "Yearly" => Ok(Self::Yearly),
            "Custom" => Ok(Self::Custom),
            other => Err(format!("Unknown task frequency: {other}")),
        }
    }
}

/// Progress of a maintenance task, as recorded by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Upcoming,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Upcoming" => Ok(Self::Upcoming),
            "Completed" => Ok(Self::Completed),
            "Overdue" => Ok(Self::Overdue),
            other => Err(format!("Unknown task status: {other}")),
        }
    }
}

/// Third party who performs the task. Stored as a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceTask {
    pub id: Uuid,
    pub appliance_id: Uuid,
    pub task_name: String,
    pub scheduled_date: NaiveDate,
    pub frequency: TaskFrequency,
    pub service_provider: Option<ServiceProvider>,
    pub notes: Option<String>,
    pub status: TaskStatus,
    pub completed_date: Option<NaiveDate>,
}

/// Input data for scheduling a task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceTask {
    pub task_name: String,
    pub scheduled_date: NaiveDate,
    pub frequency: TaskFrequency,
    pub service_provider: Option<ServiceProvider>,
    pub notes: Option<String>,
    pub status: TaskStatus,
    pub completed_date: Option<NaiveDate>,
}

/// Partial update for a task. Same conventions as
/// [`crate::domain::entities::AppliancePatch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceTaskPatch {
    pub task_name: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub frequency: Option<TaskFrequency>,
    pub service_provider: Option<Option<ServiceProvider>>,
    pub notes: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub completed_date: Option<Option<NaiveDate>>,
}

impl MaintenanceTask {
    pub fn from_new(id: Uuid, appliance_id: Uuid, new: NewMaintenanceTask) -> Self {
        Self {
            id,
            appliance_id,
            task_name: new.task_name,
            scheduled_date: new.scheduled_date,
            frequency: new.frequency,
            service_provider: new.service_provider,
            notes: new.notes,
            status: new.status,
            completed_date: new.completed_date,
        }
    }
}

impl MaintenanceTaskPatch {
    pub fn apply_to(self, task: &mut MaintenanceTask) {
        if let Some(task_name) = self.task_name {
            task.task_name = task_name;
        }
        if let Some(scheduled_date) = self.scheduled_date {
            task.scheduled_date = scheduled_date;
        }
        if let Some(frequency) = self.frequency {
            task.frequency = frequency;
        }
        if let Some(service_provider) = self.service_provider {
            task.service_provider = service_provider;
        }
        if let Some(notes) = self.notes {
            task.notes = notes;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(completed_date) = self.completed_date {
            task.completed_date = completed_date;
        }
    }
}
