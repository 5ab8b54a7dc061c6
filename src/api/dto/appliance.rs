//! DTOs for appliance endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::contact::ContactResponse;
use super::document::DocumentResponse;
use super::task::TaskResponse;
use super::{non_blank, trimmed};
use crate::application::services::EvaluatedAppliance;
use crate::application::services::appliance_service::MAX_WARRANTY_MONTHS;
use crate::domain::entities::{AppliancePatch, NewAppliance};
use crate::domain::warranty::{StatusFilter, WarrantyStatus, format_date_label};
use crate::utils::text::normalize_optional;

/// Request body for `POST /api/appliances`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateApplianceRequest {
    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub name: String,

    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub brand: String,

    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub model: String,

    pub purchase_date: NaiveDate,

    #[validate(range(min = 1, max = MAX_WARRANTY_MONTHS))]
    pub warranty_duration_months: u32,

    #[validate(length(max = 200))]
    pub serial_number: Option<String>,

    #[validate(length(max = 200))]
    pub purchase_location: Option<String>,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

impl CreateApplianceRequest {
    pub fn into_new(self, user_id: Uuid) -> NewAppliance {
        NewAppliance {
            user_id,
            name: trimmed(self.name),
            brand: trimmed(self.brand),
            model: trimmed(self.model),
            purchase_date: self.purchase_date,
            warranty_duration_months: self.warranty_duration_months,
            serial_number: normalize_optional(self.serial_number),
            purchase_location: normalize_optional(self.purchase_location),
            notes: normalize_optional(self.notes),
        }
    }
}

/// Request body for `PUT /api/appliances/{id}`.
///
/// All fields are optional; only provided fields are changed. For
/// `serialNumber`, `purchaseLocation`, and `notes`:
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear the value
/// - **String** → set new value
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateApplianceRequest {
    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub name: Option<String>,

    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub brand: Option<String>,

    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub model: Option<String>,

    pub purchase_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = MAX_WARRANTY_MONTHS))]
    pub warranty_duration_months: Option<u32>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 200))]
    pub serial_number: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 200))]
    pub purchase_location: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(length(max = 5000))]
    pub notes: Option<Option<String>>,
}

impl From<UpdateApplianceRequest> for AppliancePatch {
    fn from(req: UpdateApplianceRequest) -> Self {
        AppliancePatch {
            name: req.name.map(trimmed),
            brand: req.brand.map(trimmed),
            model: req.model.map(trimmed),
            purchase_date: req.purchase_date,
            warranty_duration_months: req.warranty_duration_months,
            serial_number: req.serial_number.map(normalize_optional),
            purchase_location: req.purchase_location.map(normalize_optional),
            notes: req.notes.map(normalize_optional),
        }
    }
}

/// Query parameters for `GET /api/appliances`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceListQuery {
    #[serde(default)]
    pub status: StatusFilter,
    pub search: Option<String>,
}

/// Appliance with nested records and warranty fields derived at response time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceResponse {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub purchase_date: NaiveDate,
    pub warranty_duration_months: u32,
    pub serial_number: Option<String>,
    pub purchase_location: Option<String>,
    pub notes: Option<String>,
    pub warranty_end_date: NaiveDate,
    /// Display label for `warranty_end_date`, e.g. `"Jan 31, 2024"`.
    pub warranty_end_date_label: String,
    pub warranty_status: WarrantyStatus,
    pub support_contacts: Vec<ContactResponse>,
    pub maintenance_tasks: Vec<TaskResponse>,
    pub linked_documents: Vec<DocumentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EvaluatedAppliance> for ApplianceResponse {
    fn from(evaluated: EvaluatedAppliance) -> Self {
        let EvaluatedAppliance {
            appliance,
            warranty,
        } = evaluated;

        Self {
            id: appliance.id,
            name: appliance.name,
            brand: appliance.brand,
            model: appliance.model,
            purchase_date: appliance.purchase_date,
            warranty_duration_months: appliance.warranty_duration_months,
            serial_number: appliance.serial_number,
            purchase_location: appliance.purchase_location,
            notes: appliance.notes,
            warranty_end_date: warranty.end_date,
            warranty_end_date_label: format_date_label(warranty.end_date),
            warranty_status: warranty.status,
            support_contacts: appliance
                .support_contacts
                .into_iter()
                .map(Into::into)
                .collect(),
            maintenance_tasks: appliance
                .maintenance_tasks
                .into_iter()
                .map(Into::into)
                .collect(),
            linked_documents: appliance
                .linked_documents
                .into_iter()
                .map(Into::into)
                .collect(),
            created_at: appliance.created_at,
            updated_at: appliance.updated_at,
        }
    }
}
