//! Appliance entity and its warranty inputs.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::{LinkedDocument, MaintenanceTask, SupportContact};
use crate::domain::warranty::{WarrantyStatus, WarrantyTerms};
use crate::utils::text::contains_ignore_case;

/// A household appliance owned by a user, with its nested records.
#[derive(Debug, Clone, PartialEq)]
pub struct Appliance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub purchase_date: NaiveDate,
    pub warranty_duration_months: u32,
    pub serial_number: Option<String>,
    pub purchase_location: Option<String>,
    pub notes: Option<String>,
    pub support_contacts: Vec<SupportContact>,
    pub maintenance_tasks: Vec<MaintenanceTask>,
    pub linked_documents: Vec<LinkedDocument>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appliance {
    /// Builds an appliance from a creation request, without nested records.
    pub fn from_new(id: Uuid, new: NewAppliance, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            name: new.name,
            brand: new.brand,
            model: new.model,
            purchase_date: new.purchase_date,
            warranty_duration_months: new.warranty_duration_months,
            serial_number: new.serial_number,
            purchase_location: new.purchase_location,
            notes: new.notes,
            support_contacts: Vec::new(),
            maintenance_tasks: Vec::new(),
            linked_documents: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if name, brand, or model contains `needle` (case-insensitive).
    pub fn matches_search(&self, needle: &str) -> bool {
        [&self.name, &self.brand, &self.model]
            .iter()
            .any(|field| contains_ignore_case(field, needle))
    }

    /// Derived warranty fields as of `today`.
    pub fn warranty_on(&self, today: NaiveDate) -> Warranty {
        Warranty {
            end_date: self.warranty_end_date(),
            status: self.warranty_status_on(today),
        }
    }
}

impl WarrantyTerms for Appliance {
    fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    fn warranty_duration_months(&self) -> u32 {
        self.warranty_duration_months
    }
}

/// Warranty end date and status computed for a single appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warranty {
    pub end_date: NaiveDate,
    pub status: WarrantyStatus,
}

/// Input data for creating a new appliance.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppliance {
    pub user_id: Uuid,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub purchase_date: NaiveDate,
    pub warranty_duration_months: u32,
    pub serial_number: Option<String>,
    pub purchase_location: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for an existing appliance.
///
/// `None` fields are left unchanged. For the optional text fields,
/// `Some(None)` clears the value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliancePatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_duration_months: Option<u32>,
    pub serial_number: Option<Option<String>>,
    pub purchase_location: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl AppliancePatch {
    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch in place and bumps `updated_at`.
    pub fn apply_to(self, appliance: &mut Appliance, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            appliance.name = name;
        }
        if let Some(brand) = self.brand {
            appliance.brand = brand;
        }
        if let Some(model) = self.model {
            appliance.model = model;
        }
        if let Some(purchase_date) = self.purchase_date {
            appliance.purchase_date = purchase_date;
        }
        if let Some(months) = self.warranty_duration_months {
            appliance.warranty_duration_months = months;
        }
        if let Some(serial_number) = self.serial_number {
            appliance.serial_number = serial_number;
        }
        if let Some(purchase_location) = self.purchase_location {
            appliance.purchase_location = purchase_location;
        }
        if let Some(notes) = self.notes {
            appliance.notes = notes;
        }
        appliance.updated_at = now;
    }
}
