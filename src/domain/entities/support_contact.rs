//! Support contact attached to an appliance.

use uuid::Uuid;

/// Someone to call about an appliance: manufacturer support, an installer,
/// a repair shop.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportContact {
    pub id: Uuid,
    pub appliance_id: Uuid,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
}

/// Input data for adding a support contact.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupportContact {
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
}

impl SupportContact {
    pub fn from_new(id: Uuid, appliance_id: Uuid, new: NewSupportContact) -> Self {
        Self {
            id,
            appliance_id,
            name: new.name,
            company: new.company,
            phone: new.phone,
            email: new.email,
            website: new.website,
            notes: new.notes,
        }
    }
}
