//! DTOs for support contact endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{non_blank, optional_email, optional_url, trimmed};
use crate::domain::entities::{NewSupportContact, SupportContact};
use crate::utils::text::normalize_optional;

/// Request body for `POST /api/appliances/{id}/contacts`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateContactRequest {
    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub name: String,

    #[validate(length(max = 200))]
    pub company: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(custom(function = "optional_email"))]
    pub email: Option<String>,

    #[validate(custom(function = "optional_url"))]
    pub website: Option<String>,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

impl From<CreateContactRequest> for NewSupportContact {
    fn from(req: CreateContactRequest) -> Self {
        NewSupportContact {
            name: trimmed(req.name),
            company: normalize_optional(req.company),
            phone: normalize_optional(req.phone),
            email: normalize_optional(req.email),
            website: normalize_optional(req.website),
            notes: normalize_optional(req.notes),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<SupportContact> for ContactResponse {
    fn from(c: SupportContact) -> Self {
        Self {
            id: c.id,
            name: c.name,
            company: c.company,
            phone: c.phone,
            email: c.email,
            website: c.website,
            notes: c.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_email_rejected() {
        let req: CreateContactRequest =
            serde_json::from_value(json!({ "name": "Acme Support", "email": "not-an-email" }))
                .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blank_optional_fields_accepted() {
        let req: CreateContactRequest = serde_json::from_value(
            json!({ "name": "Acme Support", "email": "", "website": "  " }),
        )
        .unwrap();
        assert!(req.validate().is_ok());

        let new = NewSupportContact::from(req);
        assert_eq!(new.email, None);
        assert_eq!(new.website, None);
    }

    #[test]
    fn test_valid_contact() {
        let req: CreateContactRequest = serde_json::from_value(json!({
            "name": "Acme Support",
            "phone": "+1 555 0100",
            "website": "https://support.example.com"
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let new = NewSupportContact::from(req);
        assert_eq!(new.company, None);
        assert_eq!(new.phone.as_deref(), Some("+1 555 0100"));
    }
}
