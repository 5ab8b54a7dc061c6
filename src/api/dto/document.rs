//! DTOs for linked document endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{non_blank, trimmed};
use crate::domain::entities::{DocumentType, LinkedDocument, NewLinkedDocument};

/// Request body for `POST /api/appliances/{id}/documents`.
///
/// Only a link is stored; files themselves live elsewhere.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDocumentRequest {
    #[validate(length(max = 200), custom(function = "non_blank"))]
    pub title: String,

    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    #[serde(default)]
    pub document_type: DocumentType,
}

impl From<CreateDocumentRequest> for NewLinkedDocument {
    fn from(req: CreateDocumentRequest) -> Self {
        NewLinkedDocument {
            title: trimmed(req.title),
            url: req.url.trim().to_string(),
            document_type: req.document_type,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub document_type: DocumentType,
}

impl From<LinkedDocument> for DocumentResponse {
    fn from(d: LinkedDocument) -> Self {
        Self {
            id: d.id,
            title: d.title,
            url: d.url,
            document_type: d.document_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_type_defaults_to_other() {
        let req: CreateDocumentRequest = serde_json::from_value(json!({
            "title": "Manual",
            "url": "https://example.com/manual.pdf"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.document_type, DocumentType::Other);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let req: CreateDocumentRequest =
            serde_json::from_value(json!({ "title": "Manual", "url": "manual.pdf" })).unwrap();
        assert!(req.validate().is_err());
    }
}
