//! Linked document (manual, receipt, warranty card) for an appliance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of document a link points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentType {
    Manual,
    Warranty,
    Receipt,
    #[default]
    Other,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Warranty => "Warranty",
            Self::Receipt => "Receipt",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manual" => Ok(Self::Manual),
            "Warranty" => Ok(Self::Warranty),
            "Receipt" => Ok(Self::Receipt),
            "Other" => Ok(Self::Other),
            other => Err(format!("Unknown document type: {other}")),
        }
    }
}

/// A titled link to an externally hosted document.
///
/// Only the URL is stored; the file itself lives wherever the user put it.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedDocument {
    pub id: Uuid,
    pub appliance_id: Uuid,
    pub title: String,
    pub url: String,
    pub document_type: DocumentType,
}

/// Input data for linking a document.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLinkedDocument {
    pub title: String,
    pub url: String,
    pub document_type: DocumentType,
}

impl LinkedDocument {
    pub fn from_new(id: Uuid, appliance_id: Uuid, new: NewLinkedDocument) -> Self {
        Self {
            id,
            appliance_id,
            title: new.title,
            url: new.url,
            document_type: new.document_type,
        }
    }
}
