//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. The only derived data, warranty end
//! date and status, comes from [`crate::domain::warranty`].
//!
//! # Entity Types
//!
//! - [`Appliance`] - An appliance with its warranty inputs and nested records
//! - [`SupportContact`] - Who to call about an appliance
//! - [`MaintenanceTask`] - Scheduled upkeep
//! - [`LinkedDocument`] - Link to a manual, receipt, or warranty card
//! - [`User`] - Owner of appliances
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewAppliance`, `NewSupportContact`, `NewMaintenanceTask`,
//!   `NewLinkedDocument`, `NewUser` - For creating new records
//! - `AppliancePatch`, `MaintenanceTaskPatch` - For partial updates

pub mod appliance;
pub mod linked_document;
pub mod maintenance_task;
pub mod support_contact;
pub mod user;

pub use appliance::{Appliance, AppliancePatch, NewAppliance, Warranty};
pub use linked_document::{DocumentType, LinkedDocument, NewLinkedDocument};
pub use maintenance_task::{
    MaintenanceTask, MaintenanceTaskPatch, NewMaintenanceTask, ServiceProvider, TaskFrequency,
    TaskStatus,
};
pub use support_contact::{NewSupportContact, SupportContact};
pub use user::{NewUser, User};
