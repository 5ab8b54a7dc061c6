//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod appliances;
pub mod contacts;
pub mod documents;
pub mod health;
pub mod me;
pub mod tasks;

pub use appliances::{
    appliance_stats_handler, create_appliance_handler, delete_appliance_handler,
    get_appliance_handler, list_appliances_handler, update_appliance_handler,
};
pub use contacts::{create_contact_handler, delete_contact_handler};
pub use documents::{create_document_handler, delete_document_handler};
pub use health::health_handler;
pub use me::me_handler;
pub use tasks::{create_task_handler, delete_task_handler, update_task_handler};
