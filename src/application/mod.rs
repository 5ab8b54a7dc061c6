//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::appliance_service::ApplianceService`] - Appliance CRUD, nested
//!   records, and warranty status evaluation
//! - [`services::auth_service::AuthService`] - Per-user API token authentication

pub mod services;
