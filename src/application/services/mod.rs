//! Business logic services for the application layer.

pub mod appliance_service;
pub mod auth_service;

pub use appliance_service::{ApplianceQuery, ApplianceService, EvaluatedAppliance};
pub use auth_service::{AuthService, AuthUser};
