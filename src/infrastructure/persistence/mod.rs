//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row structs. Schema lives in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgApplianceRepository`] - Appliances with contacts, tasks, and documents
//! - [`PgUserRepository`] - User accounts
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_appliance_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_appliance_repository::PgApplianceRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
