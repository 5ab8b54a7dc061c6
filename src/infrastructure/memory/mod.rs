//! Process-local repository implementations.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Data lives behind a `tokio::sync::RwLock` and is lost on restart.

pub mod appliance_store;
pub mod token_store;
pub mod user_store;

pub use appliance_store::InMemoryApplianceRepository;
pub use token_store::InMemoryTokenRepository;
pub use user_store::InMemoryUserRepository;
