//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ApplianceService, AuthService};
use crate::domain::clock::Clock;
use crate::domain::repositories::{ApplianceRepository, TokenRepository, UserRepository};
use crate::infrastructure::memory::{
    InMemoryApplianceRepository, InMemoryTokenRepository, InMemoryUserRepository,
};

pub type DynApplianceService = ApplianceService<dyn ApplianceRepository>;
pub type DynAuthService = AuthService<dyn TokenRepository, dyn UserRepository>;

/// Which backing store the state was built on, reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    InMemory,
}

impl Storage {
    pub fn as_str(self) -> &'static str {
        match self {
            Storage::Postgres => "postgres",
            Storage::InMemory => "in-memory",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub appliance_service: Arc<DynApplianceService>,
    pub auth_service: Arc<DynAuthService>,
    pub storage: Storage,
}

/// Repository handles the state is assembled from.
pub struct Repositories {
    pub appliances: Arc<dyn ApplianceRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

impl Repositories {
    /// Fresh, empty process-local repositories.
    pub fn in_memory() -> Self {
        Self {
            appliances: Arc::new(InMemoryApplianceRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            tokens: Arc::new(InMemoryTokenRepository::new()),
        }
    }
}

impl AppState {
    pub fn new(
        repositories: Repositories,
        clock: Arc<dyn Clock>,
        token_signing_secret: String,
        storage: Storage,
    ) -> Self {
        let Repositories {
            appliances,
            users,
            tokens,
        } = repositories;

        Self {
            appliance_service: Arc::new(ApplianceService::new(appliances, clock)),
            auth_service: Arc::new(AuthService::new(tokens, users, token_signing_secret)),
            storage,
        }
    }
}
