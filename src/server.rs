//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, repository wiring, and the Axum server
//! lifecycle.

use crate::api::middleware::rate_limit::RateLimit;
use crate::application::services::AuthService;
use crate::config::Config;
use crate::domain::clock::SystemClock;
use crate::domain::entities::{NewUser, User};
use crate::infrastructure::persistence::{
    PgApplianceRepository, PgTokenRepository, PgUserRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, Repositories, Storage};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with retry) and migrations, or the
///   in-memory store seeded with the bootstrap owner when no database is
///   configured
/// - Services and shared state
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails after all retries
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (repositories, storage) = match config.database_url.as_deref() {
        Some(url) => {
            let pool = connect_with_retry(&config, url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Migrations applied");

            (postgres_repositories(pool), Storage::Postgres)
        }
        None => {
            tracing::warn!(
                "No database configured; using in-memory storage. Data is lost on restart."
            );
            let repositories = Repositories::in_memory();
            let (owner, token) = bootstrap_owner(
                &repositories,
                &config.token_signing_secret,
                &config.bootstrap_email,
                config.bootstrap_token.clone(),
            )
            .await?;

            if config.bootstrap_token.is_some() {
                tracing::info!(email = %owner.email, "Seeded in-memory owner");
            } else {
                tracing::warn!(
                    email = %owner.email,
                    token = %token,
                    "Seeded in-memory owner with a generated token; set BOOTSTRAP_TOKEN to pin it"
                );
            }

            (repositories, Storage::InMemory)
        }
    };

    let state = AppState::new(
        repositories,
        Arc::new(SystemClock),
        config.token_signing_secret.clone(),
        storage,
    );

    let app = app_router(state, Some(RateLimit::from(&config)));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Creates the owner account and an API token for it.
///
/// Used on a fresh in-memory store, which no other path can populate.
/// Returns the owner with the raw token; `token` of `None` generates one.
pub async fn bootstrap_owner(
    repositories: &Repositories,
    signing_secret: &str,
    email: &str,
    token: Option<String>,
) -> Result<(User, String)> {
    let owner = repositories
        .users
        .create(NewUser::new(email, None))
        .await
        .context("Failed to create bootstrap owner")?;

    let auth = AuthService::new(
        repositories.tokens.clone(),
        repositories.users.clone(),
        signing_secret.to_string(),
    );
    let (raw, _) = auth
        .issue_token(owner.id, "bootstrap", token)
        .await
        .context("Failed to issue bootstrap token")?;

    Ok((owner, raw))
}

/// Builds the PostgreSQL-backed repositories over one shared pool.
pub fn postgres_repositories(pool: PgPool) -> Repositories {
    let pool = Arc::new(pool);
    Repositories {
        appliances: Arc::new(PgApplianceRepository::new(pool.clone())),
        users: Arc::new(PgUserRepository::new(pool.clone())),
        tokens: Arc::new(PgTokenRepository::new(pool)),
    }
}

/// Connects to PostgreSQL, retrying with jittered exponential backoff.
///
/// Makes `DB_CONNECT_RETRIES + 1` attempts in total.
pub async fn connect_with_retry(config: &Config, url: &str) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    // 200ms, 400ms, 800ms, ...
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(config.db_connect_retries);

    let pool = Retry::spawn(strategy, || {
        let options = options.clone();
        async move {
            options.connect(url).await.inspect_err(|e| {
                tracing::warn!(error = %e, "Database connection attempt failed");
            })
        }
    })
    .await
    .context("Failed to connect to database")?;

    Ok(pool)
}

/// Resolves when Ctrl+C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("ctrl_c signal received"),
        _ = terminate => tracing::info!("terminate signal received"),
    }
}
