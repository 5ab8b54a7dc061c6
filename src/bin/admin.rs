//! CLI administration tool for appliance-buddy.
//!
//! Provides commands for managing users and API tokens, viewing statistics,
//! checking warranty dates, and performing database operations without
//! requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user and issue a token for it
//! cargo run --bin admin -- user create --email me@example.com
//! cargo run --bin admin -- token create --user me@example.com
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Laptop"
//!
//! # Evaluate a warranty (no database needed)
//! cargo run --bin admin -- warranty --purchase-date 2024-01-31 --months 1
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection
//! - `TOKEN_SIGNING_SECRET` (required): must match the server's value so
//!   issued tokens authenticate

use appliance_buddy::application::services::AuthService;
use appliance_buddy::config::{self, Config, mask_connection_string};
use appliance_buddy::domain::entities::NewUser;
use appliance_buddy::domain::repositories::{TokenRepository, UserRepository};
use appliance_buddy::domain::warranty::{
    WarrantyStatus, WarrantySummary, format_date_label, warranty_end_date, warranty_status_on,
};
use appliance_buddy::infrastructure::persistence::{PgTokenRepository, PgUserRepository};
use appliance_buddy::server::connect_with_retry;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing appliance-buddy.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Compute a warranty end date and status
    Warranty {
        /// Purchase date (YYYY-MM-DD)
        #[arg(short, long)]
        purchase_date: NaiveDate,

        /// Warranty length in months
        #[arg(short, long)]
        months: u32,

        /// Evaluate as of this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        on: Option<NaiveDate>,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        #[arg(short, long)]
        email: String,

        /// Display name (defaults to the part of the email before '@')
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List all users
    List,
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new API token for a user
    Create {
        /// Email of the user the token acts as
        #[arg(short, long)]
        user: String,

        /// Token name (e.g., "Laptop", "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Warranty {
            purchase_date,
            months,
            on,
        } => show_warranty(purchase_date, months, on)?,
        Commands::User { action } => {
            let db = Database::connect().await?;
            handle_user_action(action, &db.pool).await?
        }
        Commands::Token { action } => {
            let db = Database::connect().await?;
            handle_token_action(action, &db.pool, &db.config).await?
        }
        Commands::Stats => {
            let db = Database::connect().await?;
            handle_stats(&db.pool).await?
        }
        Commands::Db { action } => {
            let db = Database::connect().await?;
            handle_db_action(action, &db.pool, &db.url).await?
        }
    }

    Ok(())
}

/// Loaded configuration plus an open pool.
struct Database {
    config: Config,
    url: String,
    pool: PgPool,
}

impl Database {
    async fn connect() -> Result<Self> {
        let config = config::load_from_env()?;
        let url = config
            .database_url
            .clone()
            .context("DATABASE_URL (or DB_HOST/DB_USER/DB_PASSWORD/DB_NAME) must be set")?;
        let pool = connect_with_retry(&config, &url).await?;

        Ok(Self { config, url, pool })
    }
}

/// Prints the end date and status of a single warranty.
fn show_warranty(purchase_date: NaiveDate, months: u32, on: Option<NaiveDate>) -> Result<()> {
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }

    let today = on.unwrap_or_else(|| Utc::now().date_naive());
    let end_date = warranty_end_date(purchase_date, months);
    let status = warranty_status_on(purchase_date, months, today);

    println!("{}", "🛡️  Warranty".bright_blue().bold());
    println!();
    println!("  Purchased: {}", format_date_label(purchase_date).cyan());
    println!("  Length:    {} months", months.to_string().cyan());
    println!("  Ends:      {}", format_date_label(end_date).bright_white().bold());
    println!("  As of:     {}", format_date_label(today).bright_black());

    let label = match status {
        WarrantyStatus::Active => status.label().green(),
        WarrantyStatus::ExpiringSoon => status.label().yellow(),
        WarrantyStatus::Expired => status.label().red(),
    };
    println!("  Status:    {}", label.bold());
    println!();

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::Create { email, name } => {
            let user = repo
                .create(NewUser::new(&email, name.as_deref()))
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

            println!("{}", "✅ User created".green().bold());
            println!("  ID:    {}", user.id.to_string().bright_black());
            println!("  Email: {}", user.email.cyan());
            println!("  Name:  {}", user.name.cyan());
            println!();
        }
        UserAction::List => {
            println!("{}", "👤 Users".bright_blue().bold());
            println!();

            let users = repo
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

            if users.is_empty() {
                println!("{}", "  No users found".yellow());
                return Ok(());
            }

            for user in &users {
                println!(
                    "  {}  {:<32} {}",
                    user.id.to_string().bright_black(),
                    user.email.cyan(),
                    user.name
                );
            }
            println!();
            println!("  Total: {}", users.len().to_string().bright_white().bold());
            println!();
        }
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool, config: &Config) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let tokens = Arc::new(PgTokenRepository::new(pool.clone()));
    let users = Arc::new(PgUserRepository::new(pool));

    match action {
        TokenAction::Create {
            user,
            name,
            token,
            yes,
        } => {
            let auth = AuthService::new(
                tokens,
                users.clone(),
                config.token_signing_secret.clone(),
            );
            create_token(&auth, users, user, name, token, yes).await?;
        }
        TokenAction::List => {
            list_tokens(tokens).await?;
        }
        TokenAction::Revoke { name_or_id } => {
            revoke_token(tokens, name_or_id).await?;
        }
    }

    Ok(())
}

/// Issues a new API token for a user with interactive prompts.
///
/// Only the HMAC of the token is stored; the raw value is shown once.
async fn create_token(
    auth: &AuthService<PgTokenRepository, PgUserRepository>,
    users: Arc<PgUserRepository>,
    email: String,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let user = users
        .find_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No user with email '{email}'"))?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Laptop")
            .interact_text()?,
    };

    if token.is_some() {
        println!("{}", "⚠️  Using provided token value".yellow());
    }

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  User: {}", user.email.cyan());
    println!("  Name: {}", token_name.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let (raw, record) = auth
        .issue_token(user.id, &token_name, token)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!("  ID:    {}", record.id.to_string().bright_black());
    println!("  Token: {}", raw.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3001/api/appliances",
        raw.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create --user <email>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<24} {:<20} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(84).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<4} {:<24} {:<20} {:<20} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// Numeric input is looked up as an ID, anything else as an exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_name(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let token = token.context("Token not found")?;

    if token.is_revoked() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics, including warranty buckets across all users.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let tokens_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    let rows: Vec<(NaiveDate, i32)> =
        sqlx::query_as("SELECT purchase_date, warranty_duration_months FROM appliances")
            .fetch_all(pool)
            .await?;

    let terms = rows
        .into_iter()
        .map(|(purchase_date, months)| {
            u32::try_from(months)
                .map(|months| (purchase_date, months))
                .context("Negative warranty duration in database")
        })
        .collect::<Result<Vec<_>>>()?;

    let today = Utc::now().date_naive();
    let summary = WarrantySummary::tally(&terms, today);

    println!(
        "  Users:          {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens:  {}",
        tokens_count.to_string().bright_green().bold()
    );
    println!(
        "  Appliances:     {}",
        summary.total.to_string().bright_green().bold()
    );
    println!(
        "    Active:        {}",
        summary.active.to_string().green()
    );
    println!(
        "    Expiring soon: {}",
        summary.expiring.to_string().yellow()
    );
    println!(
        "    Expired:       {}",
        summary.expired.to_string().red()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  URL:        {}", mask_connection_string(database_url).bright_black());
            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
