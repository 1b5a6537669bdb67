//! CLI administration tool for shortlink.
//!
//! Issues and revokes the API tokens that map callers to owners, and offers
//! a few read-only views of the database.
//!
//! # Usage
//!
//! ```bash
//! # Issue a token for owner "alice"
//! cargo run --bin admin -- token create --owner alice --name laptop
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token by name or id
//! cargo run --bin admin -- token revoke laptop
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
//! - `DATABASE_URL` or `DB_*` (required): PostgreSQL connection
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server

use shortlink::application::services::AuthService;
use shortlink::application::services::auth_service::generate_token;
use shortlink::config::Config;
use shortlink::domain::entities::OwnerId;
use shortlink::domain::repositories::TokenRepository;
use shortlink::infrastructure::persistence::PgTokenRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new API token for an owner
    Create {
        /// Owner identity the token resolves to
        #[arg(short, long)]
        owner: Option<String>,

        /// Token name (e.g., "laptop", "ci")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (auto-generated if not provided)
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

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            owner,
            name,
            token,
            yes,
        } => {
            let secret = std::env::var("TOKEN_SIGNING_SECRET")
                .ok()
                .filter(|s| !s.is_empty())
                .context("TOKEN_SIGNING_SECRET must be set to issue tokens")?;
            let auth = AuthService::new(repo, secret);
            create_token(&auth, owner, name, token, yes).await?;
        }
        TokenAction::List => list_tokens(repo.as_ref()).await?,
        TokenAction::Revoke { name_or_id } => revoke_token(repo.as_ref(), name_or_id).await?,
    }

    Ok(())
}

/// Issues a token with interactive prompts.
///
/// Only the HMAC of the token is stored; the raw value is shown once.
async fn create_token(
    auth: &AuthService,
    owner: Option<String>,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Issue API Token".bright_blue().bold());
    println!();

    let owner = match owner {
        Some(o) => o,
        None => Input::new().with_prompt("Owner id").interact_text()?,
    };
    if owner.trim().is_empty() {
        anyhow::bail!("Owner id must not be empty");
    }
    let owner = OwnerId::new(owner.trim());

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text(format!("{owner}-token"))
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "Using provided token value".yellow());
            t
        }
        None => generate_token(),
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Owner: {}", owner.as_str().cyan());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    auth.issue_token(&token_name, &owner, &token_value)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "Token created successfully!".green().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/user/urls",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
///
/// ```text
///   ID  Name                 Owner                Created              Status
///   1   laptop               alice                2025-01-15 10:30     ACTIVE
/// ```
async fn list_tokens(repo: &dyn TokenRepository) -> Result<()> {
    println!("{}", "API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<20} {:<20} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Owner".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "-".repeat(80).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<4} {:<20} {:<20} {:<20} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.owner_id.as_str(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
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

/// Revokes a token by name or ID after confirmation.
///
/// Numeric input is looked up as an ID, anything else as an exact name.
async fn revoke_token(repo: &dyn TokenRepository, name_or_id: String) -> Result<()> {
    println!("{}", "Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_name(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    .context("Token not found")?;

    if token.is_revoked() {
        println!("{}", "This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  Owner: {}", token.owner_id.as_str().cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays link, click and token counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let active_links_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
        .fetch_one(pool)
        .await?;

    let tokens_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Active links:  {}",
        active_links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        tokens_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Applied migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
