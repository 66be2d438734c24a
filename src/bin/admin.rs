//! CLI administration tool for link-shortener.
//!
//! Manages user accounts and inspects links and totals without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --username alice
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Delete a user, keeping their links unowned
//! cargo run --bin admin -- user delete alice
//!
//! # Show a user's links
//! cargo run --bin admin -- user links alice
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
//! Same as the server; see [`link_shortener::config`].

use link_shortener::application::services::{AccountService, LinkService, TokenService};
use link_shortener::config::{Config, load_from_env};
use link_shortener::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use link_shortener::server::connect_database;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
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
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Delete a user
    Delete {
        /// Username to delete
        username: String,
    },

    /// List links owned by a user
    Links {
        /// Owner's username
        username: String,
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

type Accounts = AccountService<PgUserRepository>;
type Links = LinkService<PgLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_from_env()?;
    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool, config: &Config) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let tokens = Arc::new(TokenService::new(&config.jwt_secret));
    let accounts = AccountService::new(Arc::new(PgUserRepository::new(pool.clone())), tokens);

    match action {
        UserAction::Create { username, yes } => create_user(&accounts, username, yes).await?,
        UserAction::List => list_users(&accounts).await?,
        UserAction::Delete { username } => delete_user(&accounts, &username).await?,
        UserAction::Links { username } => {
            let links = LinkService::new(
                Arc::new(PgLinkRepository::new(pool)),
                config.public_base_url.clone(),
            );
            list_user_links(&accounts, &links, &username).await?;
        }
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// The password is read without echo, confirmed, and checked against the
/// same policy as `/auth/register`.
async fn create_user(accounts: &Accounts, username: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "Create user".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create user '{}'?", username))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let user = accounts
        .register(&username, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "User created successfully!".green().bold());
    println!("  ID:       {}", user.id.to_string().bright_black());
    println!("  Username: {}", user.username.cyan());
    println!();

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// Users
///
///   ID                                    Username
///   ------------------------------------------------------------
///   7f1c6a2e-5b8d-4c39-9a51-0f3f2d6e8b11  alice
/// ```
async fn list_users(accounts: &Accounts) -> Result<()> {
    println!("{}", "Users".bright_blue().bold());
    println!();

    let users = accounts
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<37} {}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold()
    );
    println!("  {}", "-".repeat(60).bright_black());

    for user in &users {
        println!(
            "  {:<37} {}",
            user.id.to_string().bright_black(),
            user.username.cyan()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a user after confirmation (default: No).
async fn delete_user(accounts: &Accounts, username: &str) -> Result<()> {
    println!("{}", "Delete user".bright_blue().bold());
    println!();

    let user = accounts
        .find_user(username)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Username: {}", user.username.cyan());
    println!("  ID:       {}", user.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Delete this user? Their links stay, without an owner")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    accounts
        .delete_user(username)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    println!();
    println!("{}", "User deleted successfully!".green().bold());
    println!();

    Ok(())
}

/// Lists a user's links with click counts and expiry status.
async fn list_user_links(accounts: &Accounts, links: &Links, username: &str) -> Result<()> {
    let user = accounts
        .find_user(username)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!(
        "{} {}",
        "Links of".bright_blue().bold(),
        user.username.cyan().bold()
    );
    println!();

    let owned = links
        .list_links(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if owned.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<45} {:>7} {:<10} {}",
        "Short URL".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Status".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "-".repeat(90).bright_black());

    let now = Utc::now();
    for link in &owned {
        let status = if link.is_expired_at(now) {
            "EXPIRED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<45} {:>7} {:<10} {}",
            links.short_url(&link.short_id).cyan(),
            link.clicks.to_string().bright_white(),
            status,
            link.long_url.bright_black()
        );
    }

    println!();
    println!("  Total: {}", owned.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Number of users
/// - Number of links, and how many have expired
/// - Total clicks across all links
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
        .fetch_one(pool)
        .await?;

    let expired_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM short_links WHERE expires_at <= NOW()")
            .fetch_one(pool)
            .await?;

    let clicks_count: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM short_links")
            .fetch_one(pool)
            .await?;

    println!(
        "  Users:         {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Expired links: {}",
        expired_count.to_string().bright_yellow().bold()
    );
    println!(
        "  Clicks:        {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
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

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
