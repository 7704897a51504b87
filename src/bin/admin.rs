//! CLI administration tool for bloglist.
//!
//! Provides commands for managing users, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --username mluukkai
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Generate a JWT_SECRET value
//! cargo run --bin admin -- secret generate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required except for `secret generate`): PostgreSQL connection string

use bloglist::application::services::{StatsService, UserService};
use bloglist::domain::entities::Registration;
use bloglist::infrastructure::cache::NullCache;
use bloglist::infrastructure::persistence::{PgPostRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use rand::Rng;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing bloglist.
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

    /// Show post statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Signing secret helpers
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name (at least 3 characters)
        #[arg(short, long)]
        username: Option<String>,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users with their post counts
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// Secret subcommands.
#[derive(Subcommand)]
enum SecretAction {
    /// Print a random 32-byte hex secret suitable for JWT_SECRET
    Generate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Secret {
        action: SecretAction::Generate,
    } = cli.command
    {
        println!("{}", generate_secret());
        return Ok(());
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Secret { .. } => {}
    }

    Ok(())
}

fn user_service(pool: &PgPool) -> UserService<PgUserRepository, PgPostRepository> {
    let pool = Arc::new(pool.clone());
    UserService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgPostRepository::new(pool)),
    )
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let service = user_service(pool);

    match action {
        UserAction::Create {
            username,
            name,
            yes,
        } => create_user(&service, username, name, yes).await?,
        UserAction::List => list_users(&service).await?,
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// The password is always read from a hidden prompt and stored as an
/// Argon2 hash. Validation rules match `POST /api/users`.
async fn create_user(
    service: &UserService<PgUserRepository, PgPostRepository>,
    username: Option<String>,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Name")
            .allow_empty(true)
            .interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!("  Name:     {}", name.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = service
        .register(Registration {
            username,
            name,
            password,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ User created successfully!".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -X POST -H 'Content-Type: application/json' \\\n    -d '{{\"username\":\"{}\",\"password\":\"...\"}}' http://localhost:3001/api/login",
        user.username.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Username             Name                           Posts
///   ─────────────────────────────────────────────────────────────
///   1   mluukkai             Matti Luukkainen               3
/// ```
async fn list_users(service: &UserService<PgUserRepository, PgPostRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = service
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
        "  {:<3} {:<20} {:<30} {:<5}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Name".bright_white().bold(),
        "Posts".bright_white().bold()
    );
    println!("  {}", "─".repeat(61).bright_black());

    for entry in &users {
        println!(
            "  {:<3} {:<20} {:<30} {}",
            entry.user.id.to_string().bright_black(),
            entry.user.username.cyan(),
            entry.user.name,
            entry.posts.len().to_string().bright_white()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays the post summary: totals, favorite post and top authors.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repository = Arc::new(PgPostRepository::new(Arc::new(pool.clone())));
    let stats = StatsService::new(repository, Arc::new(NullCache::new()));

    let summary = stats
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to compute statistics: {}", e))?;

    println!(
        "  Posts:        {}",
        summary.post_count.to_string().bright_green().bold()
    );
    println!(
        "  Total likes:  {}",
        summary.total_likes.to_string().bright_green().bold()
    );

    match summary.favorite {
        Some(post) => println!(
            "  Favorite:     {} by {} ({} likes)",
            post.title.cyan(),
            post.author,
            post.likes.to_string().bright_green()
        ),
        None => println!("  Favorite:     {}", "-".bright_black()),
    }

    match summary.most_blogs {
        Some(top) => println!(
            "  Most posts:   {} ({})",
            top.author.cyan(),
            top.blogs.to_string().bright_green()
        ),
        None => println!("  Most posts:   {}", "-".bright_black()),
    }

    match summary.most_likes {
        Some(top) => println!(
            "  Most likes:   {} ({})",
            top.author.cyan(),
            top.likes.to_string().bright_green()
        ),
        None => println!("  Most likes:   {}", "-".bright_black()),
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
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
            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;
            let posts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_white());
            println!("  Posts:      {}", posts.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a random signing secret.
///
/// 32 bytes from the thread-local CSPRNG, hex-encoded (64 characters).
fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}
