//! GymHub CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! gymhub-cli migrate
//!
//! # Create the first super admin
//! gymhub-cli user create -e owner@example.com -n "Owner Name" -r super_admin -p 'long-password'
//!
//! # Grant a global role to an existing user
//! gymhub-cli user grant -e coach@example.com -r gym_admin
//!
//! # Insert the role reference data (idempotent)
//! gymhub-cli seed
//! ```
//!
//! All commands read `GYMHUB_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gymhub-cli")]
#[command(author, version, about = "GymHub CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Insert role reference data
    Seed,
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user holding a role
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Full name
        #[arg(short, long)]
        name: String,

        /// Role (`client`, `gym_admin`, `super_admin`)
        #[arg(short, long, default_value = "client")]
        role: String,

        /// Password; without one the account cannot log in
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Grant a global role to an existing user
    Grant {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Role (`client`, `gym_admin`, `super_admin`)
        #[arg(short, long)]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                role,
                password,
            } => {
                commands::user::create(&email, &name, &role, password.as_deref()).await?;
            }
            UserAction::Grant { email, role } => commands::user::grant(&email, &role).await?,
        },
        Commands::Seed => commands::seed::roles().await?,
    }
    Ok(())
}
