//! Database operations for the GymHub `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users`, `roles`, `user_roles` - Accounts and global roles
//! - `gyms`, `gym_admins` - Gyms and their per-gym administrators
//! - `memberships` - Plans offered by a gym
//! - `orders` - Client subscriptions to a plan, approved by a gym admin
//! - `events` - Members-only gym events
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p gymhub-cli -- migrate
//! ```

pub mod analytics;
pub mod events;
pub mod gym_admins;
pub mod gyms;
pub mod memberships;
pub mod orders;
pub mod roles;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use analytics::AnalyticsRepository;
pub use events::EventRepository;
pub use gym_admins::GymAdminRepository;
pub use gyms::GymRepository;
pub use memberships::MembershipRepository;
pub use orders::OrderRepository;
pub use roles::RoleRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unique constraint violation (e.g., duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// Foreign key violation: the row is still referenced, or a parent is missing.
    #[error("{0}")]
    Referenced(String),
}

/// Map a `23505` unique violation to [`RepositoryError::Conflict`].
pub(crate) fn on_unique_violation(err: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(err)
}

/// Map a `23503` foreign key violation to [`RepositoryError::Referenced`].
pub(crate) fn on_foreign_key_violation(err: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::Referenced(message.to_owned());
    }
    RepositoryError::Database(err)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    pool_options().connect(database_url.expose_secret()).await
}

/// Create a pool that connects on first use.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL cannot be parsed.
pub fn create_lazy_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    pool_options().connect_lazy(database_url.expose_secret())
}

fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
}
