//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gymhub_core::{Email, RoleName, UserId};

use super::RepositoryError;
use super::roles::grant_role;
use crate::models::{User, UserSummary};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    email: String,
    full_name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email,
            full_name: row.full_name,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: UserId,
    email: Email,
    full_name: String,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, full_name, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Get a user and their password hash by email.
    ///
    /// The hash is `None` for accounts created without a password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<(User, Option<String>)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r"
            SELECT id, email, full_name, created_at, password_hash
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Ok((User::try_from(r.user)?, r.password_hash)))
            .transpose()
    }

    /// Create a user holding `role`, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_role(
        &self,
        email: &Email,
        full_name: &str,
        password_hash: Option<&str>,
        role: RoleName,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (email, full_name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, full_name, created_at
            ",
        )
        .bind(email.as_str())
        .bind(full_name)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| super::on_unique_violation(e, "User with this email already exists."))?;

        let user = User::try_from(row)?;

        if !grant_role(&mut *tx, user.id, role).await? {
            tracing::warn!(user_id = %user.id, %role, "Role row missing; user created without it");
        }

        tx.commit().await?;

        Ok(user)
    }

    /// Update a user's display name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    pub async fn update_full_name(
        &self,
        id: UserId,
        full_name: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET full_name = $2
            WHERE id = $1
            RETURNING id, email, full_name, created_at
            ",
        )
        .bind(id)
        .bind(full_name)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound("User"))?;

        User::try_from(row)
    }

    /// List every user, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_summaries(&self) -> Result<Vec<UserSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r"
            SELECT id, email, full_name
            FROM users
            ORDER BY full_name, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| UserSummary {
                id: r.id,
                email: r.email,
                full_name: r.full_name,
            })
            .collect())
    }
}
