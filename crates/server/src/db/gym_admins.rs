//! Per-gym administrator assignments.

use sqlx::PgPool;

use gymhub_core::{Email, GymId, RoleName, UserId};

use super::RepositoryError;
use super::roles::grant_role;
use crate::models::{AdminAssignment, AssignmentOutcome};

#[derive(Debug, sqlx::FromRow)]
struct AssignmentRow {
    user_id: UserId,
    gym_id: GymId,
    user_name: String,
    user_email: Email,
    gym_name: String,
}

impl From<AssignmentRow> for AdminAssignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            user_id: row.user_id,
            gym_id: row.gym_id,
            user_name: row.user_name,
            user_email: row.user_email,
            gym_name: row.gym_name,
        }
    }
}

/// Repository for the `gym_admins` join table.
pub struct GymAdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GymAdminRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether `user_id` administers `gym_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_admin(&self, user_id: UserId, gym_id: GymId) -> Result<bool, RepositoryError> {
        let assigned: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM gym_admins WHERE user_id = $1 AND gym_id = $2)",
        )
        .bind(user_id)
        .bind(gym_id)
        .fetch_one(self.pool)
        .await?;

        Ok(assigned)
    }

    /// Make a user the admin of a gym.
    ///
    /// Grants the global `gym_admin` role and inserts the assignment in one
    /// transaction. Both inserts are idempotent; `inserted` reports whether
    /// the assignment row is new.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user or the gym does not exist.
    pub async fn assign(
        &self,
        user_id: UserId,
        gym_id: GymId,
    ) -> Result<AssignmentOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user_exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        if !user_exists {
            return Err(RepositoryError::NotFound("User"));
        }

        let gym_exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM gyms WHERE id = $1)")
            .bind(gym_id)
            .fetch_one(&mut *tx)
            .await?;
        if !gym_exists {
            return Err(RepositoryError::NotFound("Gym"));
        }

        grant_role(&mut *tx, user_id, RoleName::GymAdmin).await?;

        let inserted = sqlx::query(
            r"
            INSERT INTO gym_admins (user_id, gym_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(gym_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        tx.commit().await?;

        Ok(AssignmentOutcome {
            user_id,
            gym_id,
            inserted,
        })
    }

    /// Remove an assignment. The user keeps the global `gym_admin` role.
    ///
    /// Returns whether a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(&self, user_id: UserId, gym_id: GymId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM gym_admins WHERE user_id = $1 AND gym_id = $2")
            .bind(user_id)
            .bind(gym_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All assignments with user and gym names, ordered by gym then user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<AdminAssignment>, RepositoryError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r"
            SELECT ga.user_id, ga.gym_id,
                   u.full_name AS user_name, u.email AS user_email,
                   g.name AS gym_name
            FROM gym_admins ga
            JOIN users u ON u.id = ga.user_id
            JOIN gyms g ON g.id = ga.gym_id
            ORDER BY g.name, u.full_name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(AdminAssignment::from).collect())
    }
}
