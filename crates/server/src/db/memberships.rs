//! Membership plan repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gymhub_core::input::{MembershipChanges, NewMembership};
use gymhub_core::{GymId, MembershipId, Price};

use super::RepositoryError;
use crate::models::Membership;

#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: MembershipId,
    gym_id: GymId,
    name: String,
    description: Option<String>,
    price: Price,
    duration: Option<String>,
    duration_days: Option<i32>,
    created_at: DateTime<Utc>,
}

impl From<MembershipRow> for Membership {
    fn from(row: MembershipRow) -> Self {
        Self {
            id: row.id,
            gym_id: row.gym_id,
            name: row.name,
            description: row.description,
            price: row.price,
            duration: row.duration,
            duration_days: row.duration_days,
            created_at: row.created_at,
        }
    }
}

/// Repository for membership plan operations.
///
/// Writes are scoped by gym: a plan is only visible to updates and deletes
/// issued for the gym that owns it.
pub struct MembershipRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MembershipRepository<'a> {
    /// Create a new membership repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Plans of a gym, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_gym(&self, gym_id: GymId) -> Result<Vec<Membership>, RepositoryError> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r"
            SELECT id, gym_id, name, description, price, duration, duration_days, created_at
            FROM memberships
            WHERE gym_id = $1
            ORDER BY price, id
            ",
        )
        .bind(gym_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Membership::from).collect())
    }

    /// Get a plan by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: MembershipId) -> Result<Option<Membership>, RepositoryError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r"
            SELECT id, gym_id, name, description, price, duration, duration_days, created_at
            FROM memberships
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Membership::from))
    }

    /// Insert a plan for a gym.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the gym does not exist.
    pub async fn create(
        &self,
        gym_id: GymId,
        plan: &NewMembership,
    ) -> Result<Membership, RepositoryError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r"
            INSERT INTO memberships (gym_id, name, description, price, duration, duration_days)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, gym_id, name, description, price, duration, duration_days, created_at
            ",
        )
        .bind(gym_id)
        .bind(&plan.name)
        .bind(plan.description.as_deref())
        .bind(plan.price)
        .bind(plan.duration.as_deref())
        .bind(plan.duration_days)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match super::on_foreign_key_violation(e, "gym does not exist") {
            RepositoryError::Referenced(_) => RepositoryError::NotFound("Gym"),
            other => other,
        })?;

        Ok(Membership::from(row))
    }

    /// Apply a partial update to one of the gym's plans.
    ///
    /// Existing orders keep their price and dates; only future orders and
    /// approvals see the new values.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the plan does not belong to the gym.
    pub async fn update(
        &self,
        gym_id: GymId,
        id: MembershipId,
        changes: &MembershipChanges,
    ) -> Result<Membership, RepositoryError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r"
            UPDATE memberships SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                duration = COALESCE($6, duration),
                duration_days = COALESCE($7, duration_days)
            WHERE id = $1 AND gym_id = $2
            RETURNING id, gym_id, name, description, price, duration, duration_days, created_at
            ",
        )
        .bind(id)
        .bind(gym_id)
        .bind(changes.name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.price)
        .bind(changes.duration.as_deref())
        .bind(changes.duration_days)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound("Membership"))?;

        Ok(Membership::from(row))
    }

    /// Delete one of the gym's plans.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Referenced` if any order points at the plan.
    /// Returns `RepositoryError::NotFound` if the plan does not belong to the gym.
    pub async fn delete(&self, gym_id: GymId, id: MembershipId) -> Result<(), RepositoryError> {
        let deleted = sqlx::query("DELETE FROM memberships WHERE id = $1 AND gym_id = $2")
            .bind(id)
            .bind(gym_id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                super::on_foreign_key_violation(
                    e,
                    "Membership cannot be deleted because it has existing orders.",
                )
            })?
            .rows_affected();

        if deleted == 0 {
            return Err(RepositoryError::NotFound("Membership"));
        }
        Ok(())
    }
}
