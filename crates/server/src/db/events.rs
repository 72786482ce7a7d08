//! Gym event repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gymhub_core::input::{EventChanges, NewEvent};
use gymhub_core::{EventId, GymId, UserId};

use super::RepositoryError;
use crate::models::Event;

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: EventId,
    gym_id: GymId,
    title: String,
    description: Option<String>,
    event_date_time: DateTime<Utc>,
    location_details: Option<String>,
    created_by: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            gym_id: row.gym_id,
            title: row.title,
            description: row.description,
            event_date_time: row.event_date_time,
            location_details: row.location_details,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

/// Repository for gym events.
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Events of a gym, latest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_gym(&self, gym_id: GymId) -> Result<Vec<Event>, RepositoryError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r"
            SELECT id, gym_id, title, description, event_date_time, location_details,
                   created_by, created_at
            FROM events
            WHERE gym_id = $1
            ORDER BY event_date_time DESC, id DESC
            ",
        )
        .bind(gym_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    /// Insert an event for a gym.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the gym does not exist.
    pub async fn create(
        &self,
        gym_id: GymId,
        event: &NewEvent,
        created_by: UserId,
    ) -> Result<Event, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"
            INSERT INTO events (gym_id, title, description, event_date_time, location_details, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, gym_id, title, description, event_date_time, location_details,
                      created_by, created_at
            ",
        )
        .bind(gym_id)
        .bind(&event.title)
        .bind(event.description.as_deref())
        .bind(event.event_date_time)
        .bind(event.location_details.as_deref())
        .bind(created_by)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match super::on_foreign_key_violation(e, "gym does not exist") {
            RepositoryError::Referenced(_) => RepositoryError::NotFound("Gym"),
            other => other,
        })?;

        Ok(Event::from(row))
    }

    /// Apply a partial update to one of the gym's events.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the event does not belong to the gym.
    pub async fn update(
        &self,
        gym_id: GymId,
        id: EventId,
        changes: &EventChanges,
    ) -> Result<Event, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"
            UPDATE events SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                event_date_time = COALESCE($5, event_date_time),
                location_details = COALESCE($6, location_details)
            WHERE id = $1 AND gym_id = $2
            RETURNING id, gym_id, title, description, event_date_time, location_details,
                      created_by, created_at
            ",
        )
        .bind(id)
        .bind(gym_id)
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.event_date_time)
        .bind(changes.location_details.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound("Event"))?;

        Ok(Event::from(row))
    }

    /// Delete one of the gym's events.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the event does not belong to the gym.
    pub async fn delete(&self, gym_id: GymId, id: EventId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND gym_id = $2")
            .bind(id)
            .bind(gym_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("Event"));
        }
        Ok(())
    }
}
