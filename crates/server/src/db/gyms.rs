//! Gym repository for database operations.
//!
//! `opening_hours` and `photos` are JSONB columns. They are read leniently:
//! a malformed value is logged and treated as empty instead of failing the
//! whole page.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;

use gymhub_core::input::{GymPatch, NewGym, OpeningHours};
use gymhub_core::{GymId, UserId};

use super::RepositoryError;
use crate::models::{Gym, GymRef, GymSummary};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct GymRow {
    id: GymId,
    name: String,
    address: Option<String>,
    contact_phone: Option<String>,
    contact_email: Option<String>,
    facilities_description: Option<String>,
    opening_hours: Option<Json<Value>>,
    photos: Json<Value>,
    created_by: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl From<GymRow> for Gym {
    fn from(row: GymRow) -> Self {
        let opening_hours = row.opening_hours.and_then(|Json(value)| {
            serde_json::from_value::<OpeningHours>(value)
                .map_err(|e| tracing::warn!(gym_id = %row.id, error = %e, "Ignoring malformed opening hours"))
                .ok()
        });

        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            contact_phone: row.contact_phone,
            contact_email: row.contact_email,
            facilities_description: row.facilities_description,
            opening_hours,
            photos: photo_urls(row.id, row.photos.0),
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

/// Keep the string entries of a photos array.
fn photo_urls(gym_id: GymId, value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(url) => Some(url),
                _ => None,
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(%gym_id, kind = ?other, "Ignoring malformed photos column");
            Vec::new()
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: GymId,
    name: String,
    address: Option<String>,
    short_description: String,
    main_image: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct RefRow {
    id: GymId,
    name: String,
}

/// Repository for gym database operations.
pub struct GymRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GymRepository<'a> {
    /// Create a new gym repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Public listing: name order, trimmed description, first photo.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_summaries(&self) -> Result<Vec<GymSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r"
            SELECT id, name, address,
                   LEFT(COALESCE(facilities_description, ''), 100) AS short_description,
                   CASE WHEN jsonb_typeof(photos) = 'array' THEN photos ->> 0 END AS main_image
            FROM gyms
            ORDER BY name, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| GymSummary {
                id: r.id,
                name: r.name,
                address: r.address,
                short_description: r.short_description,
                main_image: r.main_image,
            })
            .collect())
    }

    /// Every gym with its full profile, for the super admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Gym>, RepositoryError> {
        let rows = sqlx::query_as::<_, GymRow>(
            r"
            SELECT id, name, address, contact_phone, contact_email, facilities_description,
                   opening_hours, photos, created_by, created_at
            FROM gyms
            ORDER BY name, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Gym::from).collect())
    }

    /// Get a gym by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: GymId) -> Result<Option<Gym>, RepositoryError> {
        let row = sqlx::query_as::<_, GymRow>(
            r"
            SELECT id, name, address, contact_phone, contact_email, facilities_description,
                   opening_hours, photos, created_by, created_at
            FROM gyms
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Gym::from))
    }

    /// Whether a gym with this ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: GymId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM gyms WHERE id = $1)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }

    /// Gyms a user is assigned to administer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn administered_by(&self, user_id: UserId) -> Result<Vec<GymRef>, RepositoryError> {
        let rows = sqlx::query_as::<_, RefRow>(
            r"
            SELECT g.id, g.name
            FROM gyms g
            JOIN gym_admins ga ON ga.gym_id = g.id
            WHERE ga.user_id = $1
            ORDER BY g.name, g.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| GymRef {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    /// Insert a gym.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, gym: &NewGym, created_by: UserId) -> Result<Gym, RepositoryError> {
        let row = sqlx::query_as::<_, GymRow>(
            r"
            INSERT INTO gyms (name, address, contact_phone, contact_email,
                              facilities_description, opening_hours, photos, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, address, contact_phone, contact_email, facilities_description,
                      opening_hours, photos, created_by, created_at
            ",
        )
        .bind(&gym.name)
        .bind(gym.address.as_deref())
        .bind(gym.contact_phone.as_deref())
        .bind(gym.contact_email.as_deref())
        .bind(gym.facilities_description.as_deref())
        .bind(gym.opening_hours.as_ref().map(Json))
        .bind(Json(&gym.photos))
        .bind(created_by)
        .fetch_one(self.pool)
        .await?;

        Ok(Gym::from(row))
    }

    /// Apply a partial update. Absent fields keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the gym does not exist.
    pub async fn update(&self, id: GymId, patch: &GymPatch) -> Result<Gym, RepositoryError> {
        let row = sqlx::query_as::<_, GymRow>(
            r"
            UPDATE gyms SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                contact_phone = COALESCE($4, contact_phone),
                contact_email = COALESCE($5, contact_email),
                facilities_description = COALESCE($6, facilities_description),
                opening_hours = COALESCE($7, opening_hours),
                photos = COALESCE($8, photos)
            WHERE id = $1
            RETURNING id, name, address, contact_phone, contact_email, facilities_description,
                      opening_hours, photos, created_by, created_at
            ",
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.address.as_deref())
        .bind(patch.contact_phone.as_deref())
        .bind(patch.contact_email.as_deref())
        .bind(patch.facilities_description.as_deref())
        .bind(patch.opening_hours.as_ref().map(Json))
        .bind(patch.photos.as_ref().map(Json))
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound("Gym"))?;

        Ok(Gym::from(row))
    }

    /// Delete a gym and everything hanging off it.
    ///
    /// Orders restrict membership deletion, so the gym's orders are removed
    /// first; memberships, events and admin assignments cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the gym does not exist.
    pub async fn delete(&self, id: GymId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let removed_orders = sqlx::query(
            r"
            DELETE FROM orders
            WHERE membership_id IN (SELECT id FROM memberships WHERE gym_id = $1)
            ",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let deleted = sqlx::query("DELETE FROM gyms WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(RepositoryError::NotFound("Gym"));
        }

        tx.commit().await?;

        tracing::info!(gym_id = %id, removed_orders, "Gym deleted");
        Ok(())
    }
}
