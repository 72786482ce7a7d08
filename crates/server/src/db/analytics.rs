//! Platform-wide counters for the super admin dashboard.

use chrono::NaiveDate;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::PlatformStats;

#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    total_users: i64,
    total_gyms: i64,
    active_memberships: i64,
}

/// Read-only aggregate queries.
pub struct AnalyticsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AnalyticsRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count users, gyms and memberships that are active and unexpired on `today`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn platform_stats(&self, today: NaiveDate) -> Result<PlatformStats, RepositoryError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM gyms) AS total_gyms,
                (SELECT COUNT(*) FROM orders
                 WHERE status = 'active' AND (end_date IS NULL OR end_date >= $1)) AS active_memberships
            ",
        )
        .bind(today)
        .fetch_one(self.pool)
        .await?;

        Ok(PlatformStats {
            total_users: row.total_users,
            total_gyms: row.total_gyms,
            active_memberships: row.active_memberships,
        })
    }
}
