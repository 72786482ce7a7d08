//! Role repository: global roles and their assignment to users.

use sqlx::{PgExecutor, PgPool};

use gymhub_core::{RoleName, UserId};

use super::RepositoryError;

/// Repository for role lookups and grants.
pub struct RoleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RoleRepository<'a> {
    /// Create a new role repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Role names held by a user.
    ///
    /// Unknown names in the `roles` table are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn roles_for_user(&self, user_id: UserId) -> Result<Vec<RoleName>, RepositoryError> {
        let names: Vec<String> = sqlx::query_scalar(
            r"
            SELECT r.name
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            WHERE ur.user_id = $1
            ORDER BY r.name
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(names
            .into_iter()
            .filter_map(|name| match name.parse::<RoleName>() {
                Ok(role) => Some(role),
                Err(e) => {
                    tracing::warn!(%user_id, error = %e, "Skipping unknown role");
                    None
                }
            })
            .collect())
    }

    /// Grant a global role. Returns `false` if the user already held it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    pub async fn grant(&self, user_id: UserId, role: RoleName) -> Result<bool, RepositoryError> {
        grant_role(self.pool, user_id, role).await.map_err(|e| {
            match super::on_foreign_key_violation(e, "user does not exist") {
                RepositoryError::Referenced(_) => RepositoryError::NotFound("User"),
                other => other,
            }
        })
    }

    /// Insert the reference role rows. Returns how many were missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn seed(&self) -> Result<u64, RepositoryError> {
        let names: Vec<&str> = RoleName::ALL.iter().map(RoleName::as_str).collect();
        let result = sqlx::query(
            r"
            INSERT INTO roles (name)
            SELECT UNNEST($1::text[])
            ON CONFLICT (name) DO NOTHING
            ",
        )
        .bind(&names)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Grant `role` to `user_id`, doing nothing if already granted.
///
/// Takes any executor so it can run inside a caller's transaction.
pub(crate) async fn grant_role<'e, E>(
    executor: E,
    user_id: UserId,
    role: RoleName,
) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r"
        INSERT INTO user_roles (user_id, role_id)
        SELECT $1, id FROM roles WHERE name = $2
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(user_id)
    .bind(role.as_str())
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
