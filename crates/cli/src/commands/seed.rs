//! Reference data seeding.

use gymhub_server::db::RoleRepository;

use super::{CommandError, connect};

/// Insert the `client`, `gym_admin` and `super_admin` roles if missing.
///
/// # Errors
///
/// Returns `CommandError` if the database operation fails.
pub async fn roles() -> Result<(), CommandError> {
    let pool = connect().await?;

    let inserted = RoleRepository::new(&pool).seed().await?;
    tracing::info!(inserted, "Roles seeded");
    Ok(())
}
