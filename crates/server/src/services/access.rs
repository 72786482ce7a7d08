//! Authorization checks for gym-scoped actions.
//!
//! Super admins pass every per-gym check. Anyone else needs a `gym_admins`
//! row for the gym, whatever global roles their session carries. These
//! checks run before the request body is looked at.

use chrono::NaiveDate;
use sqlx::PgPool;

use gymhub_core::{GymId, SessionUser};

use super::ServiceError;
use crate::db::{GymAdminRepository, GymRepository, OrderRepository};

/// Returned when the caller may not manage the gym.
pub const MANAGE_GYM_FORBIDDEN: &str = "You do not have permission to manage this gym.";

/// Returned when the caller has no active membership at the gym.
pub const MEMBERS_ONLY: &str = "An active membership is required to view this gym's events.";

/// Returned to non super admins on platform-wide actions.
pub const SUPER_ADMIN_ONLY: &str = "Super admin access required.";

/// Ensure `user` may manage `gym_id`.
///
/// # Errors
///
/// Returns `ServiceError::Forbidden` when the user is neither a super admin
/// nor assigned to the gym, and `ServiceError::NotFound` when a super admin
/// targets a gym that does not exist.
pub async fn authorize_gym(
    pool: &PgPool,
    user: &SessionUser,
    gym_id: GymId,
) -> Result<(), ServiceError> {
    if user.is_super_admin() {
        if GymRepository::new(pool).exists(gym_id).await? {
            return Ok(());
        }
        return Err(ServiceError::NotFound("Gym not found."));
    }

    if GymAdminRepository::new(pool).is_admin(user.id, gym_id).await? {
        Ok(())
    } else {
        tracing::warn!(user_id = %user.id, %gym_id, "Gym management denied");
        Err(ServiceError::Forbidden(MANAGE_GYM_FORBIDDEN))
    }
}

/// Ensure `user` may read the gym's members-only content.
///
/// Gym managers always pass; clients need an active order that has not
/// reached its end date.
///
/// # Errors
///
/// Returns `ServiceError::Forbidden` when the user has no such access.
pub async fn authorize_member(
    pool: &PgPool,
    user: &SessionUser,
    gym_id: GymId,
    today: NaiveDate,
) -> Result<(), ServiceError> {
    match authorize_gym(pool, user, gym_id).await {
        Ok(()) => return Ok(()),
        Err(ServiceError::Forbidden(_)) => {}
        Err(other) => return Err(other),
    }

    if OrderRepository::new(pool)
        .has_active_membership(user.id, gym_id, today)
        .await?
    {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(MEMBERS_ONLY))
    }
}
