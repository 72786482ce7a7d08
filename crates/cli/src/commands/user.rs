//! User management commands.
//!
//! Used to bootstrap the first super admin, who can then assign gym admins
//! through the API.

use gymhub_core::input::{ProfileUpdate, ValidationError};
use gymhub_core::{Email, RoleName};
use gymhub_server::db::{RoleRepository, UserRepository};
use gymhub_server::services::auth::hash_password;

use super::{CommandError, connect};

/// Create a user holding `role`.
///
/// # Errors
///
/// Returns `CommandError` for an invalid email or role, a duplicate email,
/// or a database failure.
pub async fn create(
    email: &str,
    name: &str,
    role: &str,
    password: Option<&str>,
) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let full_name = full_name(name)?;
    let role: RoleName = role.parse()?;
    let password_hash = password.map(hash_password).transpose()?;

    let pool = connect().await?;
    let user = UserRepository::new(&pool)
        .create_with_role(&email, &full_name, password_hash.as_deref(), role)
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, %role, "User created");
    if password_hash.is_none() {
        tracing::warn!("User has no password and cannot log in until one is set");
    }
    Ok(())
}

/// Trimmed display name, held to the same rule as a profile update.
fn full_name(name: &str) -> Result<String, ValidationError> {
    ProfileUpdate {
        full_name: Some(name.to_owned()),
    }
    .validate()
}

/// Grant a global role to an existing user.
///
/// # Errors
///
/// Returns `CommandError::UserNotFound` if no user has the email.
pub async fn grant(email: &str, role: &str) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let role: RoleName = role.parse()?;

    let pool = connect().await?;
    let (user, _) = UserRepository::new(&pool)
        .get_credentials(&email)
        .await?
        .ok_or_else(|| CommandError::UserNotFound(email.to_string()))?;

    let granted = RoleRepository::new(&pool).grant(user.id, role).await?;
    if granted {
        tracing::info!(user_id = %user.id, %role, "Role granted");
    } else {
        tracing::info!(user_id = %user.id, %role, "User already holds role");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_is_trimmed() {
        assert_eq!(full_name("  Gym Owner ").unwrap(), "Gym Owner");
    }

    #[test]
    fn test_blank_full_name_is_rejected() {
        assert_eq!(full_name("   "), Err(ValidationError::EmptyFullName));
        assert_eq!(full_name(""), Err(ValidationError::EmptyFullName));
    }
}
