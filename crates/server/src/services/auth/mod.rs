//! Password authentication service.
//!
//! Passwords are hashed with Argon2id. Login failures never say whether the
//! email exists.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::LazyLock;

use sqlx::PgPool;

use gymhub_core::input::SignupRequest;
use gymhub_core::{Email, RoleName, SessionUser};

use crate::db::{RepositoryError, RoleRepository, UserRepository};
use crate::models::User;

/// Hash checked when there is no real one, so failed logins take the same time.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("gymhub-dummy-password").ok());

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    roles: RoleRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            roles: RoleRepository::new(pool),
        }
    }

    /// Register a client account.
    ///
    /// The user row and the `client` role are written together; a duplicate
    /// email leaves neither behind.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for bad input.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, request: SignupRequest) -> Result<User, AuthError> {
        let registration = request.validate()?;
        let password_hash = hash_password(&registration.password)?;

        let user = self
            .users
            .create_with_role(
                &registration.email,
                &registration.full_name,
                Some(&password_hash),
                RoleName::Client,
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and build the session context.
    ///
    /// Roles are looked up once here and stored with the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, SessionUser), AuthError> {
        let credentials = match Email::parse(email) {
            Ok(email) => self.users.get_credentials(&email).await?,
            Err(_) => None,
        };

        let Some((user, Some(password_hash))) = credentials else {
            return Err(reject_without_account(password));
        };
        verify_password(password, &password_hash)?;

        let roles = self.roles.roles_for_user(user.id).await?;
        let session_user = SessionUser::new(user.id, user.full_name.clone(), roles);
        Ok((user, session_user))
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Spend the same Argon2 work as a real check, then fail.
fn reject_without_account(password: &str) -> AuthError {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
    AuthError::InvalidCredentials
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("secret1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret1", &hash).is_ok());
        assert!(matches!(
            verify_password("secret2", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_missing_account_still_runs_argon2() {
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordHash::new(hash).is_ok());
        assert!(matches!(
            reject_without_account("gymhub-dummy-password"),
            AuthError::InvalidCredentials
        ));
    }

    #[test]
    fn test_garbage_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("secret1", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
