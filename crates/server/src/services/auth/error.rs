//! Authentication error types.

use thiserror::Error;

use gymhub_core::input::ValidationError;

use crate::db::RepositoryError;

/// Errors that can occur during signup and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Signup input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unknown email, wrong password, or an account without a password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered.
    #[error("User with this email already exists.")]
    UserAlreadyExists,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
