//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Responses are JSON
//! `{"error": "..."}`; infrastructure failures are captured to Sentry and the
//! client only sees a generic message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use gymhub_core::input::ValidationError;
use gymhub_core::order::TransitionError;

use crate::db::RepositoryError;
use crate::services::{AuthError, CountriesError, ServiceError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Input failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Order status change not allowed.
    #[error("{0}")]
    Transition(#[from] TransitionError),

    /// Country list could not be fetched.
    #[error("Countries error: {0}")]
    Countries(#[from] CountriesError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("{0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// Request conflicts with stored state.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Repository(e) => Self::Database(e),
            ServiceError::Transition(e) => Self::Transition(e),
            ServiceError::Forbidden(msg) => Self::Forbidden(msg.to_owned()),
            ServiceError::NotFound(msg) => Self::NotFound(msg.to_owned()),
            ServiceError::BadRequest(msg) => Self::BadRequest(msg.to_owned()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("serialization failed: {err}"))
    }
}

impl AppError {
    const fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Database(
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_)
            ) | Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash)
                | Self::Countries(_)
                | Self::Internal(_)
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) | RepositoryError::Referenced(_) => {
                    StatusCode::CONFLICT
                }
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Auth(err) => match err {
                AuthError::Validation(_) => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Transition(_) | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Countries(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Countries(_) => "Failed to fetch countries.".to_owned(),
            Self::Database(RepositoryError::NotFound(entity)) => format!("{entity} not found."),
            Self::Auth(AuthError::Repository(_)) => "Internal server error".to_owned(),
            _ if self.is_infrastructure() => "Internal server error".to_owned(),
            Self::Database(err) => err.to_string(),
            Self::Auth(err) => err.to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_infrastructure() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let body = Json(json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after login.
pub fn set_sentry_user(user_id: &impl ToString, name: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: name.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context on logout.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a user action.
///
/// ```rust,ignore
/// add_breadcrumb("orders", "Order approved", Some(&[("order_id", "42")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let (status, body) = parts(ValidationError::InvalidPrice.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Price must be greater than zero and at most 99999999.99."
        );
    }

    #[tokio::test]
    async fn test_repository_errors() {
        let (status, body) = parts(RepositoryError::NotFound("Membership").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Membership not found.");

        let (status, body) =
            parts(RepositoryError::Conflict("You already have a pending or active order for this membership.".into()).into())
                .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["error"],
            "You already have a pending or active order for this membership."
        );

        let (status, _) = parts(RepositoryError::Referenced("still used".into()).into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_infrastructure_details_are_hidden() {
        let (status, body) = parts(RepositoryError::Database(sqlx::Error::PoolTimedOut).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");

        let (status, body) =
            parts(RepositoryError::DataCorruption("bad email row 9".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_auth_errors() {
        let (status, body) = parts(AuthError::InvalidCredentials.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");

        let (status, body) = parts(AuthError::UserAlreadyExists.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "User with this email already exists.");

        let (status, _) =
            parts(AuthError::Validation(ValidationError::MissingSignupFields).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_service_errors() {
        let (status, body) =
            parts(ServiceError::Forbidden("You do not have permission to manage this gym.").into())
                .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "You do not have permission to manage this gym.");

        let (status, _) = parts(ServiceError::Transition(TransitionError::MissingDuration).into()).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = parts(ServiceError::NotFound("Selected membership plan not found.").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_countries_failure_is_bad_gateway() {
        let (status, body) = parts(CountriesError::Status { status: 503 }.into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Failed to fetch countries.");
    }
}
