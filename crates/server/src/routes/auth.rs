//! Signup, login and logout handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use gymhub_core::input::SignupRequest;
use gymhub_core::{Email, RoleName, UserId};

use super::ActionResponse;
use crate::error::{AppError, Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, clear_session_user, set_session_user};
use crate::models::UserSummary;
use crate::services::AuthService;
use crate::state::AppState;
use crate::view_cache::View;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup response body.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: UserSummary,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub roles: Vec<RoleName>,
}

/// Create a client account.
#[instrument(skip(state, body))]
pub async fn signup(
    State(state): State<AppState>,
    body: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let Json(request) = body?;

    let user = AuthService::new(state.pool()).register(request).await?;

    state
        .views()
        .revalidate(&[View::SuperAdminUsers, View::Analytics])
        .await;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully.",
            user: UserSummary::from(user),
        }),
    ))
}

/// Check credentials and start a session.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(request) = body?;

    let (user, session_user) = AuthService::new(state.pool())
        .login(&request.email, &request.password)
        .await?;

    set_session_user(&session, &session_user)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store session: {e}")))?;

    set_sentry_user(&session_user.id, Some(&session_user.name));
    add_breadcrumb("auth", "Logged in", None);
    tracing::info!(user_id = %session_user.id, roles = ?session_user.roles, "User logged in");

    Ok(Json(LoginResponse {
        id: session_user.id,
        email: user.email,
        name: session_user.name,
        roles: session_user.roles,
    }))
}

/// End the session.
#[instrument(skip(user, session))]
pub async fn logout(
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> Result<Json<ActionResponse>> {
    clear_session_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to end session: {e}")))?;
    clear_sentry_user();

    if let Some(user) = user {
        tracing::info!(user_id = %user.id, "User logged out");
    }

    Ok(ActionResponse::message("Logged out successfully."))
}
