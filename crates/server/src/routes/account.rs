//! The logged-in user's account view and profile update.
//!
//! Not cached: every response is specific to the session.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use gymhub_core::input::ProfileUpdate;
use gymhub_core::{Email, SessionUser};

use super::ActionResponse;
use crate::db::{GymRepository, OrderRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::session::SESSION_USER;
use crate::models::{GymRef, UserOrder};
use crate::services::today;
use crate::state::AppState;
use crate::view_cache::View;

/// Account page data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub user: SessionUser,
    pub email: Email,
    pub orders: Vec<UserOrder>,
    pub administered_gyms: Vec<GymRef>,
}

/// Session user, their orders and the gyms they manage.
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<AccountView>> {
    let profile = UserRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Authentication required.".into()))?;

    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id, today())
        .await?;
    let administered_gyms = GymRepository::new(state.pool())
        .administered_by(user.id)
        .await?;

    Ok(Json(AccountView {
        user,
        email: profile.email,
        orders,
        administered_gyms,
    }))
}

/// Update the user's own display name.
#[instrument(skip(user, state, session, body), fields(user_id = %user.id))]
pub async fn update_profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    body: std::result::Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<ActionResponse>> {
    let Json(update) = body?;
    let full_name = update.validate()?;

    UserRepository::new(state.pool())
        .update_full_name(user.id, &full_name)
        .await?;

    // Keep the session's display name in step; roles stay as resolved at login.
    let refreshed = SessionUser {
        name: full_name,
        ..user
    };
    if let Err(e) = session.insert(SESSION_USER, &refreshed).await {
        tracing::warn!(error = %e, "Failed to refresh session name");
    }

    let views = state.views();
    views
        .revalidate(&[View::SuperAdminUsers, View::SuperAdminAdmins])
        .await;
    views.revalidate_order_lists();

    Ok(ActionResponse::message("Profile updated successfully."))
}
