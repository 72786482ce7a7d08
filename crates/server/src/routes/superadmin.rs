//! Platform administration handlers (super admin only).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use gymhub_core::input::GymInput;
use gymhub_core::{GymId, UserId};

use super::{ActionResponse, cached_view};
use crate::db::{AnalyticsRepository, GymAdminRepository, GymRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireSuperAdmin;
use crate::models::{AssignmentOutcome, Gym, RemovalOutcome};
use crate::services::today;
use crate::state::AppState;
use crate::view_cache::View;

/// Body of the admin assignment action.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssignAdminRequest {
    pub user_id: UserId,
    pub gym_id: GymId,
}

/// All gyms with full profiles.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn list_gyms(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let pool = state.pool().clone();
    cached_view(&state, View::SuperAdminGyms, || async move {
        Ok::<_, AppError>(GymRepository::new(&pool).list_all().await?)
    })
    .await
}

/// Create a gym.
#[instrument(skip(admin, state, body), fields(admin_id = %admin.id))]
pub async fn create_gym(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    body: std::result::Result<Json<GymInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ActionResponse<Gym>>)> {
    let Json(input) = body?;
    let new_gym = input.validate()?;

    let gym = GymRepository::new(state.pool())
        .create(&new_gym, admin.id)
        .await?;

    state
        .views()
        .revalidate(&[View::GymList, View::SuperAdminGyms, View::Analytics])
        .await;

    Ok((
        StatusCode::CREATED,
        ActionResponse::with_data("Gym created successfully.", gym),
    ))
}

/// Delete a gym with its plans, orders, events and admin assignments.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn delete_gym(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(gym_id): Path<GymId>,
) -> Result<Json<ActionResponse>> {
    GymRepository::new(state.pool()).delete(gym_id).await?;

    let views = state.views();
    views.revalidate(&View::all_for_gym(gym_id)).await;
    views
        .revalidate(&[
            View::GymList,
            View::SuperAdminGyms,
            View::SuperAdminAdmins,
            View::Analytics,
        ])
        .await;

    Ok(ActionResponse::message("Gym deleted successfully."))
}

/// All users.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn list_users(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let pool = state.pool().clone();
    cached_view(&state, View::SuperAdminUsers, || async move {
        Ok::<_, AppError>(UserRepository::new(&pool).list_summaries().await?)
    })
    .await
}

/// All gym admin assignments.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn list_admins(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let pool = state.pool().clone();
    cached_view(&state, View::SuperAdminAdmins, || async move {
        Ok::<_, AppError>(GymAdminRepository::new(&pool).list_all().await?)
    })
    .await
}

/// Make a user the admin of a gym. Repeating it is harmless.
#[instrument(skip(admin, state, body), fields(admin_id = %admin.id))]
pub async fn assign_admin(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    body: std::result::Result<Json<AssignAdminRequest>, JsonRejection>,
) -> Result<Json<ActionResponse<AssignmentOutcome>>> {
    let Json(request) = body?;

    let outcome = GymAdminRepository::new(state.pool())
        .assign(request.user_id, request.gym_id)
        .await?;

    tracing::info!(
        user_id = %outcome.user_id,
        gym_id = %outcome.gym_id,
        inserted = outcome.inserted,
        "Gym admin assigned"
    );
    state.views().revalidate(&[View::SuperAdminAdmins]).await;

    Ok(ActionResponse::with_data(
        "Gym admin assigned successfully.",
        outcome,
    ))
}

/// Remove an admin assignment. A missing assignment is reported, not an error.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn remove_admin(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path((user_id, gym_id)): Path<(UserId, GymId)>,
) -> Result<Json<ActionResponse<RemovalOutcome>>> {
    let removed = GymAdminRepository::new(state.pool())
        .remove(user_id, gym_id)
        .await?;

    let message = if removed {
        state.views().revalidate(&[View::SuperAdminAdmins]).await;
        "Gym admin assignment removed."
    } else {
        "Assignment not found."
    };

    Ok(ActionResponse::with_data(
        message,
        RemovalOutcome {
            user_id,
            gym_id,
            removed,
            message,
        },
    ))
}

/// Platform counters.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn analytics(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let pool = state.pool().clone();
    cached_view(&state, View::Analytics, || async move {
        Ok::<_, AppError>(AnalyticsRepository::new(&pool).platform_stats(today()).await?)
    })
    .await
}
