//! Public gym pages and client actions scoped to a gym.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use tracing::instrument;

use gymhub_core::{GymId, MembershipId};

use super::{ActionResponse, cached_view};
use crate::db::{EventRepository, GymRepository, MembershipRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{GymDetail, Order};
use crate::services::{OrderService, access, today};
use crate::state::AppState;
use crate::view_cache::View;

/// Gym listing.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Value>> {
    let pool = state.pool().clone();
    cached_view(&state, View::GymList, || async move {
        Ok::<_, AppError>(GymRepository::new(&pool).list_summaries().await?)
    })
    .await
}

/// Gym page with its plans, cheapest first.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(gym_id): Path<GymId>,
) -> Result<Json<Value>> {
    let pool = state.pool().clone();
    cached_view(&state, View::Gym(gym_id), || async move {
        let gym = GymRepository::new(&pool)
            .get(gym_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Gym not found.".into()))?;
        let memberships = MembershipRepository::new(&pool).list_for_gym(gym_id).await?;
        Ok::<_, AppError>(GymDetail { gym, memberships })
    })
    .await
}

/// Members-only events of a gym.
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn social(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(gym_id): Path<GymId>,
) -> Result<Json<Value>> {
    access::authorize_member(state.pool(), &user, gym_id, today()).await?;

    let pool = state.pool().clone();
    cached_view(&state, View::GymSocial(gym_id), || async move {
        Ok::<_, AppError>(EventRepository::new(&pool).list_for_gym(gym_id).await?)
    })
    .await
}

/// Place an order for one of the gym's plans.
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn place_order(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((gym_id, membership_id)): Path<(GymId, MembershipId)>,
) -> Result<(StatusCode, Json<ActionResponse<Order>>)> {
    let order = OrderService::new(state.pool())
        .place(&user, gym_id, membership_id)
        .await?;

    state.views().revalidate(&[View::GymAdminOrders(gym_id)]).await;

    Ok((
        StatusCode::CREATED,
        ActionResponse::with_data("Order successfully placed for approval!", order),
    ))
}
