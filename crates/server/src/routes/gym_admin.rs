//! Gym management handlers for assigned gym admins and super admins.
//!
//! Every handler authorizes against the path's gym before reading the
//! request body, so a caller without access gets 403 even for a malformed
//! payload. Memberships, orders and events are always matched on both their
//! own ID and the gym ID.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use gymhub_core::input::{EventInput, EventPatch, GymPatch, MembershipInput, MembershipPatch};
use gymhub_core::order::TargetStatus;
use gymhub_core::{EventId, GymId, MembershipId, OrderId};

use super::{ActionResponse, cached_view};
use crate::db::{EventRepository, GymRepository, MembershipRepository, OrderRepository};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::{Event, Gym, Membership, Order};
use crate::services::{OrderService, access::authorize_gym, today};
use crate::state::AppState;
use crate::view_cache::View;

type Body<T> = std::result::Result<Json<T>, JsonRejection>;

/// Body of the order status action.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusUpdate {
    pub status: String,
}

// =============================================================================
// Gym profile
// =============================================================================

/// Apply a partial update to the gym profile.
#[instrument(skip(user, state, body), fields(user_id = %user.id))]
pub async fn update_profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(gym_id): Path<GymId>,
    body: Body<GymPatch>,
) -> Result<Json<ActionResponse<Gym>>> {
    authorize_gym(state.pool(), &user, gym_id).await?;
    let Json(patch) = body?;
    let patch = patch.validate()?;

    let gym = GymRepository::new(state.pool()).update(gym_id, &patch).await?;

    state
        .views()
        .revalidate(&[
            View::Gym(gym_id),
            View::GymList,
            View::SuperAdminGyms,
            View::SuperAdminAdmins,
        ])
        .await;

    Ok(ActionResponse::with_data("Gym profile updated successfully.", gym))
}

// =============================================================================
// Memberships
// =============================================================================

/// Plans of the gym.
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn list_memberships(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(gym_id): Path<GymId>,
) -> Result<Json<Value>> {
    authorize_gym(state.pool(), &user, gym_id).await?;

    let pool = state.pool().clone();
    cached_view(&state, View::GymAdminMemberships(gym_id), || async move {
        Ok::<_, AppError>(MembershipRepository::new(&pool).list_for_gym(gym_id).await?)
    })
    .await
}

/// Add a plan to the gym.
#[instrument(skip(user, state, body), fields(user_id = %user.id))]
pub async fn create_membership(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(gym_id): Path<GymId>,
    body: Body<MembershipInput>,
) -> Result<(StatusCode, Json<ActionResponse<Membership>>)> {
    authorize_gym(state.pool(), &user, gym_id).await?;
    let Json(input) = body?;
    let plan = input.validate()?;

    let membership = MembershipRepository::new(state.pool())
        .create(gym_id, &plan)
        .await?;

    revalidate_memberships(&state, gym_id).await;

    Ok((
        StatusCode::CREATED,
        ActionResponse::with_data("Membership created successfully.", membership),
    ))
}

/// Apply a partial update to one of the gym's plans.
#[instrument(skip(user, state, body), fields(user_id = %user.id))]
pub async fn update_membership(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((gym_id, membership_id)): Path<(GymId, MembershipId)>,
    body: Body<MembershipPatch>,
) -> Result<Json<ActionResponse<Membership>>> {
    authorize_gym(state.pool(), &user, gym_id).await?;
    let Json(patch) = body?;
    let changes = patch.validate()?;

    let membership = MembershipRepository::new(state.pool())
        .update(gym_id, membership_id, &changes)
        .await?;

    revalidate_memberships(&state, gym_id).await;
    // Order lists show the plan name.
    state.views().revalidate(&[View::GymAdminOrders(gym_id)]).await;

    Ok(ActionResponse::with_data("Membership updated successfully.", membership))
}

/// Delete one of the gym's plans. Fails while orders reference it.
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn delete_membership(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((gym_id, membership_id)): Path<(GymId, MembershipId)>,
) -> Result<Json<ActionResponse>> {
    authorize_gym(state.pool(), &user, gym_id).await?;

    MembershipRepository::new(state.pool())
        .delete(gym_id, membership_id)
        .await?;

    revalidate_memberships(&state, gym_id).await;

    Ok(ActionResponse::message("Membership deleted successfully."))
}

async fn revalidate_memberships(state: &AppState, gym_id: GymId) {
    state
        .views()
        .revalidate(&[View::GymAdminMemberships(gym_id), View::Gym(gym_id)])
        .await;
}

// =============================================================================
// Orders
// =============================================================================

/// Orders for the gym's plans, with derived status.
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn list_orders(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(gym_id): Path<GymId>,
) -> Result<Json<Value>> {
    authorize_gym(state.pool(), &user, gym_id).await?;

    let pool = state.pool().clone();
    cached_view(&state, View::GymAdminOrders(gym_id), || async move {
        Ok::<_, AppError>(OrderRepository::new(&pool).list_for_gym(gym_id, today()).await?)
    })
    .await
}

/// Approve (`active`) or reject (`cancelled`) a pending order.
#[instrument(skip(user, state, body), fields(user_id = %user.id))]
pub async fn update_order_status(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((gym_id, order_id)): Path<(GymId, OrderId)>,
    body: Body<StatusUpdate>,
) -> Result<Json<ActionResponse<Order>>> {
    authorize_gym(state.pool(), &user, gym_id).await?;
    let Json(update) = body?;
    let target: TargetStatus = update.status.parse()?;

    let order = OrderService::new(state.pool())
        .change_status(&user, gym_id, order_id, target)
        .await?;

    state
        .views()
        .revalidate(&[View::GymAdminOrders(gym_id), View::Analytics])
        .await;

    let order_ref = order_id.to_string();
    add_breadcrumb("orders", "Order status changed", Some(&[("order_id", &order_ref)]));

    Ok(ActionResponse::with_data(
        format!("Order status updated to {}.", order.status),
        order,
    ))
}

// =============================================================================
// Events
// =============================================================================

/// Events of the gym, latest first.
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn list_events(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(gym_id): Path<GymId>,
) -> Result<Json<Value>> {
    authorize_gym(state.pool(), &user, gym_id).await?;

    let pool = state.pool().clone();
    cached_view(&state, View::GymAdminEvents(gym_id), || async move {
        Ok::<_, AppError>(EventRepository::new(&pool).list_for_gym(gym_id).await?)
    })
    .await
}

/// Add an event to the gym.
#[instrument(skip(user, state, body), fields(user_id = %user.id))]
pub async fn create_event(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(gym_id): Path<GymId>,
    body: Body<EventInput>,
) -> Result<(StatusCode, Json<ActionResponse<Event>>)> {
    authorize_gym(state.pool(), &user, gym_id).await?;
    let Json(input) = body?;
    let event = input.validate()?;

    let event = EventRepository::new(state.pool())
        .create(gym_id, &event, user.id)
        .await?;

    revalidate_events(&state, gym_id).await;

    Ok((
        StatusCode::CREATED,
        ActionResponse::with_data("Event created successfully.", event),
    ))
}

/// Apply a partial update to one of the gym's events.
#[instrument(skip(user, state, body), fields(user_id = %user.id))]
pub async fn update_event(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((gym_id, event_id)): Path<(GymId, EventId)>,
    body: Body<EventPatch>,
) -> Result<Json<ActionResponse<Event>>> {
    authorize_gym(state.pool(), &user, gym_id).await?;
    let Json(patch) = body?;
    let changes = patch.validate()?;

    let event = EventRepository::new(state.pool())
        .update(gym_id, event_id, &changes)
        .await?;

    revalidate_events(&state, gym_id).await;

    Ok(ActionResponse::with_data("Event updated successfully.", event))
}

/// Delete one of the gym's events.
#[instrument(skip(user, state), fields(user_id = %user.id))]
pub async fn delete_event(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((gym_id, event_id)): Path<(GymId, EventId)>,
) -> Result<Json<ActionResponse>> {
    authorize_gym(state.pool(), &user, gym_id).await?;

    EventRepository::new(state.pool())
        .delete(gym_id, event_id)
        .await?;

    revalidate_events(&state, gym_id).await;

    Ok(ActionResponse::message("Event deleted successfully."))
}

async fn revalidate_events(state: &AppState, gym_id: GymId) {
    state
        .views()
        .revalidate(&[View::GymAdminEvents(gym_id), View::GymSocial(gym_id)])
        .await;
}
