//! HTTP route handlers for the JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                   - Liveness
//! GET  /health/ready                             - Readiness (database ping)
//!
//! # Auth
//! POST /api/auth/signup                          - Create a client account
//! POST /api/auth/login                           - Start a session
//! POST /api/auth/logout                          - End the session
//!
//! # Public
//! GET  /api/gyms                                 - Gym listing
//! GET  /api/gyms/{gym_id}                        - Gym page with plans
//! GET  /api/countries                            - Country list
//!
//! # Client (requires auth)
//! GET   /api/account                             - Session user, orders, administered gyms
//! PATCH /api/account/profile                     - Update own name
//! POST  /api/gyms/{gym_id}/memberships/{id}/orders - Place an order
//! GET   /api/gyms/{gym_id}/social                - Members-only events
//!
//! # Gym admin (assigned admin or super admin)
//! PATCH  /api/gym-admin/{gym_id}/profile
//! GET    /api/gym-admin/{gym_id}/memberships
//! POST   /api/gym-admin/{gym_id}/memberships
//! PATCH  /api/gym-admin/{gym_id}/memberships/{id}
//! DELETE /api/gym-admin/{gym_id}/memberships/{id}
//! GET    /api/gym-admin/{gym_id}/orders
//! POST   /api/gym-admin/{gym_id}/orders/{id}/status
//! GET    /api/gym-admin/{gym_id}/events
//! POST   /api/gym-admin/{gym_id}/events
//! PATCH  /api/gym-admin/{gym_id}/events/{id}
//! DELETE /api/gym-admin/{gym_id}/events/{id}
//!
//! # Super admin
//! GET    /api/superadmin/gyms
//! POST   /api/superadmin/gyms
//! DELETE /api/superadmin/gyms/{gym_id}
//! GET    /api/superadmin/users
//! GET    /api/superadmin/admins
//! POST   /api/superadmin/admins
//! DELETE /api/superadmin/admins/{user_id}/{gym_id}
//! GET    /api/superadmin/analytics
//! ```

pub mod account;
pub mod auth;
pub mod countries;
pub mod gym_admin;
pub mod gyms;
pub mod superadmin;

use std::future::Future;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::services::today;
use crate::state::AppState;
use crate::view_cache::View;

/// Body of a successful mutating action.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T = ()> {
    pub success: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ActionResponse {
    /// A confirmation without payload.
    #[must_use]
    pub fn message(success: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: success.into(),
            data: None,
        })
    }
}

impl<T: Serialize> ActionResponse<T> {
    /// A confirmation carrying the affected record.
    #[must_use]
    pub fn with_data(success: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: success.into(),
            data: Some(data),
        })
    }
}

/// Serve a view from the cache, loading and storing it on a miss.
pub(crate) async fn cached_view<T, F, Fut>(state: &AppState, view: View, load: F) -> Result<Json<Value>>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let today = today();
    if let Some(value) = state.views().get(&view, today).await {
        return Ok(Json(value));
    }

    let data = load().await?;
    Ok(Json(state.views().store(&view, &data, today).await?))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Public gym pages plus the client actions scoped to a gym.
pub fn gym_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(gyms::index))
        .route("/{gym_id}", get(gyms::show))
        .route("/{gym_id}/social", get(gyms::social))
        .route(
            "/{gym_id}/memberships/{membership_id}/orders",
            post(gyms::place_order),
        )
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::show))
        .route("/profile", patch(account::update_profile))
}

/// Routes for assigned gym admins and super admins.
pub fn gym_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/{gym_id}/profile", patch(gym_admin::update_profile))
        .route(
            "/{gym_id}/memberships",
            get(gym_admin::list_memberships).post(gym_admin::create_membership),
        )
        .route(
            "/{gym_id}/memberships/{membership_id}",
            patch(gym_admin::update_membership).delete(gym_admin::delete_membership),
        )
        .route("/{gym_id}/orders", get(gym_admin::list_orders))
        .route(
            "/{gym_id}/orders/{order_id}/status",
            post(gym_admin::update_order_status),
        )
        .route(
            "/{gym_id}/events",
            get(gym_admin::list_events).post(gym_admin::create_event),
        )
        .route(
            "/{gym_id}/events/{event_id}",
            patch(gym_admin::update_event).delete(gym_admin::delete_event),
        )
}

/// Platform-wide routes (super admin only).
pub fn superadmin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/gyms",
            get(superadmin::list_gyms).post(superadmin::create_gym),
        )
        .route("/gyms/{gym_id}", delete(superadmin::delete_gym))
        .route("/users", get(superadmin::list_users))
        .route(
            "/admins",
            get(superadmin::list_admins).post(superadmin::assign_admin),
        )
        .route(
            "/admins/{user_id}/{gym_id}",
            delete(superadmin::remove_admin),
        )
        .route("/analytics", get(superadmin::analytics))
}

/// Create all routes for the API server.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/gyms", gym_routes())
        .nest("/account", account_routes())
        .nest("/gym-admin", gym_admin_routes())
        .nest("/superadmin", superadmin_routes())
        .route("/countries", get(countries::index));

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
