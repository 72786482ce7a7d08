//! GymHub API server library.
//!
//! The server is a library so routes can be exercised in tests with
//! `tower::ServiceExt::oneshot`; `main.rs` adds tracing, Sentry and the
//! listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod view_cache;

use axum::Router;
use tower_sessions::{SessionManagerLayer, SessionStore};

use state::AppState;

/// Build the application router with request IDs and sessions.
///
/// Generic over the session store so tests can use `MemoryStore`.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    routes::routes()
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .with_state(state)
}
