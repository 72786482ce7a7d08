//! GymHub Core - Shared domain library.
//!
//! This crate provides the types and rules used across all GymHub components:
//! - `server` - JSON HTTP API for clients, gym admins and super admins
//! - `cli` - Command-line tools for migrations, seeding and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. The `postgres` feature adds sqlx encoding for the
//! newtypes and enums so the server can bind them directly.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, emails, prices, roles, order status, session context
//! - [`order`] - Order status transitions, activation windows, derived expiry
//! - [`input`] - Request payloads, partial updates and their validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod input;
pub mod order;
pub mod types;

pub use types::*;
