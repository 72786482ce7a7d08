//! Domain models returned by repositories and serialized by routes.
//!
//! Row types stay private to `db`; these are the validated shapes the rest of
//! the server works with. All serialize as camelCase JSON.

pub mod admin;
pub mod event;
pub mod gym;
pub mod membership;
pub mod order;
pub mod session;
pub mod user;

pub use admin::{AdminAssignment, AssignmentOutcome, PlatformStats, RemovalOutcome};
pub use event::Event;
pub use gym::{Gym, GymDetail, GymRef, GymSummary};
pub use membership::Membership;
pub use order::{GymOrder, Order, UserOrder};
pub use user::{User, UserSummary};
