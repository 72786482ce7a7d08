//! Super admin views: gym admin assignments and platform analytics.

use serde::Serialize;

use gymhub_core::{Email, GymId, UserId};

/// A (user, gym) administration grant with display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAssignment {
    pub user_id: UserId,
    pub gym_id: GymId,
    pub user_name: String,
    pub user_email: Email,
    pub gym_name: String,
}

/// Result of assigning a gym admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentOutcome {
    pub user_id: UserId,
    pub gym_id: GymId,
    /// `false` when the assignment already existed.
    pub inserted: bool,
}

/// Result of removing a gym admin assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalOutcome {
    pub user_id: UserId,
    pub gym_id: GymId,
    pub removed: bool,
    pub message: &'static str,
}

/// Platform-wide counters for the analytics dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_gyms: i64,
    /// Active orders that have not passed their end date.
    pub active_memberships: i64,
}
