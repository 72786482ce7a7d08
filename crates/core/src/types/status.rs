//! Status and role enums shared by the server and CLI.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a membership order.
///
/// `Expired` is never written by the application. It is produced on read for
/// active orders whose end date has passed (see [`crate::order::derived_status`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed by a client, waiting for a gym admin.
    #[default]
    PendingApproval,
    /// Approved; start and end dates are set.
    Active,
    /// Rejected by a gym admin.
    Cancelled,
    /// Active order past its end date.
    Expired,
}

impl OrderStatus {
    /// Database / wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    /// Whether an order in this status blocks a second order for the same plan.
    #[must_use]
    pub const fn blocks_new_order(&self) -> bool {
        matches!(self, Self::PendingApproval | Self::Active)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global role names, matching the seeded rows of the `roles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    /// Default role granted at signup.
    Client,
    /// Holder may be assigned to administer individual gyms.
    GymAdmin,
    /// Platform-wide administrator.
    SuperAdmin,
}

impl RoleName {
    /// All roles, in seed order.
    pub const ALL: [Self; 3] = [Self::Client, Self::GymAdmin, Self::SuperAdmin];

    /// Name as stored in `roles.name`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::GymAdmin => "gym_admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for RoleName {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "client" => Ok(Self::Client),
            "gym_admin" => Ok(Self::GymAdmin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serde() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::PendingApproval).unwrap(),
            "\"pending_approval\""
        );
        let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_blocks_new_order() {
        assert!(OrderStatus::PendingApproval.blocks_new_order());
        assert!(OrderStatus::Active.blocks_new_order());
        assert!(!OrderStatus::Cancelled.blocks_new_order());
        assert!(!OrderStatus::Expired.blocks_new_order());
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in RoleName::ALL {
            assert_eq!(role.as_str().parse::<RoleName>().unwrap(), role);
        }
        assert!("owner".parse::<RoleName>().is_err());
    }
}
