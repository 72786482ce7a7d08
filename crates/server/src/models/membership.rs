//! Membership plan domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gymhub_core::{GymId, MembershipId, Price};

/// A priced, timed plan offered by a gym.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: MembershipId,
    pub gym_id: GymId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    /// Free-form label such as "1 month".
    pub duration: Option<String>,
    /// Length used to compute the end date on approval.
    pub duration_days: Option<i32>,
    pub created_at: DateTime<Utc>,
}
