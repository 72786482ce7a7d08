//! Gym event domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gymhub_core::{EventId, GymId, UserId};

/// An event shown on a gym's members-only social page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub gym_id: GymId,
    pub title: String,
    pub description: Option<String>,
    pub event_date_time: DateTime<Utc>,
    pub location_details: Option<String>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}
