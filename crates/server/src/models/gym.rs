//! Gym domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gymhub_core::input::OpeningHours;
use gymhub_core::{GymId, UserId};

use super::Membership;

/// Full gym profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gym {
    pub id: GymId,
    pub name: String,
    pub address: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub facilities_description: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    /// Photo URLs in display order.
    pub photos: Vec<String>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Gym profile with its plans, ordered by price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GymDetail {
    #[serde(flatten)]
    pub gym: Gym,
    pub memberships: Vec<Membership>,
}

/// Listing card for the public gym index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GymSummary {
    pub id: GymId,
    pub name: String,
    pub address: Option<String>,
    /// First 100 characters of the facilities description.
    pub short_description: String,
    /// First photo, if any.
    pub main_image: Option<String>,
}

/// Gym id and name, for administered-gym menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GymRef {
    pub id: GymId,
    pub name: String,
}
