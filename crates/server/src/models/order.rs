//! Order domain types.
//!
//! Read models carry the derived status: an `active` order whose end date
//! has passed is reported as `expired`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use gymhub_core::{Email, GymId, MembershipId, OrderId, OrderStatus, Price, UserId};

/// An order as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub membership_id: MembershipId,
    /// Membership price at the time the order was placed.
    pub price_paid: Price,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// An order in the client's account view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrder {
    pub id: OrderId,
    pub order_date: DateTime<Utc>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price_paid: Price,
    pub status: OrderStatus,
    pub membership_name: String,
    pub membership_description: Option<String>,
    pub gym_id: GymId,
    pub gym_name: String,
}

/// An order in a gym admin's order list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GymOrder {
    pub id: OrderId,
    pub order_date: DateTime<Utc>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price_paid: Price,
    pub status: OrderStatus,
    pub membership_name: String,
    pub user_name: String,
    pub user_email: Email,
}
