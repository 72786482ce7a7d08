//! Order lifecycle rules.
//!
//! An order starts as `pending_approval` and is moved exactly once by a gym
//! admin, either to `active` (which fixes its start and end dates) or to
//! `cancelled`. `expired` is computed on read and never stored.
//!
//! Everything here is pure; the server runs these checks inside the
//! transaction that writes the result.

use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::input::ValidationError;
use crate::types::OrderStatus;

/// Errors raised when a status transition cannot be applied.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The order already left `pending_approval`.
    #[error("order is {current} and can no longer change status")]
    NotPending {
        /// Status the order is currently in.
        current: OrderStatus,
    },
    /// The membership has no `duration_days`, so no end date can be computed.
    #[error("membership duration is not set; cannot activate order")]
    MissingDuration,
    /// The membership duration is zero, negative, or past the calendar range.
    #[error("membership duration of {days} days is invalid")]
    DurationOutOfRange {
        /// Offending value.
        days: i32,
    },
}

/// A status an admin may move a pending order to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    /// Approve the order.
    Active,
    /// Reject the order.
    Cancelled,
}

impl TargetStatus {
    /// The stored status this target corresponds to.
    #[must_use]
    pub const fn as_order_status(self) -> OrderStatus {
        match self {
            Self::Active => OrderStatus::Active,
            Self::Cancelled => OrderStatus::Cancelled,
        }
    }
}

impl FromStr for TargetStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ValidationError::InvalidStatus(other.to_owned())),
        }
    }
}

/// Ensure an order in `current` may move to `target`.
///
/// Only pending orders can change status.
///
/// # Errors
///
/// Returns [`TransitionError::NotPending`] for any other current status.
pub const fn check_transition(
    current: OrderStatus,
    target: TargetStatus,
) -> Result<OrderStatus, TransitionError> {
    match current {
        OrderStatus::PendingApproval => Ok(target.as_order_status()),
        _ => Err(TransitionError::NotPending { current }),
    }
}

/// Start and end date of an activated membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ActivationWindow {
    /// Window beginning on `today` and lasting `duration_days` calendar days.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use gymhub_core::order::ActivationWindow;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    /// let window = ActivationWindow::starting(today, Some(30)).unwrap();
    /// assert_eq!(window.end_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    /// ```
    ///
    /// # Errors
    ///
    /// [`TransitionError::MissingDuration`] when the plan has no duration,
    /// [`TransitionError::DurationOutOfRange`] when it is not positive or the
    /// end date would overflow the calendar.
    pub fn starting(today: NaiveDate, duration_days: Option<i32>) -> Result<Self, TransitionError> {
        let days = duration_days.ok_or(TransitionError::MissingDuration)?;
        let end_date = u64::try_from(days)
            .ok()
            .filter(|d| *d > 0)
            .and_then(|d| today.checked_add_days(Days::new(d)))
            .ok_or(TransitionError::DurationOutOfRange { days })?;

        Ok(Self {
            start_date: today,
            end_date,
        })
    }
}

/// Status shown to readers: `active` past its end date reads as `expired`.
#[must_use]
pub fn derived_status(
    status: OrderStatus,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> OrderStatus {
    match (status, end_date) {
        (OrderStatus::Active, Some(end)) if end < today => OrderStatus::Expired,
        _ => status,
    }
}

/// Whether an order currently grants access to members-only gym content.
#[must_use]
pub fn grants_access(status: OrderStatus, end_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    derived_status(status, end_date, today) == OrderStatus::Active
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_only_pending_orders_transition() {
        assert_eq!(
            check_transition(OrderStatus::PendingApproval, TargetStatus::Active),
            Ok(OrderStatus::Active)
        );
        assert_eq!(
            check_transition(OrderStatus::PendingApproval, TargetStatus::Cancelled),
            Ok(OrderStatus::Cancelled)
        );

        for current in [
            OrderStatus::Active,
            OrderStatus::Cancelled,
            OrderStatus::Expired,
        ] {
            assert_eq!(
                check_transition(current, TargetStatus::Active),
                Err(TransitionError::NotPending { current })
            );
        }
    }

    #[test]
    fn test_target_status_parse() {
        assert_eq!("active".parse::<TargetStatus>().unwrap(), TargetStatus::Active);
        assert_eq!(
            "cancelled".parse::<TargetStatus>().unwrap(),
            TargetStatus::Cancelled
        );
        assert_eq!(
            "pending_approval".parse::<TargetStatus>(),
            Err(ValidationError::InvalidStatus("pending_approval".into()))
        );
        assert!("expired".parse::<TargetStatus>().is_err());
    }

    #[test]
    fn test_window_adds_calendar_days() {
        let window = ActivationWindow::starting(date(2024, 2, 28), Some(2)).unwrap();
        assert_eq!(window.start_date, date(2024, 2, 28));
        assert_eq!(window.end_date, date(2024, 3, 1));

        let year = ActivationWindow::starting(date(2023, 6, 15), Some(365)).unwrap();
        assert_eq!(year.end_date, date(2024, 6, 14));
    }

    #[test]
    fn test_window_requires_positive_duration() {
        let today = date(2024, 1, 1);
        assert_eq!(
            ActivationWindow::starting(today, None),
            Err(TransitionError::MissingDuration)
        );
        assert_eq!(
            ActivationWindow::starting(today, Some(0)),
            Err(TransitionError::DurationOutOfRange { days: 0 })
        );
        assert_eq!(
            ActivationWindow::starting(today, Some(-5)),
            Err(TransitionError::DurationOutOfRange { days: -5 })
        );
    }

    #[test]
    fn test_window_overflow() {
        let result = ActivationWindow::starting(NaiveDate::MAX, Some(1));
        assert_eq!(result, Err(TransitionError::DurationOutOfRange { days: 1 }));
    }

    #[test]
    fn test_derived_status() {
        let today = date(2024, 5, 10);
        assert_eq!(
            derived_status(OrderStatus::Active, Some(date(2024, 5, 9)), today),
            OrderStatus::Expired
        );
        assert_eq!(
            derived_status(OrderStatus::Active, Some(today), today),
            OrderStatus::Active
        );
        assert_eq!(
            derived_status(OrderStatus::Cancelled, Some(date(2020, 1, 1)), today),
            OrderStatus::Cancelled
        );
        assert_eq!(
            derived_status(OrderStatus::PendingApproval, None, today),
            OrderStatus::PendingApproval
        );
    }

    #[test]
    fn test_grants_access() {
        let today = date(2024, 5, 10);
        assert!(grants_access(OrderStatus::Active, Some(today), today));
        assert!(grants_access(OrderStatus::Active, None, today));
        assert!(!grants_access(
            OrderStatus::Active,
            Some(date(2024, 5, 1)),
            today
        ));
        assert!(!grants_access(OrderStatus::PendingApproval, None, today));
    }
}
