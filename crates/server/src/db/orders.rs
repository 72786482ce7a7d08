//! Order repository for database operations.
//!
//! The duplicate-subscription rule lives in the partial unique index
//! `orders_one_open_per_membership`; inserts that would break it come back
//! as `RepositoryError::Conflict`. Status changes lock the order row and run
//! the lifecycle checks from `gymhub_core::order` inside the transaction.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use thiserror::Error;

use gymhub_core::order::{ActivationWindow, TargetStatus, TransitionError, check_transition, derived_status};
use gymhub_core::{Email, GymId, MembershipId, OrderId, OrderStatus, Price, UserId};

use super::RepositoryError;
use crate::models::{GymOrder, Order, UserOrder};

/// Message returned when a client already holds an open order for a plan.
pub const DUPLICATE_ORDER_MESSAGE: &str =
    "You already have a pending or active order for this membership.";

/// Errors raised while changing an order's status.
#[derive(Debug, Error)]
pub enum StatusChangeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl From<sqlx::Error> for StatusChangeError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(err))
    }
}

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    membership_id: MembershipId,
    price_paid: Price,
    status: OrderStatus,
    order_date: DateTime<Utc>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            membership_id: row.membership_id,
            price_paid: row.price_paid,
            status: row.status,
            order_date: row.order_date,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserOrderRow {
    id: OrderId,
    order_date: DateTime<Utc>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    price_paid: Price,
    status: OrderStatus,
    membership_name: String,
    membership_description: Option<String>,
    gym_id: GymId,
    gym_name: String,
}

impl UserOrderRow {
    fn into_order(self, today: NaiveDate) -> UserOrder {
        UserOrder {
            id: self.id,
            order_date: self.order_date,
            start_date: self.start_date,
            end_date: self.end_date,
            price_paid: self.price_paid,
            status: derived_status(self.status, self.end_date, today),
            membership_name: self.membership_name,
            membership_description: self.membership_description,
            gym_id: self.gym_id,
            gym_name: self.gym_name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GymOrderRow {
    id: OrderId,
    order_date: DateTime<Utc>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    price_paid: Price,
    status: OrderStatus,
    membership_name: String,
    user_name: String,
    user_email: Email,
}

impl GymOrderRow {
    fn into_order(self, today: NaiveDate) -> GymOrder {
        GymOrder {
            id: self.id,
            order_date: self.order_date,
            start_date: self.start_date,
            end_date: self.end_date,
            price_paid: self.price_paid,
            status: derived_status(self.status, self.end_date, today),
            membership_name: self.membership_name,
            user_name: self.user_name,
            user_email: self.user_email,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LockedOrderRow {
    status: OrderStatus,
    duration_days: Option<i32>,
}

// =============================================================================
// OrderRepository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place a pending order, snapshotting the plan's current price.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has a pending
    /// or active order for the plan.
    /// Returns `RepositoryError::NotFound` if the user or plan vanished.
    pub async fn create(
        &self,
        user_id: UserId,
        membership_id: MembershipId,
        price: Price,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, membership_id, price_paid, status)
            VALUES ($1, $2, $3, 'pending_approval')
            RETURNING id, user_id, membership_id, price_paid, status,
                      order_date, start_date, end_date
            ",
        )
        .bind(user_id)
        .bind(membership_id)
        .bind(price)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match super::on_unique_violation(e, DUPLICATE_ORDER_MESSAGE) {
            RepositoryError::Database(e) => {
                match super::on_foreign_key_violation(e, "membership or user does not exist") {
                    RepositoryError::Referenced(_) => RepositoryError::NotFound("Membership"),
                    other => other,
                }
            }
            other => other,
        })?;

        Ok(Order::from(row))
    }

    /// Orders placed by a user, newest first, with derived status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<Vec<UserOrder>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserOrderRow>(
            r"
            SELECT o.id, o.order_date, o.start_date, o.end_date, o.price_paid, o.status,
                   m.name AS membership_name, m.description AS membership_description,
                   g.id AS gym_id, g.name AS gym_name
            FROM orders o
            JOIN memberships m ON m.id = o.membership_id
            JOIN gyms g ON g.id = m.gym_id
            WHERE o.user_id = $1
            ORDER BY o.order_date DESC, o.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.into_order(today)).collect())
    }

    /// Orders for a gym's plans, newest first, with derived status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_gym(
        &self,
        gym_id: GymId,
        today: NaiveDate,
    ) -> Result<Vec<GymOrder>, RepositoryError> {
        let rows = sqlx::query_as::<_, GymOrderRow>(
            r"
            SELECT o.id, o.order_date, o.start_date, o.end_date, o.price_paid, o.status,
                   m.name AS membership_name,
                   u.full_name AS user_name, u.email AS user_email
            FROM orders o
            JOIN memberships m ON m.id = o.membership_id
            JOIN users u ON u.id = o.user_id
            WHERE m.gym_id = $1
            ORDER BY o.order_date DESC, o.id DESC
            ",
        )
        .bind(gym_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.into_order(today)).collect())
    }

    /// Approve or reject a pending order of the gym.
    ///
    /// Approval reads the plan's current `duration_days` and stores the
    /// activation window starting `today`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not belong to the gym.
    /// Returns `TransitionError` if the order is no longer pending or the
    /// plan has no usable duration.
    pub async fn update_status(
        &self,
        gym_id: GymId,
        order_id: OrderId,
        target: TargetStatus,
        today: NaiveDate,
    ) -> Result<Order, StatusChangeError> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query_as::<_, LockedOrderRow>(
            r"
            SELECT o.status, m.duration_days
            FROM orders o
            JOIN memberships m ON m.id = o.membership_id
            WHERE o.id = $1 AND m.gym_id = $2
            FOR UPDATE OF o
            ",
        )
        .bind(order_id)
        .bind(gym_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound("Order"))?;

        let status = check_transition(locked.status, target)?;
        let window = match target {
            TargetStatus::Active => Some(ActivationWindow::starting(today, locked.duration_days)?),
            TargetStatus::Cancelled => None,
        };

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            UPDATE orders
            SET status = $2, start_date = $3, end_date = $4
            WHERE id = $1
            RETURNING id, user_id, membership_id, price_paid, status,
                      order_date, start_date, end_date
            ",
        )
        .bind(order_id)
        .bind(status)
        .bind(window.map(|w| w.start_date))
        .bind(window.map(|w| w.end_date))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Order::from(row))
    }

    /// Whether the user holds an active, unexpired order at the gym.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn has_active_membership(
        &self,
        user_id: UserId,
        gym_id: GymId,
        today: NaiveDate,
    ) -> Result<bool, RepositoryError> {
        let active: bool = sqlx::query_scalar(
            r"
            SELECT EXISTS (
                SELECT 1
                FROM orders o
                JOIN memberships m ON m.id = o.membership_id
                WHERE o.user_id = $1
                  AND m.gym_id = $2
                  AND o.status = 'active'
                  AND (o.end_date IS NULL OR o.end_date >= $3)
            )
            ",
        )
        .bind(user_id)
        .bind(gym_id)
        .bind(today)
        .fetch_one(self.pool)
        .await?;

        Ok(active)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gym_order_row_reports_expiry() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let row = GymOrderRow {
            id: OrderId::new(7),
            order_date: Utc::now(),
            start_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            price_paid: "49.99".parse().unwrap(),
            status: OrderStatus::Active,
            membership_name: "Monthly".into(),
            user_name: "Ada".into(),
            user_email: Email::parse("ada@example.com").unwrap(),
        };

        assert_eq!(row.into_order(today).status, OrderStatus::Expired);
    }

    #[test]
    fn test_transition_errors_surface() {
        let err = StatusChangeError::from(TransitionError::MissingDuration);
        assert!(matches!(err, StatusChangeError::Transition(_)));

        let err = StatusChangeError::from(sqlx::Error::RowNotFound);
        assert!(matches!(
            err,
            StatusChangeError::Repository(RepositoryError::Database(_))
        ));
    }
}
