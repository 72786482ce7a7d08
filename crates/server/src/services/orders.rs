//! Order placement and approval.

use sqlx::PgPool;

use gymhub_core::order::TargetStatus;
use gymhub_core::{GymId, MembershipId, OrderId, SessionUser};

use super::ServiceError;
use crate::db::{MembershipRepository, OrderRepository};
use crate::models::Order;

/// Order workflows for clients and gym admins.
pub struct OrderService<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place a pending order for one of the gym's plans.
    ///
    /// The price is copied from the plan at this moment.
    ///
    /// # Errors
    ///
    /// - `ServiceError::NotFound` if the plan does not exist
    /// - `ServiceError::BadRequest` if the plan belongs to another gym
    /// - `ServiceError::Repository` with `Conflict` if the user already has a
    ///   pending or active order for the plan
    pub async fn place(
        &self,
        user: &SessionUser,
        gym_id: GymId,
        membership_id: MembershipId,
    ) -> Result<Order, ServiceError> {
        let membership = MembershipRepository::new(self.pool)
            .get(membership_id)
            .await?
            .ok_or(ServiceError::NotFound("Selected membership plan not found."))?;

        if membership.gym_id != gym_id {
            return Err(ServiceError::BadRequest(
                "Membership does not belong to the specified gym.",
            ));
        }

        let order = OrderRepository::new(self.pool)
            .create(user.id, membership.id, membership.price)
            .await?;

        tracing::info!(
            order_id = %order.id,
            user_id = %user.id,
            %membership_id,
            price_paid = %order.price_paid,
            "Order placed"
        );
        Ok(order)
    }

    /// Approve or reject a pending order on behalf of a gym manager.
    ///
    /// The target must already be parsed; authorization is checked by the
    /// caller before the body is read.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Repository` with `NotFound` if the order is not one of the gym's
    /// - `ServiceError::Transition` if the order is not pending or the plan
    ///   has no usable duration
    pub async fn change_status(
        &self,
        user: &SessionUser,
        gym_id: GymId,
        order_id: OrderId,
        target: TargetStatus,
    ) -> Result<Order, ServiceError> {
        let order = OrderRepository::new(self.pool)
            .update_status(gym_id, order_id, target, super::today())
            .await?;

        tracing::info!(%order_id, acted_by = %user.id, status = %order.status, "Order reviewed");
        Ok(order)
    }
}
