//! Business logic services.
//!
//! # Services
//!
//! - `access` - Per-gym authorization and members-only gating
//! - `auth` - Password signup and login
//! - `countries` - Country list from the upstream REST API, cached
//! - `orders` - Order placement and approval

pub mod access;
pub mod auth;
pub mod countries;
pub mod orders;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use gymhub_core::order::TransitionError;

use crate::db::RepositoryError;
use crate::db::orders::StatusChangeError;

pub use auth::{AuthError, AuthService};
pub use countries::{CountriesClient, CountriesError, Country};
pub use orders::OrderService;

/// Errors raised by service flows that combine several repository calls.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The caller lacks the role or assignment the action needs.
    #[error("{0}")]
    Forbidden(&'static str),

    /// A referenced entity is missing; the message is shown to the caller.
    #[error("{0}")]
    NotFound(&'static str),

    /// The request names entities that do not fit together.
    #[error("{0}")]
    BadRequest(&'static str),
}

impl From<StatusChangeError> for ServiceError {
    fn from(err: StatusChangeError) -> Self {
        match err {
            StatusChangeError::Repository(e) => Self::Repository(e),
            StatusChangeError::Transition(e) => Self::Transition(e),
        }
    }
}

/// The calendar date used for activation windows and expiry checks (UTC).
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
