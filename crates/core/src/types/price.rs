//! Type-safe price representation using decimal arithmetic.
//!
//! Membership prices are stored as `NUMERIC(10,2)` and snapshotted onto orders
//! at order time, so they never pass through floating point.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is zero or negative once rounded to cents.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The amount does not fit the `NUMERIC(10,2)` column.
    #[error("price must not exceed {max}")]
    TooLarge { max: Decimal },
    /// The amount could not be parsed as a decimal.
    #[error("price is not a valid decimal number")]
    Invalid,
}

/// A strictly positive price in the gym's currency.
///
/// Accepts both JSON numbers and numeric strings on input and serializes as
/// a string (`"49.90"`) so clients never lose precision.
///
/// ```
/// use gymhub_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(4990, 2)).unwrap();
/// assert_eq!(price.to_string(), "49.90");
/// assert!(Price::new(Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Largest amount a `NUMERIC(10,2)` column holds.
    pub const MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

    /// Create a price rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] when the rounded amount is `<= 0`
    /// and [`PriceError::TooLarge`] above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        let amount = amount.round_dp(2);
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        if amount > Self::MAX {
            return Err(PriceError::TooLarge { max: Self::MAX });
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid)?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // A CHECK constraint keeps stored prices positive
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(Price::new(Decimal::ZERO), Err(PriceError::NotPositive));
        assert_eq!(Price::new(Decimal::new(-1, 0)), Err(PriceError::NotPositive));
    }

    #[test]
    fn test_rounds_before_checking_sign() {
        assert_eq!(Price::new(Decimal::new(4, 3)), Err(PriceError::NotPositive));
        assert_eq!(Price::new(Decimal::new(6, 3)).unwrap().to_string(), "0.01");
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(Price::MAX, Decimal::new(9_999_999_999, 2));
        assert_eq!(Price::new(Price::MAX).unwrap().amount(), Price::MAX);
        assert_eq!(
            Price::new(Decimal::new(1_000_000_000, 0)),
            Err(PriceError::TooLarge { max: Price::MAX })
        );
        // Rounds up past the limit.
        assert!(Price::new(Decimal::new(99_999_999_999, 3)).is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let price: Price = "19.5".parse().unwrap();
        assert_eq!(price.to_string(), "19.50");
        assert_eq!("abc".parse::<Price>(), Err(PriceError::Invalid));
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: Price = serde_json::from_str("25.00").unwrap();
        let from_string: Price = serde_json::from_str("\"25\"").unwrap();
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_str::<Price>("0").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let price = Price::new(Decimal::new(4990, 2)).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"49.90\"");
    }
}
