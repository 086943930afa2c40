//! Positive decimal price type.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The value is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
}

/// A product price: a strictly positive decimal amount.
///
/// Prices arrive as form text and are parsed with decimal (not binary
/// float) arithmetic, so `"19.90"` stays `19.90`. Zero and negative
/// values are rejected at the boundary.
///
/// ## Examples
///
/// ```
/// use argenta_core::Price;
///
/// let price = Price::parse("19.90").unwrap();
/// assert_eq!(price.to_string(), "19.90");
///
/// assert!(Price::parse("0").is_err());
/// assert!(Price::parse("-5").is_err());
/// assert!(Price::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl Price {
    /// Parse a `Price` from form text.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal number, or
    /// not strictly positive.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount: Decimal = s.parse().map_err(|_| PriceError::NotANumber)?;

        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }

        Ok(Self(amount))
    }

    /// Construct a `Price` from an already-validated decimal amount.
    ///
    /// Returns `None` if the amount is not strictly positive.
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        (amount > Decimal::ZERO).then_some(Self(amount))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Price::parse("19.90").unwrap().to_string(), "19.90");
        assert_eq!(Price::parse(" 5 ").unwrap().to_string(), "5");
        assert_eq!(Price::parse("0.01").unwrap().to_string(), "0.01");
    }

    #[test]
    fn test_parse_zero_rejected() {
        assert!(matches!(Price::parse("0"), Err(PriceError::NotPositive)));
        assert!(matches!(
            Price::parse("0.00"),
            Err(PriceError::NotPositive)
        ));
    }

    #[test]
    fn test_parse_negative_rejected() {
        assert!(matches!(Price::parse("-5"), Err(PriceError::NotPositive)));
    }

    #[test]
    fn test_parse_non_numeric_rejected() {
        assert!(matches!(Price::parse("abc"), Err(PriceError::NotANumber)));
        assert!(matches!(
            Price::parse("12,50"),
            Err(PriceError::NotANumber)
        ));
    }

    #[test]
    fn test_parse_empty_rejected() {
        assert!(matches!(Price::parse(""), Err(PriceError::Empty)));
        assert!(matches!(Price::parse("   "), Err(PriceError::Empty)));
    }

    #[test]
    fn test_no_float_drift() {
        // Decimal arithmetic keeps the textual value exact
        let price = Price::parse("0.1").unwrap();
        assert_eq!(price.to_string(), "0.1");
    }

    #[test]
    fn test_serde_as_string() {
        let price = Price::parse("19.90").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"19.90\"");

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_from_decimal() {
        assert!(Price::from_decimal(Decimal::new(100, 2)).is_some());
        assert!(Price::from_decimal(Decimal::ZERO).is_none());
        assert!(Price::from_decimal(Decimal::new(-1, 0)).is_none());
    }
}
