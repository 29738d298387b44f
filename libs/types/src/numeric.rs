//! Integer tick types for prices and quantities
//!
//! Prices and quantities are whole numbers of the smallest unit. Both
//! must always be strictly positive: a resting order that would reach
//! quantity zero is removed instead, so a zero value is unrepresentable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Limit price in smallest units.
///
/// Must always be positive. Ordered, so it can key the per-side
/// price-level index directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Create a new Price.
    ///
    /// # Panics
    /// Panics if the price is zero.
    pub fn new(value: u64) -> Self {
        assert!(value > 0, "Price must be positive");
        Self(value)
    }

    /// Try to create a Price, returning None if invalid.
    pub fn try_new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        Self::try_new(value).ok_or_else(|| serde::de::Error::custom("Price must be positive"))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remaining quantity in smallest units.
///
/// Must always be positive; fills that would leave zero remove the order
/// instead of storing a zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    /// Create a new Quantity.
    ///
    /// # Panics
    /// Panics if the quantity is zero.
    pub fn new(value: u64) -> Self {
        assert!(value > 0, "Quantity must be positive");
        Self(value)
    }

    /// Try to create a Quantity, returning None if invalid.
    pub fn try_new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Subtract `delta`, returning None when nothing positive would
    /// remain (the caller must remove the order instead).
    pub fn checked_sub(&self, delta: Quantity) -> Option<Quantity> {
        self.0.checked_sub(delta.0).and_then(Quantity::try_new)
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        Self::try_new(value).ok_or_else(|| serde::de::Error::custom("Quantity must be positive"))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_creation() {
        let price = Price::new(100);
        assert_eq!(price.get(), 100);
    }

    #[test]
    #[should_panic(expected = "Price must be positive")]
    fn test_price_zero_panics() {
        Price::new(0);
    }

    #[test]
    fn test_price_try_new() {
        assert!(Price::try_new(1).is_some());
        assert!(Price::try_new(0).is_none());
    }

    #[test]
    fn test_price_ordering() {
        assert!(Price::new(99) < Price::new(100));
        assert!(Price::new(101) > Price::new(100));
    }

    #[test]
    fn test_quantity_checked_sub() {
        let qty = Quantity::new(5);
        assert_eq!(qty.checked_sub(Quantity::new(3)), Some(Quantity::new(2)));
        // Subtracting everything leaves nothing representable
        assert_eq!(qty.checked_sub(Quantity::new(5)), None);
        assert_eq!(qty.checked_sub(Quantity::new(6)), None);
    }

    #[test]
    fn test_quantity_add() {
        assert_eq!(Quantity::new(2) + Quantity::new(3), Quantity::new(5));
    }

    #[test]
    fn test_price_serialization() {
        let price = Price::new(50000);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "50000");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, back);
    }

    #[test]
    fn test_zero_rejected_on_deserialize() {
        assert!(serde_json::from_str::<Price>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }
}
