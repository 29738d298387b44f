//! Crossing detection
//!
//! An incoming order trades against a resting price when their limits
//! overlap; equal prices cross.

use types::numeric::Price;
use types::order::Side;

/// Check whether an incoming order at `taker_limit` can trade against a
/// resting maker at `maker_price`.
///
/// A buy crosses any ask at or below its limit; a sell crosses any bid
/// at or above its limit.
pub fn crosses(taker_side: Side, taker_limit: Price, maker_price: Price) -> bool {
    match taker_side {
        Side::Buy => maker_price <= taker_limit,
        Side::Sell => maker_price >= taker_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_crosses_lower_ask() {
        assert!(crosses(Side::Buy, Price::new(105), Price::new(100)));
    }

    #[test]
    fn test_buy_crosses_equal_ask() {
        assert!(crosses(Side::Buy, Price::new(100), Price::new(100)));
    }

    #[test]
    fn test_buy_does_not_cross_higher_ask() {
        assert!(!crosses(Side::Buy, Price::new(99), Price::new(100)));
    }

    #[test]
    fn test_sell_crosses_higher_bid() {
        assert!(crosses(Side::Sell, Price::new(95), Price::new(100)));
    }

    #[test]
    fn test_sell_crosses_equal_bid() {
        assert!(crosses(Side::Sell, Price::new(100), Price::new(100)));
    }

    #[test]
    fn test_sell_does_not_cross_lower_bid() {
        assert!(!crosses(Side::Sell, Price::new(101), Price::new(100)));
    }
}
