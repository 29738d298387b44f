//! Order types
//!
//! The resting order record and the raw submission request. The request
//! carries `order_type` and `side` as received from the caller so the
//! engine owns the full validation taxonomy.

use crate::ids::{OrderId, UserId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Parse a caller-supplied side string; anything but `buy`/`sell`
    /// is invalid.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "buy" => Some(Side::Buy),
            "sell" => Some(Side::Sell),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resting order on the book.
///
/// `qty` is the remaining quantity and is decremented by fills; an order
/// whose quantity would reach zero is removed atomically with the fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub side: Side,
    pub price: Price,
    pub qty: Quantity,
    /// Arrival time, wall-clock milliseconds.
    pub timestamp: u64,
}

impl Order {
    /// Reduce the remaining quantity by a partial fill.
    ///
    /// # Panics
    /// Panics if `delta` would consume the full quantity; full
    /// consumption must remove the order instead.
    pub fn reduce(&mut self, delta: Quantity) {
        match self.qty.checked_sub(delta) {
            Some(rest) => self.qty = rest,
            None => panic!(
                "fill of {delta} does not leave {} resting",
                self.order_id
            ),
        }
    }
}

/// A raw order submission as received from the caller.
///
/// `order_type` and `side` stay unparsed strings and `price`/`qty` stay
/// optional so the engine can report the precise reject reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub symbol: String,
    pub order_type: String,
    pub user_id: u64,
    pub side: String,
    pub price: Option<i64>,
    pub qty: Option<i64>,
}

impl SubmitRequest {
    /// Convenience constructor for a well-formed limit order.
    pub fn limit(symbol: impl Into<String>, user_id: u64, side: Side, price: u64, qty: u64) -> Self {
        Self {
            symbol: symbol.into(),
            order_type: "limit".to_string(),
            user_id,
            side: side.as_str().to_string(),
            price: Some(price as i64),
            qty: Some(qty as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!(Side::parse("buy"), Some(Side::Buy));
        assert_eq!(Side::parse("sell"), Some(Side::Sell));
        assert_eq!(Side::parse("BUY"), None);
        assert_eq!(Side::parse("hold"), None);
    }

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"buy\"");
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), "\"sell\"");
    }

    #[test]
    fn test_order_reduce_partial() {
        let mut order = Order {
            order_id: OrderId::new(1700000000000, 0),
            user_id: UserId::new(1),
            side: Side::Buy,
            price: Price::new(100),
            qty: Quantity::new(5),
            timestamp: 1700000000000,
        };
        order.reduce(Quantity::new(3));
        assert_eq!(order.qty, Quantity::new(2));
    }

    #[test]
    #[should_panic(expected = "does not leave")]
    fn test_order_reduce_full_panics() {
        let mut order = Order {
            order_id: OrderId::new(1700000000000, 0),
            user_id: UserId::new(1),
            side: Side::Buy,
            price: Price::new(100),
            qty: Quantity::new(5),
            timestamp: 1700000000000,
        };
        order.reduce(Quantity::new(5));
    }

    #[test]
    fn test_limit_request() {
        let req = SubmitRequest::limit("BTCUSD", 7, Side::Sell, 101, 3);
        assert_eq!(req.order_type, "limit");
        assert_eq!(req.side, "sell");
        assert_eq!(req.price, Some(101));
        assert_eq!(req.qty, Some(3));
    }

    #[test]
    fn test_request_deserialization() {
        let json = r#"{"symbol":"BTCUSD","order_type":"limit","user_id":1,"side":"buy","price":100,"qty":5}"#;
        let req: SubmitRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.symbol, "BTCUSD");
        assert_eq!(req.price, Some(100));
    }
}
