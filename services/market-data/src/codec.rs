//! Wire codec for published payloads
//!
//! Two plain-text formats arrive on the engine's channels:
//!
//! ```text
//! orderbook:  bid,qty|bid,qty|...\nask,qty|ask,qty|...
//! trade:      price,qty,timestamp_ms
//! ```
//!
//! Parsing is strict: any malformed field rejects the whole payload.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::numeric::{Price, Quantity};

/// Errors decoding a published payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("missing newline between bid and ask sides")]
    MissingSideSeparator,

    #[error("malformed level `{0}`: expected price,qty")]
    MalformedLevel(String),

    #[error("malformed trade `{0}`: expected price,qty,timestamp")]
    MalformedTrade(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("price and quantity must be positive in `{0}`")]
    NonPositive(String),
}

/// A decoded order-book snapshot: both sides, best level first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthUpdate {
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}

impl DepthUpdate {
    /// Decode an `orderbook:{symbol}` payload.
    pub fn parse(payload: &str) -> Result<Self, CodecError> {
        let (bids, asks) = payload
            .split_once('\n')
            .ok_or(CodecError::MissingSideSeparator)?;
        Ok(Self {
            bids: parse_side(bids)?,
            asks: parse_side(asks)?,
        })
    }

    /// Re-encode; `render(parse(p)) == p` for well-formed payloads.
    pub fn render(&self) -> String {
        format!("{}\n{}", render_side(&self.bids), render_side(&self.asks))
    }

    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.first().copied()
    }

    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.first().copied()
    }
}

/// A decoded trade event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeTick {
    pub price: Price,
    pub qty: Quantity,
    pub timestamp: u64,
}

impl TradeTick {
    /// Decode a `trades:{symbol}` payload.
    pub fn parse(payload: &str) -> Result<Self, CodecError> {
        let mut fields = payload.split(',');
        let (Some(price), Some(qty), Some(ts), None) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            return Err(CodecError::MalformedTrade(payload.to_string()));
        };
        Ok(Self {
            price: parse_price(price, payload)?,
            qty: parse_qty(qty, payload)?,
            timestamp: ts
                .parse()
                .map_err(|_| CodecError::InvalidNumber(ts.to_string()))?,
        })
    }

    pub fn render(&self) -> String {
        format!("{},{},{}", self.price, self.qty, self.timestamp)
    }

    /// Trade value in smallest quote units.
    pub fn notional(&self) -> u128 {
        self.price.get() as u128 * self.qty.get() as u128
    }
}

fn parse_side(side: &str) -> Result<Vec<(Price, Quantity)>, CodecError> {
    if side.is_empty() {
        return Ok(Vec::new());
    }
    side.split('|').map(parse_level).collect()
}

fn parse_level(level: &str) -> Result<(Price, Quantity), CodecError> {
    let (price, qty) = level
        .split_once(',')
        .ok_or_else(|| CodecError::MalformedLevel(level.to_string()))?;
    Ok((parse_price(price, level)?, parse_qty(qty, level)?))
}

fn parse_price(raw: &str, context: &str) -> Result<Price, CodecError> {
    let value: u64 = raw
        .parse()
        .map_err(|_| CodecError::InvalidNumber(raw.to_string()))?;
    Price::try_new(value).ok_or_else(|| CodecError::NonPositive(context.to_string()))
}

fn parse_qty(raw: &str, context: &str) -> Result<Quantity, CodecError> {
    let value: u64 = raw
        .parse()
        .map_err(|_| CodecError::InvalidNumber(raw.to_string()))?;
    Quantity::try_new(value).ok_or_else(|| CodecError::NonPositive(context.to_string()))
}

fn render_side(levels: &[(Price, Quantity)]) -> String {
    levels
        .iter()
        .map(|(price, qty)| format!("{price},{qty}"))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_sided_book() {
        let update = DepthUpdate::parse("100,8|99,7\n101,2").unwrap();
        assert_eq!(
            update.bids,
            vec![
                (Price::new(100), Quantity::new(8)),
                (Price::new(99), Quantity::new(7)),
            ]
        );
        assert_eq!(update.asks, vec![(Price::new(101), Quantity::new(2))]);
        assert_eq!(update.best_bid(), Some((Price::new(100), Quantity::new(8))));
        assert_eq!(update.best_ask(), Some((Price::new(101), Quantity::new(2))));
    }

    #[test]
    fn test_parse_empty_sides() {
        let update = DepthUpdate::parse("\n").unwrap();
        assert!(update.bids.is_empty());
        assert!(update.asks.is_empty());

        let update = DepthUpdate::parse("99,5\n").unwrap();
        assert_eq!(update.bids.len(), 1);
        assert!(update.asks.is_empty());
    }

    #[test]
    fn test_book_round_trip() {
        for payload in ["100,8|99,7\n101,2", "\n", "99,5\n", "\n101,2|102,4"] {
            let update = DepthUpdate::parse(payload).unwrap();
            assert_eq!(update.render(), payload);
        }
    }

    #[test]
    fn test_book_rejects_malformed() {
        assert_eq!(
            DepthUpdate::parse("100,8|99,7"),
            Err(CodecError::MissingSideSeparator)
        );
        assert_eq!(
            DepthUpdate::parse("100\n"),
            Err(CodecError::MalformedLevel("100".into()))
        );
        assert_eq!(
            DepthUpdate::parse("abc,5\n"),
            Err(CodecError::InvalidNumber("abc".into()))
        );
        assert_eq!(
            DepthUpdate::parse("0,5\n"),
            Err(CodecError::NonPositive("0,5".into()))
        );
    }

    #[test]
    fn test_parse_trade() {
        let tick = TradeTick::parse("100,3,1700000000000").unwrap();
        assert_eq!(tick.price, Price::new(100));
        assert_eq!(tick.qty, Quantity::new(3));
        assert_eq!(tick.timestamp, 1700000000000);
        assert_eq!(tick.notional(), 300);
        assert_eq!(tick.render(), "100,3,1700000000000");
    }

    #[test]
    fn test_json_round_trip() {
        let update = DepthUpdate::parse("100,8|99,7\n101,2").unwrap();
        let json = serde_json::to_string(&update).unwrap();
        let back: DepthUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(update, back);

        let tick = TradeTick::parse("100,3,1700000000000").unwrap();
        let json = serde_json::to_string(&tick).unwrap();
        let back: TradeTick = serde_json::from_str(&json).unwrap();
        assert_eq!(tick, back);
    }

    #[test]
    fn test_trade_rejects_malformed() {
        assert!(matches!(
            TradeTick::parse("100,3"),
            Err(CodecError::MalformedTrade(_))
        ));
        assert!(matches!(
            TradeTick::parse("100,3,5,9"),
            Err(CodecError::MalformedTrade(_))
        ));
        assert!(matches!(
            TradeTick::parse("100,x,5"),
            Err(CodecError::InvalidNumber(_))
        ));
    }
}
