//! Trade record
//!
//! A trade is an immutable, append-only fact produced by the matching
//! loop. The price is always the resting maker's price.

use crate::ids::{OrderId, TradeId, UserId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// An executed trade between a resting maker and an incoming taker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub maker_order_id: OrderId,
    pub maker_user_id: UserId,
    pub taker_order_id: OrderId,
    pub taker_user_id: UserId,
    /// Execution price: the maker's resting price.
    pub price: Price,
    pub qty: Quantity,
    /// Execution time, wall-clock milliseconds.
    pub timestamp: u64,
}

impl Trade {
    /// Create a trade record.
    ///
    /// # Panics
    /// Panics if maker and taker are the same order; a trade of an order
    /// against itself means the engine state is corrupt.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trade_id: TradeId,
        maker_order_id: OrderId,
        maker_user_id: UserId,
        taker_order_id: OrderId,
        taker_user_id: UserId,
        price: Price,
        qty: Quantity,
        timestamp: u64,
    ) -> Self {
        assert!(
            maker_order_id != taker_order_id,
            "trade matches order {maker_order_id} against itself"
        );
        Self {
            trade_id,
            maker_order_id,
            maker_user_id,
            taker_order_id,
            taker_user_id,
            price,
            qty,
            timestamp,
        }
    }

    /// Trade value (price × quantity) in smallest quote units.
    pub fn notional(&self) -> u128 {
        self.price.get() as u128 * self.qty.get() as u128
    }
}
