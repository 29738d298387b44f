//! Trade recording
//!
//! Trades are append-only: each fill allocates an id, persists the full
//! record, and emits the public trade event. Publishing is best-effort;
//! a lost event never rolls back the recorded trade.

use std::collections::HashMap;
use types::ids::{OrderId, Symbol, TradeId, UserId};
use types::numeric::{Price, Quantity};
use types::trade::Trade;

use crate::publish;
use crate::pubsub::EventHub;
use crate::sequence::SequenceAllocator;

/// Append-only trade store for one symbol.
#[derive(Debug, Default)]
pub struct TradeLog {
    trades: HashMap<TradeId, Trade>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a trade.
    ///
    /// # Panics
    /// Panics on a duplicate trade id; the log is append-only and an id
    /// collision means the per-millisecond trade cap was exceeded.
    pub fn insert(&mut self, trade: Trade) {
        let id = trade.trade_id.clone();
        let prev = self.trades.insert(id.clone(), trade);
        assert!(prev.is_none(), "duplicate trade id {id}");
    }

    pub fn get(&self, trade_id: &TradeId) -> Option<&Trade> {
        self.trades.get(trade_id)
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trade> {
        self.trades.values()
    }
}

/// Record one fill: allocate the trade id, persist the record, and emit
/// the trade event on the symbol's trade channel.
#[allow(clippy::too_many_arguments)]
pub(crate) fn record_trade(
    log: &mut TradeLog,
    seqs: &mut SequenceAllocator,
    hub: &EventHub,
    symbol: &Symbol,
    maker_order_id: OrderId,
    maker_user_id: UserId,
    taker_order_id: OrderId,
    taker_user_id: UserId,
    price: Price,
    qty: Quantity,
    now_ms: u64,
) -> TradeId {
    let trade_id = TradeId::new(now_ms, seqs.next_trade());
    let trade = Trade::new(
        trade_id.clone(),
        maker_order_id,
        maker_user_id,
        taker_order_id,
        taker_user_id,
        price,
        qty,
        now_ms,
    );
    hub.publish(&publish::trades_channel(symbol), publish::render_trade(&trade));
    log.insert(trade);
    trade_id
}
