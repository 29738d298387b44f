//! Matching engine
//!
//! Owns all per-symbol state and exposes the single public operation,
//! `submit`. Each submission is one indivisible transition: validation,
//! id allocation, the matching loop, resting the residual, and the
//! throttled snapshot all happen under the symbol's exclusive lock.
//! Different symbols run in parallel; state is fully partitioned.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use tracing::{debug, info};
use types::ids::{OrderId, Symbol, TradeId, UserId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side, SubmitRequest};
use types::outcome::{Outcome, RejectReason};
use types::trade::Trade;

use crate::book::SymbolBook;
use crate::clock::{MonotonicClock, TimeSource};
use crate::matching;
use crate::publish;
use crate::pubsub::EventHub;
use crate::recorder::TradeLog;
use crate::sequence::SequenceAllocator;

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum milliseconds between order-book snapshots per symbol;
    /// zero publishes on every accepted submission.
    pub publish_interval_ms: u64,
    /// Maximum price levels per side in a snapshot.
    pub snapshot_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            publish_interval_ms: 50,
            snapshot_depth: publish::SNAPSHOT_DEPTH,
        }
    }
}

/// Everything the engine owns for one symbol. Guarded by one mutex so a
/// submission is never observable half-applied.
#[derive(Debug, Default)]
struct SymbolState {
    book: SymbolBook,
    seqs: SequenceAllocator,
    trades: TradeLog,
    /// Last snapshot emission, ms; zero means never published.
    last_publish_ms: u64,
}

/// Depth snapshot of one symbol's book, best levels first.
#[derive(Debug, Clone)]
pub struct DepthSnapshot {
    pub symbol: Symbol,
    pub bids: Vec<(Price, Quantity)>,
    pub asks: Vec<(Price, Quantity)>,
}

/// The matching engine: per-symbol books, counters, trade logs, and the
/// event hub subscribers attach to.
pub struct MatchingEngine {
    symbols: DashMap<String, Arc<Mutex<SymbolState>>>,
    hub: Arc<EventHub>,
    clock: Arc<dyn TimeSource>,
    config: EngineConfig,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }

    /// Build an engine on an explicit time source (tests, simulation).
    pub fn with_clock(config: EngineConfig, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            symbols: DashMap::new(),
            hub: Arc::new(EventHub::new()),
            clock,
            config,
        }
    }

    /// The hub carrying this engine's `orderbook:*` and `trades:*`
    /// channels.
    pub fn hub(&self) -> Arc<EventHub> {
        Arc::clone(&self.hub)
    }

    /// Submit an order. The single public state-mutating operation.
    pub fn submit(&self, request: &SubmitRequest) -> Outcome {
        let (symbol, user_id, side, price, qty) = match Self::validate(request) {
            Ok(valid) => valid,
            Err(error) => return Outcome::Error { error },
        };

        let state = self.symbol_state(symbol.as_str());
        let mut state = state.lock().expect("symbol state poisoned by earlier panic");
        let SymbolState {
            book,
            seqs,
            trades,
            last_publish_ms,
        } = &mut *state;

        // One stamp per submission: order id, trade ids, and the resting
        // timestamp all carry the same millisecond.
        let now_ms = self.clock.now_ms();
        let order_id = OrderId::new(now_ms, seqs.next_order());
        let side_seq = seqs.next_side(side);

        let (remaining, trade_ids) = matching::match_incoming(
            book,
            seqs,
            trades,
            &self.hub,
            &symbol,
            &order_id,
            user_id,
            side,
            price,
            qty,
            now_ms,
        );

        if remaining > 0 {
            book.insert(
                Order {
                    order_id: order_id.clone(),
                    user_id,
                    side,
                    price,
                    qty: Quantity::new(remaining),
                    timestamp: now_ms,
                },
                side_seq,
            );
        }

        let outcome = if trade_ids.is_empty() {
            Outcome::Open { order_id }
        } else if remaining == 0 {
            Outcome::Filled {
                order_id,
                trade_ids,
            }
        } else {
            Outcome::Partial {
                order_id,
                remaining_qty: Quantity::new(remaining),
                trade_ids,
            }
        };

        if now_ms.saturating_sub(*last_publish_ms) >= self.config.publish_interval_ms {
            let bids = book.snapshot(Side::Buy, self.config.snapshot_depth);
            let asks = book.snapshot(Side::Sell, self.config.snapshot_depth);
            let receivers = self.hub.publish(
                &publish::orderbook_channel(&symbol),
                publish::render_book(&bids, &asks),
            );
            debug!(symbol = %symbol, receivers, "order book snapshot published");
            *last_publish_ms = now_ms;
        }

        outcome
    }

    /// Read-only depth view of a symbol's book. None until the symbol
    /// has seen its first submission.
    pub fn depth_snapshot(&self, symbol: &str, depth: usize) -> Option<DepthSnapshot> {
        let state = self.symbols.get(symbol)?;
        let state = state.lock().expect("symbol state poisoned by earlier panic");
        Some(DepthSnapshot {
            symbol: Symbol::new(symbol),
            bids: state.book.snapshot(Side::Buy, depth),
            asks: state.book.snapshot(Side::Sell, depth),
        })
    }

    /// Look up a recorded trade.
    pub fn trade(&self, symbol: &str, trade_id: &TradeId) -> Option<Trade> {
        let state = self.symbols.get(symbol)?;
        let state = state.lock().expect("symbol state poisoned by earlier panic");
        state.trades.get(trade_id).cloned()
    }

    /// Number of trades recorded for a symbol.
    pub fn trade_count(&self, symbol: &str) -> usize {
        self.symbols.get(symbol).map_or(0, |state| {
            state
                .lock()
                .expect("symbol state poisoned by earlier panic")
                .trades
                .len()
        })
    }

    /// Total resting quantity on one side of a symbol's book.
    pub fn resting_qty(&self, symbol: &str, side: Side) -> u64 {
        self.symbols.get(symbol).map_or(0, |state| {
            state
                .lock()
                .expect("symbol state poisoned by earlier panic")
                .book
                .resting_qty(side)
        })
    }

    /// Assert the structural invariants of a symbol's book.
    pub fn check_integrity(&self, symbol: &str) {
        if let Some(state) = self.symbols.get(symbol) {
            state
                .lock()
                .expect("symbol state poisoned by earlier panic")
                .book
                .check_integrity();
        }
    }

    fn symbol_state(&self, symbol: &str) -> Arc<Mutex<SymbolState>> {
        if let Some(state) = self.symbols.get(symbol) {
            return Arc::clone(state.value());
        }
        let entry = self.symbols.entry(symbol.to_string()).or_insert_with(|| {
            info!(symbol, "symbol state created");
            Arc::new(Mutex::new(SymbolState::default()))
        });
        Arc::clone(entry.value())
    }

    /// Validate a raw request into typed fields. Failures touch no
    /// state.
    fn validate(
        request: &SubmitRequest,
    ) -> Result<(Symbol, UserId, Side, Price, Quantity), RejectReason> {
        match request.order_type.as_str() {
            "limit" => {}
            "market" => return Err(RejectReason::NotImplemented),
            _ => return Err(RejectReason::InvalidOrderType),
        }
        let side = Side::parse(&request.side).ok_or(RejectReason::InvalidSide)?;
        let price = request
            .price
            .and_then(|raw| u64::try_from(raw).ok())
            .and_then(Price::try_new)
            .ok_or(RejectReason::InvalidPrice)?;
        let qty = request
            .qty
            .and_then(|raw| u64::try_from(raw).ok())
            .and_then(Quantity::try_new)
            .ok_or(RejectReason::InvalidQuantity)?;
        Ok((
            Symbol::new(request.symbol.clone()),
            UserId::new(request.user_id),
            side,
            price,
            qty,
        ))
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
