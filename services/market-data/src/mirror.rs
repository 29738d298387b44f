//! Mirrored book state
//!
//! Keeps the most recent depth snapshot for one symbol. The engine
//! publishes whole snapshots, so mirroring is replacement, not delta
//! application; a missed snapshot only delays convergence until the
//! next one.

use types::ids::Symbol;
use types::numeric::{Price, Quantity};

use crate::codec::DepthUpdate;

/// Latest published view of one symbol's book.
#[derive(Debug)]
pub struct BookMirror {
    symbol: Symbol,
    depth: Option<DepthUpdate>,
    updates_applied: u64,
}

impl BookMirror {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            depth: None,
            updates_applied: 0,
        }
    }

    /// Replace the mirrored state with a newer snapshot.
    pub fn apply(&mut self, update: DepthUpdate) {
        self.depth = Some(update);
        self.updates_applied += 1;
    }

    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.depth.as_ref()?.best_bid()
    }

    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.depth.as_ref()?.best_ask()
    }

    /// Midpoint of the top of book.
    pub fn mid_price(&self) -> Option<f64> {
        let (bid, _) = self.best_bid()?;
        let (ask, _) = self.best_ask()?;
        Some((bid.get() + ask.get()) as f64 / 2.0)
    }

    /// Best ask minus best bid, in ticks.
    pub fn spread(&self) -> Option<u64> {
        let (bid, _) = self.best_bid()?;
        let (ask, _) = self.best_ask()?;
        Some(ask.get() - bid.get())
    }

    pub fn depth(&self) -> Option<&DepthUpdate> {
        self.depth.as_ref()
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn updates_applied(&self) -> u64 {
        self.updates_applied
    }
}
