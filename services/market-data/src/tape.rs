//! Trade tape
//!
//! Bounded history of decoded trade events for one symbol, in arrival
//! order, with a locally assigned monotonic sequence. Oldest entries
//! are evicted at capacity.

use std::collections::VecDeque;
use types::ids::Symbol;
use types::numeric::Price;

use crate::codec::TradeTick;

/// A trade on the tape, with its local sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeEntry {
    pub sequence: u64,
    pub tick: TradeTick,
}

/// Bounded, append-only view of a symbol's trade stream.
#[derive(Debug)]
pub struct TradeTape {
    symbol: Symbol,
    history: VecDeque<TapeEntry>,
    max_history: usize,
    sequence: u64,
    total_volume: u64,
}

impl TradeTape {
    pub fn new(symbol: Symbol, max_history: usize) -> Self {
        Self {
            symbol,
            history: VecDeque::with_capacity(max_history),
            max_history,
            sequence: 0,
            total_volume: 0,
        }
    }

    /// Append a trade, assigning the next local sequence. Returns the
    /// assigned sequence.
    pub fn push(&mut self, tick: TradeTick) -> u64 {
        self.sequence += 1;
        if self.history.len() >= self.max_history {
            self.history.pop_front();
        }
        self.history.push_back(TapeEntry {
            sequence: self.sequence,
            tick,
        });
        self.total_volume += tick.qty.get();
        self.sequence
    }

    /// Most recent trades, newest first.
    pub fn recent(&self, limit: usize) -> Vec<TapeEntry> {
        self.history.iter().rev().take(limit).copied().collect()
    }

    /// The whole retained history, oldest first.
    pub fn replay(&self) -> Vec<TapeEntry> {
        self.history.iter().copied().collect()
    }

    /// Price of the most recent trade.
    pub fn last_price(&self) -> Option<Price> {
        self.history.back().map(|entry| entry.tick.price)
    }

    /// Total traded quantity observed, including evicted entries.
    pub fn total_volume(&self) -> u64 {
        self.total_volume
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }
}
