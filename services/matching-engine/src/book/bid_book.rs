//! Bid (buy-side) price index
//!
//! Buy levels keyed by price in a BTreeMap; the best bid is the highest
//! price, i.e. the last key. Within a level, arrival order holds.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::price_level::{LevelEntry, PriceLevel};

/// Buy side of a symbol's book.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Queue an order at its price level, creating the level on first use.
    pub fn insert(&mut self, price: Price, order_id: OrderId, seq: u64) {
        self.levels.entry(price).or_default().push_back(order_id, seq);
    }

    /// Best bid price (highest).
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// The head of the book: front entry of the best level.
    pub fn front(&self) -> Option<(Price, &LevelEntry)> {
        let (price, level) = self.levels.iter().next_back()?;
        level.front().map(|entry| (*price, entry))
    }

    /// Remove the head of the book, dropping the level if it empties.
    pub fn pop_front(&mut self) -> Option<(Price, LevelEntry)> {
        let (price, level) = self.levels.iter_mut().next_back()?;
        let price = *price;
        let entry = level.pop_front()?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some((price, entry))
    }

    /// Levels from best to worst (descending price).
    pub fn iter_best_first(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
