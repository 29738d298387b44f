//! Ask (sell-side) price index
//!
//! Sell levels keyed by price in a BTreeMap; the best ask is the lowest
//! price, i.e. the first key. Within a level, arrival order holds.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::price_level::{LevelEntry, PriceLevel};

/// Sell side of a symbol's book.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Queue an order at its price level, creating the level on first use.
    pub fn insert(&mut self, price: Price, order_id: OrderId, seq: u64) {
        self.levels.entry(price).or_default().push_back(order_id, seq);
    }

    /// Best ask price (lowest).
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// The head of the book: front entry of the best level.
    pub fn front(&self) -> Option<(Price, &LevelEntry)> {
        let (price, level) = self.levels.iter().next()?;
        level.front().map(|entry| (*price, entry))
    }

    /// Remove the head of the book, dropping the level if it empties.
    pub fn pop_front(&mut self) -> Option<(Price, LevelEntry)> {
        let (price, level) = self.levels.iter_mut().next()?;
        let price = *price;
        let entry = level.pop_front()?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some((price, entry))
    }

    /// Levels from best to worst (ascending price).
    pub fn iter_best_first(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().map(|(price, level)| (*price, level))
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
