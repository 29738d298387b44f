//! Order book for one symbol
//!
//! Two price-indexed FIFO sides plus the order record map. Every indexed
//! order id must have a record and vice versa; a mismatch means the
//! engine state is corrupt and is treated as fatal.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::{LevelEntry, PriceLevel};

use std::collections::HashMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// Both sides of one symbol's book and the backing order records.
#[derive(Debug, Default)]
pub struct SymbolBook {
    bids: BidBook,
    asks: AskBook,
    orders: HashMap<OrderId, Order>,
}

impl SymbolBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Head of the named side without removing it.
    pub fn peek_best(&self, side: Side) -> Option<(OrderId, Price)> {
        let (price, entry) = match side {
            Side::Buy => self.bids.front()?,
            Side::Sell => self.asks.front()?,
        };
        Some((entry.order_id.clone(), price))
    }

    /// Remove the head of the named side together with its record.
    ///
    /// # Panics
    /// Panics if the side is empty or the head has no record; both mean
    /// the caller broke the protocol or the state is corrupt.
    pub fn pop_best(&mut self, side: Side) -> Order {
        let popped = match side {
            Side::Buy => self.bids.pop_front(),
            Side::Sell => self.asks.pop_front(),
        };
        let Some((price, entry)) = popped else {
            panic!("pop_best on empty {side} book");
        };
        let Some(order) = self.orders.remove(&entry.order_id) else {
            panic!("order {} indexed without a record", entry.order_id);
        };
        assert_eq!(order.price, price, "record price diverged for {}", order.order_id);
        assert_eq!(order.side, side, "record side diverged for {}", order.order_id);
        order
    }

    /// Reduce a resting order's quantity by a partial fill.
    ///
    /// The caller guarantees `delta` is strictly less than the remaining
    /// quantity; full consumption goes through [`SymbolBook::pop_best`].
    pub fn decrement_qty(&mut self, order_id: &OrderId, delta: Quantity) {
        let Some(order) = self.orders.get_mut(order_id) else {
            panic!("decrement_qty on unknown order {order_id}");
        };
        order.reduce(delta);
    }

    /// Rest a new order at the correct position of its side.
    ///
    /// # Panics
    /// Panics on a duplicate order id.
    pub fn insert(&mut self, order: Order, seq: u64) {
        match order.side {
            Side::Buy => self.bids.insert(order.price, order.order_id.clone(), seq),
            Side::Sell => self.asks.insert(order.price, order.order_id.clone(), seq),
        }
        let prev = self.orders.insert(order.order_id.clone(), order);
        assert!(prev.is_none(), "duplicate order id inserted");
    }

    /// Full record of a resting order.
    ///
    /// # Panics
    /// Panics on an unknown id: callers only pass ids obtained from this
    /// book, so a miss means state corruption.
    pub fn lookup(&self, order_id: &OrderId) -> &Order {
        match self.orders.get(order_id) {
            Some(order) => order,
            None => panic!("lookup of unknown order {order_id}"),
        }
    }

    /// Non-fatal record access, for inspection and tests.
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Up to `depth` price levels from the head of the named side, with
    /// quantities aggregated per level, best level first.
    pub fn snapshot(&self, side: Side, depth: usize) -> Vec<(Price, Quantity)> {
        let aggregate = |price: Price, level: &PriceLevel| {
            let total: u64 = level
                .iter()
                .map(|entry| self.lookup(&entry.order_id).qty.get())
                .sum();
            (price, Quantity::new(total))
        };
        match side {
            Side::Buy => self
                .bids
                .iter_best_first()
                .take(depth)
                .map(|(p, l)| aggregate(p, l))
                .collect(),
            Side::Sell => self
                .asks
                .iter_best_first()
                .take(depth)
                .map(|(p, l)| aggregate(p, l))
                .collect(),
        }
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Number of resting orders across both sides.
    pub fn resting_count(&self) -> usize {
        self.orders.len()
    }

    /// Total resting quantity on one side, for conservation checks.
    pub fn resting_qty(&self, side: Side) -> u64 {
        self.orders
            .values()
            .filter(|order| order.side == side)
            .map(|order| order.qty.get())
            .sum()
    }

    /// Walk the whole structure and assert its invariants: index and
    /// record map agree, prices and sides match, levels are non-empty,
    /// and the book is uncrossed.
    pub fn check_integrity(&self) {
        let mut indexed = 0usize;
        for (price, level) in self.bids.iter_best_first() {
            assert!(!level.is_empty(), "empty bid level retained at {price}");
            for entry in level.iter() {
                let order = self.lookup(&entry.order_id);
                assert_eq!(order.side, Side::Buy);
                assert_eq!(order.price, price);
                indexed += 1;
            }
        }
        for (price, level) in self.asks.iter_best_first() {
            assert!(!level.is_empty(), "empty ask level retained at {price}");
            for entry in level.iter() {
                let order = self.lookup(&entry.order_id);
                assert_eq!(order.side, Side::Sell);
                assert_eq!(order.price, price);
                indexed += 1;
            }
        }
        assert_eq!(
            indexed,
            self.orders.len(),
            "book index and order records disagree"
        );
        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            assert!(bid < ask, "book is crossed: bid {bid} >= ask {ask}");
        }
    }
}
