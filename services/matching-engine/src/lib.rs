//! Matching Engine Service
//!
//! Limit-order matching under strict price-time priority for a
//! single-asset exchange: per-symbol order books, a matching loop that
//! walks the opposite side producing trades at the maker's price, an
//! append-only trade log, and a throttled order-book snapshot publisher.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced (best price first, FIFO
//!   within a price level)
//! - One submission is one indivisible state transition per symbol
//! - Trade price is always the resting maker's price
//! - No quantity appears or disappears outside trades

pub mod book;
pub mod clock;
pub mod engine;
pub mod matching;
pub mod publish;
pub mod pubsub;
pub mod recorder;
pub mod sequence;

pub use engine::{DepthSnapshot, EngineConfig, MatchingEngine};
pub use pubsub::EventHub;
