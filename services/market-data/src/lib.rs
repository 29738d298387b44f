//! Market Data Service
//!
//! The consuming side of the engine's published channels: a strict
//! codec for the plain-text payloads, a per-symbol book mirror built
//! from depth snapshots, a bounded trade tape, and async feed tasks
//! that keep both current from a subscription.

pub mod codec;
pub mod mirror;
pub mod stream;
pub mod tape;

pub use codec::{CodecError, DepthUpdate, TradeTick};
pub use mirror::BookMirror;
pub use stream::{run_book_feed, run_trade_feed, FeedStats};
pub use tape::{TapeEntry, TradeTape};
