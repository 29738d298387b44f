//! Async feed consumers
//!
//! Drain a subscription into the mirror or the tape. A lagging receiver
//! loses the oldest buffered messages; that is logged and counted, and
//! consumption continues from the newest available. The task ends when
//! the publishing side shuts down.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tracing::{debug, warn};

use crate::codec::{DepthUpdate, TradeTick};
use crate::mirror::BookMirror;
use crate::tape::TradeTape;

/// Counters for one feed task's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Payloads decoded and applied.
    pub applied: u64,
    /// Payloads dropped as undecodable.
    pub parse_errors: u64,
    /// Messages lost to receiver lag.
    pub lagged: u64,
}

/// Consume an `orderbook:{symbol}` subscription into a mirror.
pub async fn run_book_feed(
    mut rx: Receiver<String>,
    mirror: Arc<Mutex<BookMirror>>,
) -> FeedStats {
    let mut stats = FeedStats::default();
    loop {
        match rx.recv().await {
            Ok(payload) => match DepthUpdate::parse(&payload) {
                Ok(update) => {
                    let mut mirror = mirror.lock().expect("mirror poisoned");
                    mirror.apply(update);
                    stats.applied += 1;
                }
                Err(error) => {
                    warn!(%error, "undecodable book payload dropped");
                    stats.parse_errors += 1;
                }
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "book feed lagging, resuming from newest");
                stats.lagged += skipped;
            }
            Err(RecvError::Closed) => break,
        }
    }
    debug!(?stats, "book feed closed");
    stats
}

/// Consume a `trades:{symbol}` subscription onto a tape.
pub async fn run_trade_feed(
    mut rx: Receiver<String>,
    tape: Arc<Mutex<TradeTape>>,
) -> FeedStats {
    let mut stats = FeedStats::default();
    loop {
        match rx.recv().await {
            Ok(payload) => match TradeTick::parse(&payload) {
                Ok(tick) => {
                    let mut tape = tape.lock().expect("tape poisoned");
                    tape.push(tick);
                    stats.applied += 1;
                }
                Err(error) => {
                    warn!(%error, "undecodable trade payload dropped");
                    stats.parse_errors += 1;
                }
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "trade feed lagging, resuming from newest");
                stats.lagged += skipped;
            }
            Err(RecvError::Closed) => break,
        }
    }
    debug!(?stats, "trade feed closed");
    stats
}
