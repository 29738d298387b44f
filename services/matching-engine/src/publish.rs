//! Wire formats and channel names for published events
//!
//! Per symbol there are two channels: `orderbook:{symbol}` carries
//! throttled depth snapshots, `trades:{symbol}` carries one message per
//! trade. The payloads are plain text:
//!
//! ```text
//! orderbook:  bid,qty|bid,qty|...\nask,qty|ask,qty|...
//! trade:      price,qty,timestamp_ms
//! ```

use types::ids::Symbol;
use types::numeric::{Price, Quantity};
use types::trade::Trade;

/// Maximum distinct price levels per side in a snapshot.
pub const SNAPSHOT_DEPTH: usize = 100;

/// Name of a symbol's order-book snapshot channel.
pub fn orderbook_channel(symbol: &Symbol) -> String {
    format!("orderbook:{symbol}")
}

/// Name of a symbol's trade channel.
pub fn trades_channel(symbol: &Symbol) -> String {
    format!("trades:{symbol}")
}

/// Render one trade event payload.
pub fn render_trade(trade: &Trade) -> String {
    format!("{},{},{}", trade.price, trade.qty, trade.timestamp)
}

/// Render a depth snapshot payload: bids line, newline, asks line. Each
/// side lists its levels best-first in the book's own order.
pub fn render_book(bids: &[(Price, Quantity)], asks: &[(Price, Quantity)]) -> String {
    format!("{}\n{}", render_side(bids), render_side(asks))
}

fn render_side(levels: &[(Price, Quantity)]) -> String {
    levels
        .iter()
        .map(|(price, qty)| format!("{price},{qty}"))
        .collect::<Vec<_>>()
        .join("|")
}
