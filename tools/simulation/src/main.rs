//! Simulation demo
//!
//! Runs a seeded session against the engine with the market-data
//! consumers attached, then logs what the subscribers saw next to the
//! engine's own totals.

use std::sync::{Arc, Mutex};

use market_data::{run_book_feed, run_trade_feed, BookMirror, TradeTape};
use matching_engine::{publish, EngineConfig};
use simulation::{Harness, TraderConfig};
use types::ids::Symbol;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let trader_config = TraderConfig::default();
    let symbol = Symbol::new(trader_config.symbol.clone());
    let mut harness = Harness::new(EngineConfig::default(), trader_config, 42);

    tracing::info!(symbol = %symbol, "starting simulation session");

    let (book_rx, trade_rx) = {
        let hub = harness.engine().hub();
        (
            hub.subscribe(&publish::orderbook_channel(&symbol)),
            hub.subscribe(&publish::trades_channel(&symbol)),
        )
    };
    let mirror = Arc::new(Mutex::new(BookMirror::new(symbol.clone())));
    let tape = Arc::new(Mutex::new(TradeTape::new(symbol.clone(), 1024)));
    let book_task = tokio::spawn(run_book_feed(book_rx, mirror.clone()));
    let trade_task = tokio::spawn(run_trade_feed(trade_rx, tape.clone()));

    let report = harness.run(10_000);

    // Drop the engine so the channels close and the feeds drain out.
    drop(harness);
    let book_stats = book_task.await.expect("book feed task");
    let trade_stats = trade_task.await.expect("trade feed task");

    let mirror = mirror.lock().expect("mirror lock");
    let tape = tape.lock().expect("tape lock");

    tracing::info!(
        orders = report.orders,
        trades = report.trades,
        traded_qty = report.traded_qty,
        resting_qty = report.resting_qty,
        conserved = report.conserves_quantity(),
        p50_ns = report.latency_ns(0.50),
        p99_ns = report.latency_ns(0.99),
        "engine totals"
    );
    tracing::info!(
        snapshots = book_stats.applied,
        lagged = book_stats.lagged,
        best_bid = ?mirror.best_bid().map(|(p, q)| (p.get(), q.get())),
        best_ask = ?mirror.best_ask().map(|(p, q)| (p.get(), q.get())),
        spread = ?mirror.spread(),
        "subscriber book view"
    );
    tracing::info!(
        trade_events = trade_stats.applied,
        tape_volume = tape.total_volume(),
        last_price = ?tape.last_price().map(|p| p.get()),
        "subscriber tape view"
    );
}
