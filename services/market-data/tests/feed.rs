//! Engine-to-consumer integration
//!
//! Wires a real engine's channels into the mirror and tape and checks
//! the decoded state agrees with the engine's own view.

use std::sync::{Arc, Mutex};

use market_data::{run_book_feed, run_trade_feed, BookMirror, TradeTape};
use matching_engine::clock::ManualClock;
use matching_engine::{publish, EngineConfig, MatchingEngine};
use types::ids::Symbol;
use types::numeric::{Price, Quantity};
use types::order::{Side, SubmitRequest};

const SYMBOL: &str = "BTCUSD";
const T0: u64 = 1_700_000_000_000;

#[tokio::test]
async fn mirror_and_tape_track_engine() {
    let clock = Arc::new(ManualClock::new(T0));
    let engine = MatchingEngine::with_clock(
        EngineConfig {
            publish_interval_ms: 0,
            snapshot_depth: 100,
        },
        clock.clone(),
    );
    let symbol = Symbol::new(SYMBOL);

    let (book_rx, trade_rx) = {
        let hub = engine.hub();
        (
            hub.subscribe(&publish::orderbook_channel(&symbol)),
            hub.subscribe(&publish::trades_channel(&symbol)),
        )
    };

    let mirror = Arc::new(Mutex::new(BookMirror::new(symbol.clone())));
    let tape = Arc::new(Mutex::new(TradeTape::new(symbol.clone(), 64)));
    let book_task = tokio::spawn(run_book_feed(book_rx, mirror.clone()));
    let trade_task = tokio::spawn(run_trade_feed(trade_rx, tape.clone()));

    // Build a two-sided book, then trade through the ask.
    engine.submit(&SubmitRequest::limit(SYMBOL, 1, Side::Buy, 99, 5));
    clock.advance(1);
    engine.submit(&SubmitRequest::limit(SYMBOL, 2, Side::Sell, 101, 4));
    clock.advance(1);
    engine.submit(&SubmitRequest::limit(SYMBOL, 3, Side::Buy, 101, 3));
    clock.advance(1);

    // Close the channels so the feed tasks drain and finish.
    drop(engine);

    let book_stats = book_task.await.unwrap();
    let trade_stats = trade_task.await.unwrap();
    assert_eq!(book_stats.applied, 3);
    assert_eq!(book_stats.parse_errors, 0);
    assert_eq!(trade_stats.applied, 1);

    let mirror = mirror.lock().unwrap();
    assert_eq!(mirror.best_bid(), Some((Price::new(99), Quantity::new(5))));
    assert_eq!(mirror.best_ask(), Some((Price::new(101), Quantity::new(1))));
    assert_eq!(mirror.spread(), Some(2));

    let tape = tape.lock().unwrap();
    assert_eq!(tape.len(), 1);
    let entry = tape.replay()[0];
    // Execution at the maker's resting price.
    assert_eq!(entry.tick.price, Price::new(101));
    assert_eq!(entry.tick.qty, Quantity::new(3));
    assert_eq!(entry.tick.timestamp, T0 + 2);
    assert_eq!(tape.total_volume(), 3);
}
