//! Sustained-flow stress runs
//!
//! Large seeded sessions; after every run the book must still satisfy
//! its structural invariants and the quantity ledger must balance.

use matching_engine::EngineConfig;
use simulation::{Harness, TraderConfig};

#[test]
fn stress_20k_orders_conserve_quantity() {
    let mut harness = Harness::new(EngineConfig::default(), TraderConfig::default(), 1337);

    let report = harness.run(20_000);

    assert_eq!(report.orders, 20_000);
    assert_eq!(report.rejected, 0);
    assert!(report.trades > 0, "two-sided flow must cross");
    assert!(
        report.conserves_quantity(),
        "quantity leaked: submitted {} != resting {} + 2*traded {}",
        report.submitted_qty,
        report.resting_qty,
        report.traded_qty
    );
}

#[test]
fn stress_book_stays_uncrossed() {
    let mut harness = Harness::new(
        EngineConfig {
            publish_interval_ms: 0,
            snapshot_depth: 100,
        },
        TraderConfig {
            // A tight band forces constant crossing at few levels.
            max_offset: 3,
            ..TraderConfig::default()
        },
        7,
    );

    harness.run(5_000);

    let engine = harness.engine();
    let symbol = TraderConfig::default().symbol;
    engine.check_integrity(&symbol);
    if let Some(snap) = engine.depth_snapshot(&symbol, 1) {
        if let (Some(bid), Some(ask)) = (snap.bids.first(), snap.asks.first()) {
            assert!(bid.0 < ask.0, "book crossed after stress run");
        }
    }

    // Narrow flow trades heavily.
    assert!(engine.trade_count(&symbol) > 1_000);
}
