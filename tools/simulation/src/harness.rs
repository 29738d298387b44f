//! Load harness
//!
//! Owns an engine on a simulated clock, drives generated orders through
//! it, tallies outcomes and submit latencies, and verifies that no
//! quantity leaked: every submitted unit is either still resting or was
//! consumed once on each side of a trade.

use std::sync::Arc;
use std::time::Instant;

use matching_engine::clock::ManualClock;
use matching_engine::{EngineConfig, MatchingEngine};
use tracing::info;
use types::order::Side;
use types::outcome::Outcome;

use crate::trader::{RandomTrader, TraderConfig};

const SIM_EPOCH_MS: u64 = 1_700_000_000_000;

/// Results of one harness run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub orders: usize,
    pub open: usize,
    pub partial: usize,
    pub filled: usize,
    pub rejected: usize,
    pub trades: usize,
    /// Sum of submitted quantities.
    pub submitted_qty: u64,
    /// Sum of traded quantities across all recorded trades.
    pub traded_qty: u64,
    /// Quantity resting on both sides after the run.
    pub resting_qty: u64,
    /// Submit latencies in nanoseconds, sorted ascending.
    latencies_ns: Vec<u64>,
}

impl RunReport {
    /// Latency at percentile `p` (0.0..=1.0), in nanoseconds.
    pub fn latency_ns(&self, p: f64) -> u64 {
        if self.latencies_ns.is_empty() {
            return 0;
        }
        let rank = ((self.latencies_ns.len() - 1) as f64 * p).round() as usize;
        self.latencies_ns[rank]
    }

    /// Quantity conservation: submitted = resting + 2 × traded.
    pub fn conserves_quantity(&self) -> bool {
        self.submitted_qty == self.resting_qty + 2 * self.traded_qty
    }
}

/// An engine on a simulated clock plus a deterministic order stream.
///
/// The clock advances one millisecond per submission, which keeps every
/// composite id within its per-millisecond sequence budget no matter
/// how fast the host machine is.
pub struct Harness {
    engine: MatchingEngine,
    clock: Arc<ManualClock>,
    trader: RandomTrader,
}

impl Harness {
    pub fn new(engine_config: EngineConfig, trader_config: TraderConfig, seed: u64) -> Self {
        let clock = Arc::new(ManualClock::new(SIM_EPOCH_MS));
        Self {
            engine: MatchingEngine::with_clock(engine_config, clock.clone()),
            clock,
            trader: RandomTrader::new(trader_config, seed),
        }
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Submit `orders` generated orders and collect a report.
    pub fn run(&mut self, orders: usize) -> RunReport {
        let symbol = self.trader.symbol().to_string();
        let mut report = RunReport {
            orders,
            ..RunReport::default()
        };

        for _ in 0..orders {
            let request = self.trader.next_order();
            report.submitted_qty += request.qty.unwrap_or(0) as u64;

            let started = Instant::now();
            let outcome = self.engine.submit(&request);
            report
                .latencies_ns
                .push(started.elapsed().as_nanos() as u64);
            self.clock.advance(1);

            match &outcome {
                Outcome::Open { .. } => report.open += 1,
                Outcome::Partial { .. } => report.partial += 1,
                Outcome::Filled { .. } => report.filled += 1,
                Outcome::Error { .. } => report.rejected += 1,
            }
            report.trades += outcome.trade_ids().len();
            for trade_id in outcome.trade_ids() {
                let trade = self
                    .engine
                    .trade(&symbol, trade_id)
                    .expect("recorded trade must be retrievable");
                report.traded_qty += trade.qty.get();
            }
        }

        report.resting_qty = self.engine.resting_qty(&symbol, Side::Buy)
            + self.engine.resting_qty(&symbol, Side::Sell);
        report.latencies_ns.sort_unstable();

        self.engine.check_integrity(&symbol);

        info!(
            orders = report.orders,
            open = report.open,
            partial = report.partial,
            filled = report.filled,
            trades = report.trades,
            p50_ns = report.latency_ns(0.50),
            p99_ns = report.latency_ns(0.99),
            "harness run complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_run_conserves() {
        let mut harness = Harness::new(EngineConfig::default(), TraderConfig::default(), 11);

        let report = harness.run(200);

        assert_eq!(report.orders, 200);
        assert_eq!(report.rejected, 0);
        assert_eq!(report.open + report.partial + report.filled, 200);
        assert!(report.conserves_quantity());
    }

    #[test]
    fn test_same_seed_same_report() {
        let mut a = Harness::new(EngineConfig::default(), TraderConfig::default(), 5);
        let mut b = Harness::new(EngineConfig::default(), TraderConfig::default(), 5);

        let ra = a.run(300);
        let rb = b.run(300);

        assert_eq!(ra.trades, rb.trades);
        assert_eq!(ra.traded_qty, rb.traded_qty);
        assert_eq!(ra.resting_qty, rb.resting_qty);
        assert_eq!(
            (ra.open, ra.partial, ra.filled),
            (rb.open, rb.partial, rb.filled)
        );
    }

    #[test]
    fn test_percentiles_on_empty_report() {
        let report = RunReport::default();
        assert_eq!(report.latency_ns(0.99), 0);
    }
}
