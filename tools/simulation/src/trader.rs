//! Random trader
//!
//! Generates limit orders around a drifting mid price with a
//! deterministic seeded RNG, producing a mix of resting and crossing
//! flow from a small pool of users.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use types::order::{Side, SubmitRequest};

/// Configuration for the random trader.
#[derive(Debug, Clone)]
pub struct TraderConfig {
    pub symbol: String,
    /// Starting mid price in ticks.
    pub mid_price: u64,
    /// Maximum distance of a limit from the mid, in ticks.
    pub max_offset: u64,
    /// Order size range, inclusive.
    pub min_qty: u64,
    pub max_qty: u64,
    /// Number of distinct user ids in the flow.
    pub users: u64,
}

impl Default for TraderConfig {
    fn default() -> Self {
        Self {
            symbol: "BTCUSD".to_string(),
            mid_price: 10_000,
            max_offset: 50,
            min_qty: 1,
            max_qty: 100,
            users: 16,
        }
    }
}

/// Deterministic order generator.
pub struct RandomTrader {
    config: TraderConfig,
    mid: u64,
    rng: ChaCha8Rng,
    orders_generated: usize,
}

impl RandomTrader {
    /// Create a trader with a deterministic seed: the same seed always
    /// produces the same order stream.
    pub fn new(config: TraderConfig, seed: u64) -> Self {
        let mid = config.mid_price;
        Self {
            config,
            mid,
            rng: ChaCha8Rng::seed_from_u64(seed),
            orders_generated: 0,
        }
    }

    /// Generate the next order and drift the mid by one step.
    pub fn next_order(&mut self) -> SubmitRequest {
        let side = if self.rng.gen_bool(0.5) {
            Side::Buy
        } else {
            Side::Sell
        };
        let offset = self
            .rng
            .gen_range(-(self.config.max_offset as i64)..=self.config.max_offset as i64);
        let price = (self.mid as i64 + offset).max(1) as u64;
        let qty = self.rng.gen_range(self.config.min_qty..=self.config.max_qty);
        let user_id = self.rng.gen_range(1..=self.config.users);

        // Random walk of the mid, one tick at a time.
        let step = self.rng.gen_range(-1i64..=1);
        self.mid = (self.mid as i64 + step).max(1) as u64;

        self.orders_generated += 1;
        SubmitRequest::limit(self.config.symbol.clone(), user_id, side, price, qty)
    }

    pub fn orders_generated(&self) -> usize {
        self.orders_generated
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_stream() {
        let mut a = RandomTrader::new(TraderConfig::default(), 42);
        let mut b = RandomTrader::new(TraderConfig::default(), 42);
        for _ in 0..100 {
            assert_eq!(a.next_order(), b.next_order());
        }
    }

    #[test]
    fn test_seeds_diverge() {
        let mut a = RandomTrader::new(TraderConfig::default(), 1);
        let mut b = RandomTrader::new(TraderConfig::default(), 2);
        let differs = (0..32).any(|_| a.next_order() != b.next_order());
        assert!(differs);
    }

    #[test]
    fn test_orders_are_valid_limits() {
        let config = TraderConfig::default();
        let (min_qty, max_qty, users) = (config.min_qty, config.max_qty, config.users);
        let mut trader = RandomTrader::new(config, 7);
        for _ in 0..500 {
            let req = trader.next_order();
            assert_eq!(req.order_type, "limit");
            assert!(req.price.unwrap() > 0);
            let qty = req.qty.unwrap() as u64;
            assert!(qty >= min_qty && qty <= max_qty);
            assert!(req.user_id >= 1 && req.user_id <= users);
        }
    }
}
