//! Simulation & load testing for the matching engine
//!
//! Deterministic synthetic order flow and a harness that drives it
//! through a real engine while checking quantity conservation.
//!
//! # Modules
//! - `trader` — seeded random limit-order generator
//! - `harness` — engine-on-simulated-clock runner and run reports

pub mod harness;
pub mod trader;

pub use harness::{Harness, RunReport};
pub use trader::{RandomTrader, TraderConfig};
