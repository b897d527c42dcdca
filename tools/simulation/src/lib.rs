//! Deterministic retail-flow simulation
//!
//! Seeded bots place random orders against the market over a number of
//! rounds, with a matching pass after every round. All randomness comes
//! from `ChaCha8Rng` seeded from the config, so identical configs produce
//! identical summaries.

pub mod bots;
pub mod runner;

pub use bots::{BotConfig, BotOrder, RetailBot, StockView};
pub use runner::{run, Listing, Sim, SimConfig, SimSummary};
