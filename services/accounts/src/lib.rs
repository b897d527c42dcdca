//! Trader accounting
//!
//! A `Trader` owns cash, a merged per-symbol position, and its
//! outstanding orders. It validates placements fully before mutating
//! anything and applies fill notifications atomically, so cash can never
//! go negative and a holding can never be oversold.

pub mod position;
pub mod trader;

pub use position::{Holding, OpenOrder};
pub use trader::Trader;
