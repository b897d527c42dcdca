//! Uniform-price call-auction engine
//!
//! Holds every resting order across all symbols and, on each `trade()`
//! pass, computes one clearing price per symbol that maximizes tradable
//! volume, publishes it, and settles every crossing order at that price.
//!
//! **Key invariants:**
//! - One clearing price per symbol per pass, published before settlement
//! - Symbols resting on only one side are never touched by a pass
//! - A settlement failure leaves the order resting; it never aborts the
//!   rest of the symbol's pass
//! - Deterministic passes (symbols and orders visited in a fixed order)

pub mod auction;
pub mod book;
pub mod engine;
pub mod events;

pub use book::OrderBook;
pub use events::{PassReport, PricePublisher, SettlementHandler};
