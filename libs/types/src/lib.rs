//! Core type definitions for the call-auction exchange
//!
//! Frozen value types shared by every crate in the workspace:
//! identifiers, fixed-point numerics, the resting order, and the
//! single error taxonomy.

pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;

pub use errors::MarketError;
pub use ids::{OrderId, Symbol, TraderId};
pub use numeric::{Price, Quantity};
pub use order::{Order, OrderKind, Side};
