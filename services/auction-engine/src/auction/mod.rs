//! Clearing-price computation
//!
//! Two stages: aggregate each side's resting orders into cumulative
//! supply/demand curves, then scan the limit price levels for the price
//! that maximizes tradable volume.

pub mod clearing;
pub mod curves;

pub use clearing::{find_clearing, Clearing};
pub use curves::{aggregate, DemandCurve, SupplyCurve};
