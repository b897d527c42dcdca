//! Clearing-price selection
//!
//! Scans the union of both sides' limit price levels in ascending order
//! and picks the level with the strictly greatest tradable volume. The
//! strict comparison keeps the lowest level among ties. Market-order
//! volume participates through the curves but never anchors the scan, so
//! a symbol with no limit orders at all has no clearing price.

use super::curves::{DemandCurve, SupplyCurve};
use types::numeric::{Price, Quantity};

/// A clearing price and the volume tradable at it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clearing {
    pub price: Price,
    pub tradable: Quantity,
}

/// Find the volume-maximizing clearing price
///
/// Returns None when no limit price level yields positive tradable
/// volume; the symbol then trades nothing this pass.
pub fn find_clearing(demand: &DemandCurve, supply: &SupplyCurve) -> Option<Clearing> {
    let mut levels: Vec<Price> = demand
        .limit_levels()
        .chain(supply.limit_levels())
        .collect();
    levels.sort();
    levels.dedup();

    let mut best: Option<Clearing> = None;
    for price in levels {
        let tradable = demand.volume_at(price).min(supply.volume_at(price));
        if tradable > best.map_or(Quantity::ZERO, |b| b.tradable) {
            best = Some(Clearing { price, tradable });
        }
    }
    best
}
