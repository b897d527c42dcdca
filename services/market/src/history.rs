//! Append-only price history

use serde::{Deserialize, Serialize};
use types::ids::Symbol;
use types::numeric::Price;

/// One published clearing price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub sequence: u64,
    pub symbol: Symbol,
    pub price: Price,
    /// Unix nanoseconds
    pub recorded_at: i64,
}

/// Every price ever published, in publication order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketHistory {
    points: Vec<PricePoint>,
}

impl MarketHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, symbol: Symbol, price: Price, recorded_at: i64) {
        self.points.push(PricePoint {
            sequence: self.points.len() as u64,
            symbol,
            price,
            recorded_at,
        });
    }

    /// The most recently published price for a symbol
    pub fn latest(&self, symbol: &Symbol) -> Option<&PricePoint> {
        self.points.iter().rev().find(|p| &p.symbol == symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
