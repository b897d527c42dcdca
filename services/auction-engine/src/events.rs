//! Pass collaborators and the pass report
//!
//! The engine talks to the outside world through two callback traits: one
//! publishes each symbol's new clearing price before settlement, the other
//! delivers fill notifications to the owning trader. Everything that
//! happened in a pass is collected into a `PassReport`, so the caller
//! decides what to do about settlement failures instead of the engine
//! swallowing them.

use serde::{Deserialize, Serialize};
use types::errors::MarketError;
use types::ids::{OrderId, Symbol, TraderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// Receives each symbol's clearing price, once per pass, before any
/// settlement for that symbol
pub trait PricePublisher {
    fn publish(&mut self, symbol: &Symbol, price: Price);
}

/// Delivers a fill notification to the trader owning `order`
///
/// An `Err` means the trader rejected the fill; the engine leaves the
/// order resting and records the failure.
pub trait SettlementHandler {
    fn trade_performed(&mut self, order: &Order, match_price: Price) -> Result<(), MarketError>;
}

/// Clearing price computed for one symbol in a pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearingEvent {
    pub symbol: Symbol,
    pub price: Price,
    pub tradable: Quantity,
}

/// One successfully settled order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub order_id: OrderId,
    pub trader_id: TraderId,
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: Quantity,
    pub price: Price,
}

/// One order whose trader rejected the fill; it stays resting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementFailure {
    pub order_id: OrderId,
    pub trader_id: TraderId,
    pub symbol: Symbol,
    pub side: Side,
    pub error: MarketError,
}

/// Everything one matching pass did
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    pub clearings: Vec<ClearingEvent>,
    pub settlements: Vec<Settlement>,
    pub failures: Vec<SettlementFailure>,
}

impl PassReport {
    /// Check whether the pass changed nothing
    pub fn is_empty(&self) -> bool {
        self.clearings.is_empty() && self.settlements.is_empty() && self.failures.is_empty()
    }

    /// The clearing price published for a symbol, if any
    pub fn clearing_price(&self, symbol: &Symbol) -> Option<Price> {
        self.clearings
            .iter()
            .find(|c| &c.symbol == symbol)
            .map(|c| c.price)
    }

    /// Total settled quantity on one side of a symbol
    pub fn settled_quantity(&self, symbol: &Symbol, side: Side) -> Quantity {
        self.settlements
            .iter()
            .filter(|s| &s.symbol == symbol && s.side == side)
            .map(|s| s.quantity)
            .sum()
    }
}

/// Publisher that drops every price, for passes where nobody listens
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPublisher;

impl PricePublisher for NullPublisher {
    fn publish(&mut self, _symbol: &Symbol, _price: Price) {}
}
