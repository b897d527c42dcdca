//! Resting order types
//!
//! An `Order` is a single buy or sell instruction. Once placed it is
//! immutable; it rests in the book until a pass settles its entire size
//! or its trader rejects the fill.

use crate::ids::{OrderId, Symbol, TraderId};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

/// Pricing mode for an order
///
/// A market order carries no limit price and settles at whatever clearing
/// price the auction produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "price")]
pub enum OrderKind {
    /// Executable only at the limit price or better
    Limit(Price),
    /// Executable at any clearing price
    Market,
}

/// A resting order
///
/// Owned by the book while resting; `trader_id` links back to the trader
/// that placed it and receives the fill notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub trader_id: TraderId,
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: Quantity,
    pub kind: OrderKind,
    pub created_at: i64, // Unix nanos
}

impl Order {
    /// Create a new limit order
    ///
    /// # Panics
    /// Panics if the quantity is zero
    pub fn new_limit(
        trader_id: TraderId,
        symbol: Symbol,
        side: Side,
        quantity: Quantity,
        limit_price: Price,
        created_at: i64,
    ) -> Self {
        assert!(!quantity.is_zero(), "Order quantity must be positive");
        Self {
            order_id: OrderId::new(),
            trader_id,
            symbol,
            side,
            quantity,
            kind: OrderKind::Limit(limit_price),
            created_at,
        }
    }

    /// Create a new market order
    ///
    /// # Panics
    /// Panics if the quantity is zero
    pub fn new_market(
        trader_id: TraderId,
        symbol: Symbol,
        side: Side,
        quantity: Quantity,
        created_at: i64,
    ) -> Self {
        assert!(!quantity.is_zero(), "Order quantity must be positive");
        Self {
            order_id: OrderId::new(),
            trader_id,
            symbol,
            side,
            quantity,
            kind: OrderKind::Market,
            created_at,
        }
    }

    /// The limit price, or None for a market order
    pub fn limit_price(&self) -> Option<Price> {
        match self.kind {
            OrderKind::Limit(price) => Some(price),
            OrderKind::Market => None,
        }
    }

    /// Check if this is a market order
    pub fn is_market(&self) -> bool {
        matches!(self.kind, OrderKind::Market)
    }

    /// Check whether this order executes at the given clearing price
    ///
    /// Market orders always cross. A limit buy crosses when its limit is at
    /// or above the clearing price; a limit sell when its limit is at or
    /// below it.
    pub fn crosses(&self, clearing_price: Price) -> bool {
        match self.kind {
            OrderKind::Market => true,
            OrderKind::Limit(limit) => match self.side {
                Side::BUY => limit >= clearing_price,
                Side::SELL => limit <= clearing_price,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit_order(side: Side, price: u64, quantity: u64) -> Order {
        Order::new_limit(
            TraderId::new(),
            Symbol::new("IBM"),
            side,
            Quantity::new(quantity),
            Price::from_u64(price),
            1_708_123_456_789_000_000,
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::BUY.opposite(), Side::SELL);
        assert_eq!(Side::SELL.opposite(), Side::BUY);
    }

    #[test]
    fn test_limit_order_creation() {
        let order = limit_order(Side::BUY, 50, 10);
        assert_eq!(order.limit_price(), Some(Price::from_u64(50)));
        assert!(!order.is_market());
    }

    #[test]
    fn test_market_order_creation() {
        let order = Order::new_market(
            TraderId::new(),
            Symbol::new("MSFT"),
            Side::SELL,
            Quantity::new(5),
            1_708_123_456_789_000_000,
        );
        assert!(order.is_market());
        assert_eq!(order.limit_price(), None);
    }

    #[test]
    #[should_panic(expected = "Order quantity must be positive")]
    fn test_zero_quantity_panics() {
        limit_order(Side::BUY, 50, 0);
    }

    #[test]
    fn test_buy_crosses_at_or_below_limit() {
        let order = limit_order(Side::BUY, 50, 10);
        assert!(order.crosses(Price::from_u64(40)));
        assert!(order.crosses(Price::from_u64(50)));
        assert!(!order.crosses(Price::from_u64(51)));
    }

    #[test]
    fn test_sell_crosses_at_or_above_limit() {
        let order = limit_order(Side::SELL, 40, 10);
        assert!(order.crosses(Price::from_u64(50)));
        assert!(order.crosses(Price::from_u64(40)));
        assert!(!order.crosses(Price::from_u64(39)));
    }

    #[test]
    fn test_market_order_always_crosses() {
        let order = Order::new_market(
            TraderId::new(),
            Symbol::new("IBM"),
            Side::BUY,
            Quantity::new(3),
            0,
        );
        assert!(order.crosses(Price::ZERO));
        assert!(order.crosses(Price::from_u64(1_000_000)));
    }


    #[test]
    fn test_order_serialization() {
        let order = limit_order(Side::BUY, 50, 10);
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
