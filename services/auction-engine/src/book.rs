//! Order storage
//!
//! Orders live in an arena keyed by `OrderId`; each side of each symbol
//! keeps an insertion-ordered list of ids into the arena. BTreeMap symbol
//! keys give deterministic iteration across passes.

use std::collections::{BTreeMap, HashMap};
use types::ids::{OrderId, Symbol};
use types::order::{Order, Side};

/// All resting orders across all symbols
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    /// Arena of resting orders
    orders: HashMap<OrderId, Order>,
    /// Resting buy order ids per symbol, in insertion order
    buys: BTreeMap<Symbol, Vec<OrderId>>,
    /// Resting sell order ids per symbol, in insertion order
    sells: BTreeMap<Symbol, Vec<OrderId>>,
}

impl OrderBook {
    /// Create a new empty order book
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an order, appending to its (symbol, side) list
    ///
    /// The list is created on first insertion. No validation happens here;
    /// placement validation is the trader's responsibility.
    pub fn insert(&mut self, order: Order) -> OrderId {
        let order_id = order.order_id;
        let index = match order.side {
            Side::BUY => &mut self.buys,
            Side::SELL => &mut self.sells,
        };
        index.entry(order.symbol.clone()).or_default().push(order_id);
        self.orders.insert(order_id, order);
        order_id
    }

    /// Remove an order from the arena and its side index
    ///
    /// Empty symbol lists are dropped to keep the book clean.
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Order> {
        let order = self.orders.remove(order_id)?;
        let index = match order.side {
            Side::BUY => &mut self.buys,
            Side::SELL => &mut self.sells,
        };
        if let Some(ids) = index.get_mut(&order.symbol) {
            ids.retain(|id| id != order_id);
            if ids.is_empty() {
                index.remove(&order.symbol);
            }
        }
        Some(order)
    }

    /// Look up a resting order
    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Resting orders for one side of a symbol, in insertion order
    pub fn resting(&self, symbol: &Symbol, side: Side) -> impl Iterator<Item = &Order> {
        let index = match side {
            Side::BUY => &self.buys,
            Side::SELL => &self.sells,
        };
        index
            .get(symbol)
            .into_iter()
            .flatten()
            .map(|id| &self.orders[id])
    }

    /// Symbols with resting orders on both sides, in ascending order
    ///
    /// Only these symbols participate in a matching pass.
    pub fn crossed_symbols(&self) -> Vec<Symbol> {
        self.buys
            .keys()
            .filter(|symbol| self.sells.contains_key(*symbol))
            .cloned()
            .collect()
    }

    /// Total number of resting orders
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the book holds no orders
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
