//! The trader: cash, positions, outstanding orders
//!
//! Every operation validates fully before writing, so a failed placement
//! or settlement leaves the trader exactly as it was.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::position::{Holding, OpenOrder};
use types::errors::MarketError;
use types::ids::{Symbol, TraderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// A market participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trader {
    id: TraderId,
    name: String,
    cash: Decimal,
    /// One merged holding per symbol
    positions: BTreeMap<Symbol, Holding>,
    /// At most one outstanding order per symbol
    orders_placed: BTreeMap<Symbol, OpenOrder>,
}

impl Trader {
    /// Create a trader with a name and starting cash
    ///
    /// # Panics
    /// Panics if the starting cash is negative
    pub fn new(name: impl Into<String>, starting_cash: Decimal) -> Self {
        assert!(starting_cash >= Decimal::ZERO, "Starting cash must be non-negative");
        Self {
            id: TraderId::new(),
            name: name.into(),
            cash: starting_cash,
            positions: BTreeMap::new(),
            orders_placed: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> TraderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    /// The merged holding for a symbol, if any shares are held
    pub fn holding(&self, symbol: &Symbol) -> Option<&Holding> {
        self.positions.get(symbol)
    }

    /// All holdings, in symbol order
    pub fn holdings(&self) -> impl Iterator<Item = (&Symbol, &Holding)> {
        self.positions.iter()
    }

    /// All outstanding orders, in symbol order
    pub fn open_orders(&self) -> impl Iterator<Item = (&Symbol, &OpenOrder)> {
        self.orders_placed.iter()
    }

    /// Validate and construct a limit order
    ///
    /// On success the order is recorded as outstanding and returned for
    /// the market to hand to the book. Nothing mutates on failure.
    pub fn place_limit_order(
        &mut self,
        symbol: Symbol,
        side: Side,
        quantity: Quantity,
        limit_price: Price,
        now: i64,
    ) -> Result<Order, MarketError> {
        self.validate_placement(&symbol, side, quantity, limit_price)?;
        let order = Order::new_limit(self.id, symbol, side, quantity, limit_price, now);
        self.record_placement(&order);
        Ok(order)
    }

    /// Validate and construct a market order
    ///
    /// The reference price is used only for the buy-side affordability
    /// check; the order settles at whatever clearing price results later.
    pub fn place_market_order(
        &mut self,
        symbol: Symbol,
        side: Side,
        quantity: Quantity,
        reference_price: Price,
        now: i64,
    ) -> Result<Order, MarketError> {
        self.validate_placement(&symbol, side, quantity, reference_price)?;
        let order = Order::new_market(self.id, symbol, side, quantity, now);
        self.record_placement(&order);
        Ok(order)
    }

    /// Buy shares directly at the reference price, bypassing the book
    ///
    /// Used for initial stock acquisition outside of auction matching.
    pub fn buy_from_bank(
        &mut self,
        symbol: Symbol,
        quantity: Quantity,
        price: Price,
    ) -> Result<(), MarketError> {
        let cost = price.notional(quantity);
        if cost > self.cash {
            return Err(MarketError::InsufficientFunds {
                symbol,
                required: cost,
                available: self.cash,
            });
        }
        self.cash -= cost;
        self.add_to_position(symbol, quantity, cost);
        Ok(())
    }

    /// Fill notification from the order book
    ///
    /// The whole fill is applied atomically: on any error the trader is
    /// unchanged and the book leaves the order resting.
    pub fn trade_performed(&mut self, order: &Order, match_price: Price) -> Result<(), MarketError> {
        debug_assert_eq!(order.trader_id, self.id, "fill routed to wrong trader");
        let notional = match_price.notional(order.quantity);
        match order.side {
            Side::BUY => {
                if notional > self.cash {
                    return Err(MarketError::InsufficientFunds {
                        symbol: order.symbol.clone(),
                        required: notional,
                        available: self.cash,
                    });
                }
                self.cash -= notional;
                self.orders_placed.remove(&order.symbol);
                self.add_to_position(order.symbol.clone(), order.quantity, notional);
            }
            Side::SELL => {
                let held = match self.positions.get(&order.symbol) {
                    Some(holding) => holding.quantity,
                    None => {
                        return Err(MarketError::PositionNotHeld {
                            symbol: order.symbol.clone(),
                        })
                    }
                };
                if held < order.quantity {
                    return Err(MarketError::InsufficientShares {
                        symbol: order.symbol.clone(),
                        held,
                        requested: order.quantity,
                    });
                }
                let holding = self
                    .positions
                    .get_mut(&order.symbol)
                    .expect("holding checked above");
                if holding.consume(order.quantity).is_zero() {
                    self.positions.remove(&order.symbol);
                }
                self.cash += notional;
                self.orders_placed.remove(&order.symbol);
            }
        }
        Ok(())
    }

    /// All placement checks, in order, with no mutation
    fn validate_placement(
        &self,
        symbol: &Symbol,
        side: Side,
        quantity: Quantity,
        price: Price,
    ) -> Result<(), MarketError> {
        match side {
            Side::BUY => {
                let cost = price.notional(quantity);
                if cost > self.cash {
                    return Err(MarketError::InsufficientFunds {
                        symbol: symbol.clone(),
                        required: cost,
                        available: self.cash,
                    });
                }
            }
            Side::SELL => {
                let held = match self.positions.get(symbol) {
                    Some(holding) => holding.quantity,
                    None => {
                        return Err(MarketError::PositionNotHeld {
                            symbol: symbol.clone(),
                        })
                    }
                };
                if held < quantity {
                    return Err(MarketError::InsufficientShares {
                        symbol: symbol.clone(),
                        held,
                        requested: quantity,
                    });
                }
            }
        }
        if self.orders_placed.contains_key(symbol) {
            return Err(MarketError::DuplicateOrder {
                symbol: symbol.clone(),
            });
        }
        Ok(())
    }

    fn record_placement(&mut self, order: &Order) {
        self.orders_placed.insert(
            order.symbol.clone(),
            OpenOrder {
                order_id: order.order_id,
                side: order.side,
                quantity: order.quantity,
                kind: order.kind,
            },
        );
    }

    fn add_to_position(&mut self, symbol: Symbol, quantity: Quantity, cost: Decimal) {
        self.positions
            .entry(symbol)
            .and_modify(|holding| holding.add(quantity, cost))
            .or_insert_with(|| Holding::new(quantity, cost));
    }
}

impl fmt::Display for Trader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trader: {}", self.name)?;
        writeln!(f, "  cash: {}", self.cash)?;
        writeln!(f, "  holdings:")?;
        for (symbol, holding) in &self.positions {
            writeln!(
                f,
                "    {}: {} shares (avg cost {})",
                symbol,
                holding.quantity,
                holding.average_cost()
            )?;
        }
        writeln!(f, "  open orders:")?;
        for (symbol, open) in &self.orders_placed {
            match open.kind {
                types::order::OrderKind::Limit(price) => {
                    writeln!(f, "    {}: {:?} {} limit {}", symbol, open.side, open.quantity, price)?
                }
                types::order::OrderKind::Market => {
                    writeln!(f, "    {}: {:?} {} market", symbol, open.side, open.quantity)?
                }
            }
        }
        Ok(())
    }
}
