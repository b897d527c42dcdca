//! Market wiring: stocks, traders, book, and the pass entry point

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use accounts::Trader;
use auction_engine::{OrderBook, PassReport, PricePublisher, SettlementHandler};
use types::errors::MarketError;
use types::ids::{OrderId, Symbol, TraderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use crate::history::MarketHistory;

/// A listed stock and its current reference price
///
/// The reference price starts at the listing price and follows each
/// published clearing price thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub symbol: Symbol,
    pub price: Price,
}

/// The exchange: every listed stock, every registered trader, one book
#[derive(Debug, Default)]
pub struct Market {
    stocks: BTreeMap<Symbol, Stock>,
    traders: BTreeMap<TraderId, Trader>,
    book: OrderBook,
    history: MarketHistory,
}

impl Market {
    pub fn new() -> Self {
        Self::default()
    }

    /// List a stock at its initial reference price
    pub fn list_stock(&mut self, symbol: Symbol, initial_price: Price) -> Result<(), MarketError> {
        if self.stocks.contains_key(&symbol) {
            return Err(MarketError::AlreadyListed(symbol));
        }
        info!(%symbol, price = %initial_price, "stock listed");
        self.history.record(symbol.clone(), initial_price, now());
        self.stocks.insert(
            symbol.clone(),
            Stock {
                symbol,
                price: initial_price,
            },
        );
        Ok(())
    }

    /// Register a trader and return its id
    pub fn register_trader(&mut self, name: impl Into<String>, starting_cash: Decimal) -> TraderId {
        let trader = Trader::new(name, starting_cash);
        let id = trader.id();
        self.traders.insert(id, trader);
        id
    }

    /// The current reference price for a listed symbol
    pub fn stock_price(&self, symbol: &Symbol) -> Result<Price, MarketError> {
        self.stocks
            .get(symbol)
            .map(|stock| stock.price)
            .ok_or_else(|| MarketError::UnknownSymbol(symbol.clone()))
    }

    pub fn trader(&self, id: &TraderId) -> Option<&Trader> {
        self.traders.get(id)
    }

    pub fn traders(&self) -> impl Iterator<Item = &Trader> {
        self.traders.values()
    }

    pub fn stocks(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.values()
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn history(&self) -> &MarketHistory {
        &self.history
    }

    /// Place a limit order into the book
    ///
    /// Validation runs on the trader before anything enters the book, so
    /// a rejected placement leaves both untouched.
    pub fn place_order(
        &mut self,
        trader_id: TraderId,
        symbol: Symbol,
        side: Side,
        quantity: Quantity,
        limit_price: Price,
    ) -> Result<OrderId, MarketError> {
        self.stock_price(&symbol)?;
        let trader = self.trader_mut(trader_id)?;
        let order = trader.place_limit_order(symbol, side, quantity, limit_price, now())?;
        let order_id = order.order_id;
        self.book.insert(order);
        Ok(order_id)
    }

    /// Place a market order, validated against the current reference price
    pub fn place_market_order(
        &mut self,
        trader_id: TraderId,
        symbol: Symbol,
        side: Side,
        quantity: Quantity,
    ) -> Result<OrderId, MarketError> {
        let reference_price = self.stock_price(&symbol)?;
        let trader = self.trader_mut(trader_id)?;
        let order = trader.place_market_order(symbol, side, quantity, reference_price, now())?;
        let order_id = order.order_id;
        self.book.insert(order);
        Ok(order_id)
    }

    /// Buy shares directly at the reference price, bypassing the book
    pub fn buy_from_bank(
        &mut self,
        trader_id: TraderId,
        symbol: Symbol,
        quantity: Quantity,
    ) -> Result<(), MarketError> {
        let price = self.stock_price(&symbol)?;
        let trader = self.trader_mut(trader_id)?;
        trader.buy_from_bank(symbol, quantity, price)
    }

    /// Run one matching pass over the whole book
    ///
    /// Each symbol's published clearing price becomes the new reference
    /// price and lands in the history before any fill settles against a
    /// trader.
    pub fn trade(&mut self) -> PassReport {
        let mut publisher = ReferencePricePublisher {
            stocks: &mut self.stocks,
            history: &mut self.history,
            now: now(),
        };
        let mut settler = TraderSettler {
            traders: &mut self.traders,
        };
        let report = self.book.trade(&mut publisher, &mut settler);
        info!(
            clearings = report.clearings.len(),
            settlements = report.settlements.len(),
            failures = report.failures.len(),
            "matching pass complete"
        );
        report
    }

    fn trader_mut(&mut self, id: TraderId) -> Result<&mut Trader, MarketError> {
        self.traders
            .get_mut(&id)
            .ok_or(MarketError::UnknownTrader(id))
    }
}

/// Updates reference prices and the history as clearing prices publish
struct ReferencePricePublisher<'a> {
    stocks: &'a mut BTreeMap<Symbol, Stock>,
    history: &'a mut MarketHistory,
    now: i64,
}

impl PricePublisher for ReferencePricePublisher<'_> {
    fn publish(&mut self, symbol: &Symbol, price: Price) {
        if let Some(stock) = self.stocks.get_mut(symbol) {
            stock.price = price;
        }
        self.history.record(symbol.clone(), price, self.now);
    }
}

/// Routes fill notifications to the owning trader
struct TraderSettler<'a> {
    traders: &'a mut BTreeMap<TraderId, Trader>,
}

impl SettlementHandler for TraderSettler<'_> {
    fn trade_performed(&mut self, order: &Order, match_price: Price) -> Result<(), MarketError> {
        let trader = self
            .traders
            .get_mut(&order.trader_id)
            .ok_or(MarketError::UnknownTrader(order.trader_id))?;
        trader.trade_performed(order, match_price)
    }
}

fn now() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
}
