//! Simulation driver
//!
//! Builds a market from config, seeds every bot with cash and shares,
//! then loops place-then-match rounds. The summary is a pure function of
//! the config: bot seeds derive from the master seed, and every map the
//! loop iterates is ordered.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use market::Market;
use types::ids::{Symbol, TraderId};
use types::numeric::{Price, Quantity};

use crate::bots::{BotConfig, RetailBot, StockView};

/// One stock to list at simulation start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: String,
    pub price: u64,
}

/// Simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub seed: u64,
    pub rounds: u32,
    pub bots: u32,
    /// Starting cash per bot, in whole currency units
    pub starting_cash: u64,
    /// Shares of each listed stock bought from the bank per bot at start
    pub initial_shares: u64,
    pub listings: Vec<Listing>,
    pub bot: BotConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rounds: 50,
            bots: 8,
            starting_cash: 10_000,
            initial_shares: 20,
            listings: vec![
                Listing { symbol: "IBM".into(), price: 45 },
                Listing { symbol: "MSFT".into(), price: 100 },
            ],
            bot: BotConfig::default(),
        }
    }
}

/// What the whole run did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSummary {
    pub rounds: u32,
    pub orders_placed: u64,
    pub placements_rejected: u64,
    pub settlements: u64,
    pub settlement_failures: u64,
    pub clearings: u64,
    pub final_prices: BTreeMap<Symbol, Price>,
    pub total_cash: Decimal,
}

/// A simulation in progress, steppable one round at a time.
pub struct Sim {
    market: Market,
    bots: Vec<RetailBot>,
    rounds_run: u32,
    orders_placed: u64,
    placements_rejected: u64,
    settlements: u64,
    settlement_failures: u64,
    clearings: u64,
}

impl Sim {
    /// Build the market, register the bots, and hand out initial shares.
    pub fn new(config: &SimConfig) -> Self {
        let mut market = Market::new();
        for listing in &config.listings {
            market
                .list_stock(Symbol::new(listing.symbol.as_str()), Price::from_u64(listing.price))
                .expect("listings in config are distinct");
        }

        let mut bots = Vec::with_capacity(config.bots as usize);
        for i in 0..config.bots {
            let trader_id = market
                .register_trader(format!("bot-{i}"), Decimal::from(config.starting_cash));
            for listing in &config.listings {
                market
                    .buy_from_bank(
                        trader_id,
                        Symbol::new(listing.symbol.as_str()),
                        Quantity::new(config.initial_shares),
                    )
                    .expect("starting cash covers initial shares");
            }
            bots.push(RetailBot::new(
                trader_id,
                config.bot.clone(),
                config.seed.wrapping_add(i as u64),
            ));
        }

        Self {
            market,
            bots,
            rounds_run: 0,
            orders_placed: 0,
            placements_rejected: 0,
            settlements: 0,
            settlement_failures: 0,
            clearings: 0,
        }
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    /// One round: every bot places at most one order, then one pass runs.
    pub fn step(&mut self) {
        for bot in &mut self.bots {
            let stocks = stock_views(&self.market, bot.trader_id);
            let Some(order) = bot.decide(&stocks) else {
                continue;
            };
            let placed = match order.limit {
                Some(price) => self.market.place_order(
                    bot.trader_id,
                    order.symbol,
                    order.side,
                    order.quantity,
                    price,
                ),
                None => self.market.place_market_order(
                    bot.trader_id,
                    order.symbol,
                    order.side,
                    order.quantity,
                ),
            };
            match placed {
                Ok(_) => self.orders_placed += 1,
                Err(error) => {
                    debug!(%error, "placement rejected");
                    self.placements_rejected += 1;
                }
            }
        }

        let report = self.market.trade();
        self.settlements += report.settlements.len() as u64;
        self.settlement_failures += report.failures.len() as u64;
        self.clearings += report.clearings.len() as u64;
        self.rounds_run += 1;
    }

    pub fn summary(&self) -> SimSummary {
        let final_prices = self
            .market
            .stocks()
            .map(|stock| (stock.symbol.clone(), stock.price))
            .collect();
        SimSummary {
            rounds: self.rounds_run,
            orders_placed: self.orders_placed,
            placements_rejected: self.placements_rejected,
            settlements: self.settlements,
            settlement_failures: self.settlement_failures,
            clearings: self.clearings,
            final_prices,
            total_cash: self.market.traders().map(|t| t.cash()).sum(),
        }
    }
}

/// Run the whole simulation and summarize it.
pub fn run(config: &SimConfig) -> SimSummary {
    let mut sim = Sim::new(config);
    for round in 0..config.rounds {
        sim.step();
        debug!(round, "round complete");
    }
    let summary = sim.summary();
    info!(
        orders = summary.orders_placed,
        settlements = summary.settlements,
        clearings = summary.clearings,
        "simulation complete"
    );
    summary
}

fn stock_views(market: &Market, trader_id: TraderId) -> Vec<StockView> {
    let trader = market.trader(&trader_id).expect("bot trader registered");
    market
        .stocks()
        .map(|stock| {
            let held = trader
                .holding(&stock.symbol)
                .map(|h| h.quantity)
                .unwrap_or(Quantity::ZERO);
            StockView {
                symbol: stock.symbol.clone(),
                price: stock.price,
                held,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_lists_and_seeds() {
        let config = SimConfig::default();
        let sim = Sim::new(&config);

        assert_eq!(sim.market().traders().count(), 8);
        for trader in sim.market().traders() {
            // 20 × 45 + 20 × 100 = 2900 spent from 10000.
            assert_eq!(trader.cash(), Decimal::from(7_100));
            assert_eq!(
                trader.holding(&Symbol::new("IBM")).unwrap().quantity,
                Quantity::new(20)
            );
        }
    }

    #[test]
    fn test_single_round_counters_consistent() {
        let config = SimConfig { rounds: 1, ..SimConfig::default() };
        let mut sim = Sim::new(&config);
        sim.step();

        let summary = sim.summary();
        assert_eq!(summary.rounds, 1);
        assert!(summary.orders_placed + summary.placements_rejected <= config.bots as u64);
    }

    #[test]
    fn test_summary_prices_cover_listings() {
        let config = SimConfig { rounds: 5, ..SimConfig::default() };
        let summary = run(&config);

        assert!(summary.final_prices.contains_key(&Symbol::new("IBM")));
        assert!(summary.final_prices.contains_key(&Symbol::new("MSFT")));
    }
}
