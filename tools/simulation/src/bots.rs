//! Retail random trader bot
//!
//! Generates random orders with a deterministic seeded RNG. Produces a
//! mix of market and limit orders to simulate retail flow; limit prices
//! land within a configured band around the current reference price.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::{Symbol, TraderId};
use types::numeric::{Price, Quantity};
use types::order::Side;

/// Configuration for the retail random trader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Minimum order size in shares
    pub min_size: u64,
    /// Maximum order size in shares
    pub max_size: u64,
    /// Probability of a market order (0.0 to 1.0)
    pub market_order_ratio: f64,
    /// Maximum distance of a limit price from the reference price (in bps)
    pub max_limit_distance_bps: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            min_size: 1,
            max_size: 10,
            market_order_ratio: 0.2,
            max_limit_distance_bps: 500,
        }
    }
}

/// What a bot sees of one listed stock when deciding.
#[derive(Debug, Clone)]
pub struct StockView {
    pub symbol: Symbol,
    pub price: Price,
    /// Shares the bot currently holds in this stock
    pub held: Quantity,
}

/// Generated order parameters from the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct BotOrder {
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: Quantity,
    /// None means a market order
    pub limit: Option<Price>,
}

/// Retail random trader with deterministic seeded RNG.
pub struct RetailBot {
    pub trader_id: TraderId,
    pub config: BotConfig,
    rng: ChaCha8Rng,
}

impl RetailBot {
    /// Create a new bot with a deterministic seed.
    pub fn new(trader_id: TraderId, config: BotConfig, seed: u64) -> Self {
        Self {
            trader_id,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a stock and generate a random order against it.
    ///
    /// Sells are bounded by the bot's current holding; a sell decision
    /// with nothing held yields no order. The RNG is drawn a fixed number
    /// of times per call so the stream stays aligned across decisions.
    pub fn decide(&mut self, stocks: &[StockView]) -> Option<BotOrder> {
        if stocks.is_empty() {
            return None;
        }
        let stock = &stocks[self.rng.gen_range(0..stocks.len())];
        let side = if self.rng.gen_bool(0.5) { Side::BUY } else { Side::SELL };
        let size: u64 = self.rng.gen_range(self.config.min_size..=self.config.max_size);
        let is_market = self.rng.gen_bool(self.config.market_order_ratio);
        let band = self.config.max_limit_distance_bps as i64;
        let offset_bps: i64 = self.rng.gen_range(-band..=band);

        let size = match side {
            Side::BUY => size,
            Side::SELL => size.min(stock.held.as_u64()),
        };
        if size == 0 {
            return None;
        }

        let limit = if is_market {
            None
        } else {
            let reference = stock.price.as_decimal();
            let shifted = reference + reference * Decimal::from(offset_bps) / Decimal::from(10_000);
            let rounded = shifted.round_dp(2);
            if rounded > Decimal::ZERO {
                Some(Price::new(rounded))
            } else {
                Some(Price::new(Decimal::ONE))
            }
        };

        Some(BotOrder {
            symbol: stock.symbol.clone(),
            side,
            quantity: Quantity::new(size),
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(price: u64, held: u64) -> Vec<StockView> {
        vec![StockView {
            symbol: Symbol::new("IBM"),
            price: Price::from_u64(price),
            held: Quantity::new(held),
        }]
    }

    #[test]
    fn test_deterministic_output() {
        let stocks = view(50, 100);
        let mut b1 = RetailBot::new(TraderId::new(), BotConfig::default(), 42);
        let mut b2 = RetailBot::new(TraderId::new(), BotConfig::default(), 42);

        for _ in 0..20 {
            assert_eq!(b1.decide(&stocks), b2.decide(&stocks));
        }
    }

    #[test]
    fn test_order_validity() {
        let stocks = view(50, 100);
        let mut bot = RetailBot::new(TraderId::new(), BotConfig::default(), 123);

        for _ in 0..100 {
            if let Some(order) = bot.decide(&stocks) {
                assert!(!order.quantity.is_zero());
                assert!(order.quantity.as_u64() <= 10);
                if let Some(price) = order.limit {
                    assert!(!price.is_zero());
                }
            }
        }
    }

    #[test]
    fn test_sells_bounded_by_holding() {
        let stocks = view(50, 3);
        let mut bot = RetailBot::new(TraderId::new(), BotConfig::default(), 7);

        for _ in 0..100 {
            if let Some(order) = bot.decide(&stocks) {
                if order.side == Side::SELL {
                    assert!(order.quantity.as_u64() <= 3);
                }
            }
        }
    }

    #[test]
    fn test_no_sell_without_holding() {
        let stocks = view(50, 0);
        let mut bot = RetailBot::new(TraderId::new(), BotConfig::default(), 7);

        for _ in 0..100 {
            if let Some(order) = bot.decide(&stocks) {
                assert_eq!(order.side, Side::BUY);
            }
        }
    }

    #[test]
    fn test_different_seeds_different_output() {
        let stocks = view(50, 100);
        let mut b1 = RetailBot::new(TraderId::new(), BotConfig::default(), 1);
        let mut b2 = RetailBot::new(TraderId::new(), BotConfig::default(), 2);

        let mut same_count = 0;
        for _ in 0..10 {
            if b1.decide(&stocks) == b2.decide(&stocks) {
                same_count += 1;
            }
        }
        assert!(same_count < 10);
    }

    #[test]
    fn test_no_stocks_no_order() {
        let mut bot = RetailBot::new(TraderId::new(), BotConfig::default(), 42);
        assert!(bot.decide(&[]).is_none());
    }
}
