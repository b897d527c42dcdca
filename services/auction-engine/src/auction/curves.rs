//! Cumulative supply and demand curves
//!
//! Each side of a symbol is first aggregated into per-limit-price totals
//! plus a bucket of market-order volume. Market volume has no price of its
//! own; it is folded in as the base of the cumulative totals, so it is
//! always "inside" the book at any candidate price.

use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};
use types::order::Order;

/// Per-price totals for one side of one symbol
#[derive(Debug, Clone, Default)]
pub struct AggregatedSide {
    /// Total resting quantity per limit price
    pub limit: BTreeMap<Price, Quantity>,
    /// Total resting market-order quantity
    pub market: Quantity,
}

/// Aggregate one side's resting orders by limit price
pub fn aggregate<'a>(orders: impl IntoIterator<Item = &'a Order>) -> AggregatedSide {
    let mut agg = AggregatedSide::default();
    for order in orders {
        match order.limit_price() {
            Some(price) => *agg.limit.entry(price).or_insert(Quantity::ZERO) += order.quantity,
            None => agg.market += order.quantity,
        }
    }
    agg
}

/// Cumulative buy-side volume
///
/// `volume_at(p)` is the total quantity buyers are willing to take at
/// price p: the market bucket plus every limit bid priced at or above p.
#[derive(Debug, Clone)]
pub struct DemandCurve {
    /// (limit price, cumulative volume at or above that price), ascending
    levels: Vec<(Price, Quantity)>,
    /// Market-order volume, the base of every cumulative total
    base: Quantity,
}

impl DemandCurve {
    /// Build the curve from aggregated buy orders
    pub fn build(agg: &AggregatedSide) -> Self {
        // Suffix sums: walk prices descending, accumulate onto the base.
        let mut levels: Vec<(Price, Quantity)> = Vec::with_capacity(agg.limit.len());
        let mut running = agg.market;
        for (&price, &quantity) in agg.limit.iter().rev() {
            running += quantity;
            levels.push((price, running));
        }
        levels.reverse();
        Self {
            levels,
            base: agg.market,
        }
    }

    /// Buy volume willing to trade at `price` or higher
    pub fn volume_at(&self, price: Price) -> Quantity {
        let idx = self.levels.partition_point(|(level, _)| *level < price);
        match self.levels.get(idx) {
            Some(&(_, cumulative)) => cumulative,
            None => self.base,
        }
    }

    /// The limit price levels present on this side, ascending
    pub fn limit_levels(&self) -> impl Iterator<Item = Price> + '_ {
        self.levels.iter().map(|(price, _)| *price)
    }
}

/// Cumulative sell-side volume
///
/// `volume_at(p)` is the total quantity sellers are willing to give at
/// price p: the market bucket plus every limit ask priced at or below p.
#[derive(Debug, Clone)]
pub struct SupplyCurve {
    /// (limit price, cumulative volume at or below that price), ascending
    levels: Vec<(Price, Quantity)>,
    base: Quantity,
}

impl SupplyCurve {
    /// Build the curve from aggregated sell orders
    pub fn build(agg: &AggregatedSide) -> Self {
        // Prefix sums: walk prices ascending, accumulate onto the base.
        let mut levels: Vec<(Price, Quantity)> = Vec::with_capacity(agg.limit.len());
        let mut running = agg.market;
        for (&price, &quantity) in agg.limit.iter() {
            running += quantity;
            levels.push((price, running));
        }
        Self {
            levels,
            base: agg.market,
        }
    }

    /// Sell volume willing to trade at `price` or lower
    pub fn volume_at(&self, price: Price) -> Quantity {
        let idx = self.levels.partition_point(|(level, _)| *level <= price);
        if idx == 0 {
            self.base
        } else {
            self.levels[idx - 1].1
        }
    }

    /// The limit price levels present on this side, ascending
    pub fn limit_levels(&self) -> impl Iterator<Item = Price> + '_ {
        self.levels.iter().map(|(price, _)| *price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::{Symbol, TraderId};
    use types::order::Side;

    fn limit(side: Side, price: u64, quantity: u64) -> Order {
        Order::new_limit(
            TraderId::new(),
            Symbol::new("IBM"),
            side,
            Quantity::new(quantity),
            Price::from_u64(price),
            0,
        )
    }

    fn market(side: Side, quantity: u64) -> Order {
        Order::new_market(
            TraderId::new(),
            Symbol::new("IBM"),
            side,
            Quantity::new(quantity),
            0,
        )
    }

    #[test]
    fn test_aggregate_merges_price_levels() {
        let orders = vec![
            limit(Side::BUY, 50, 10),
            limit(Side::BUY, 50, 5),
            limit(Side::BUY, 45, 3),
            market(Side::BUY, 7),
        ];
        let agg = aggregate(&orders);

        assert_eq!(agg.limit[&Price::from_u64(50)], Quantity::new(15));
        assert_eq!(agg.limit[&Price::from_u64(45)], Quantity::new(3));
        assert_eq!(agg.market, Quantity::new(7));
    }

    #[test]
    fn test_demand_cumulative_at_or_above() {
        // Bids: 10 @ 50, 3 @ 45, market 7.
        let orders = vec![
            limit(Side::BUY, 50, 10),
            limit(Side::BUY, 45, 3),
            market(Side::BUY, 7),
        ];
        let demand = DemandCurve::build(&aggregate(&orders));

        assert_eq!(demand.volume_at(Price::from_u64(50)), Quantity::new(17));
        assert_eq!(demand.volume_at(Price::from_u64(45)), Quantity::new(20));
        // Between levels: only the 50 bid and market volume stay in.
        assert_eq!(demand.volume_at(Price::from_u64(47)), Quantity::new(17));
        // Above every bid: market volume only.
        assert_eq!(demand.volume_at(Price::from_u64(60)), Quantity::new(7));
        // At or below every bid: everything.
        assert_eq!(demand.volume_at(Price::from_u64(1)), Quantity::new(20));
    }

    #[test]
    fn test_supply_cumulative_at_or_below() {
        // Asks: 4 @ 40, 6 @ 44, market 2.
        let orders = vec![
            limit(Side::SELL, 40, 4),
            limit(Side::SELL, 44, 6),
            market(Side::SELL, 2),
        ];
        let supply = SupplyCurve::build(&aggregate(&orders));

        assert_eq!(supply.volume_at(Price::from_u64(40)), Quantity::new(6));
        assert_eq!(supply.volume_at(Price::from_u64(44)), Quantity::new(12));
        assert_eq!(supply.volume_at(Price::from_u64(42)), Quantity::new(6));
        // Below every ask: market volume only.
        assert_eq!(supply.volume_at(Price::from_u64(39)), Quantity::new(2));
        assert_eq!(supply.volume_at(Price::from_u64(100)), Quantity::new(12));
    }

    #[test]
    fn test_market_only_side_has_no_limit_levels() {
        let orders = vec![market(Side::BUY, 5)];
        let demand = DemandCurve::build(&aggregate(&orders));

        assert_eq!(demand.limit_levels().count(), 0);
        assert_eq!(demand.volume_at(Price::from_u64(10)), Quantity::new(5));
    }

    #[test]
    fn test_limit_levels_ascending() {
        let orders = vec![
            limit(Side::SELL, 44, 1),
            limit(Side::SELL, 40, 1),
            limit(Side::SELL, 42, 1),
        ];
        let supply = SupplyCurve::build(&aggregate(&orders));
        let levels: Vec<Price> = supply.limit_levels().collect();
        assert_eq!(
            levels,
            vec![Price::from_u64(40), Price::from_u64(42), Price::from_u64(44)]
        );
    }
}
