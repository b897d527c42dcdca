//! Property tests for clearing-price selection
//!
//! The scan over cumulative curves must agree with a brute-force
//! maximizer of min(demandAt(p), supplyAt(p)) over the union of limit
//! price levels, including the ascending-first tie-break.

use auction_engine::auction::{aggregate, find_clearing, DemandCurve, SupplyCurve};
use proptest::prelude::*;
use types::ids::{Symbol, TraderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// (price, quantity) pairs; price None means a market order.
type SideSpec = Vec<(Option<u16>, u16)>;

fn orders_from(side: Side, spec: &SideSpec) -> Vec<Order> {
    spec.iter()
        .filter(|&&(_, quantity)| quantity > 0)
        .map(|&(price, quantity)| match price {
            Some(p) => Order::new_limit(
                TraderId::new(),
                Symbol::new("IBM"),
                side,
                Quantity::new(quantity as u64),
                Price::from_u64(p as u64),
                0,
            ),
            None => Order::new_market(
                TraderId::new(),
                Symbol::new("IBM"),
                side,
                Quantity::new(quantity as u64),
                0,
            ),
        })
        .collect()
}

/// Direct evaluation against the raw order lists, no curve machinery.
fn brute_force(buys: &[Order], sells: &[Order]) -> Option<(Price, u64)> {
    let mut levels: Vec<Price> = buys
        .iter()
        .chain(sells)
        .filter_map(|o| o.limit_price())
        .collect();
    levels.sort();
    levels.dedup();

    let mut best: Option<(Price, u64)> = None;
    for p in levels {
        let demand: u64 = buys
            .iter()
            .filter(|o| o.is_market() || o.limit_price().unwrap() >= p)
            .map(|o| o.quantity.as_u64())
            .sum();
        let supply: u64 = sells
            .iter()
            .filter(|o| o.is_market() || o.limit_price().unwrap() <= p)
            .map(|o| o.quantity.as_u64())
            .sum();
        let tradable = demand.min(supply);
        if tradable > best.map_or(0, |(_, q)| q) {
            best = Some((p, tradable));
        }
    }
    best
}

fn side_spec() -> impl Strategy<Value = SideSpec> {
    prop::collection::vec(
        (prop::option::weighted(0.85, 1u16..200), 0u16..50),
        0..12,
    )
}

proptest! {
    #[test]
    fn clearing_matches_brute_force(buy_spec in side_spec(), sell_spec in side_spec()) {
        let buys = orders_from(Side::BUY, &buy_spec);
        let sells = orders_from(Side::SELL, &sell_spec);

        let demand = DemandCurve::build(&aggregate(&buys));
        let supply = SupplyCurve::build(&aggregate(&sells));
        let clearing = find_clearing(&demand, &supply);

        let expected = brute_force(&buys, &sells);
        match (clearing, expected) {
            (None, None) => {}
            (Some(c), Some((price, tradable))) => {
                prop_assert_eq!(c.price, price);
                prop_assert_eq!(c.tradable.as_u64(), tradable);
            }
            (got, want) => prop_assert!(false, "scan {:?} != brute force {:?}", got, want),
        }
    }

    #[test]
    fn clearing_volume_is_positive(buy_spec in side_spec(), sell_spec in side_spec()) {
        let buys = orders_from(Side::BUY, &buy_spec);
        let sells = orders_from(Side::SELL, &sell_spec);

        let demand = DemandCurve::build(&aggregate(&buys));
        let supply = SupplyCurve::build(&aggregate(&sells));

        if let Some(clearing) = find_clearing(&demand, &supply) {
            prop_assert!(!clearing.tradable.is_zero());
        }
    }
}
