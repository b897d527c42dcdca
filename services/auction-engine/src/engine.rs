//! The matching pass
//!
//! One `trade()` call runs a uniform-price call auction over every symbol
//! resting on both sides of the book. Per symbol: build the cumulative
//! curves, pick the clearing price, publish it, then offer every crossing
//! order to its owning trader at that price. Orders whose trader rejects
//! the fill stay resting for the next pass.

use tracing::{debug, warn};

use crate::auction::{aggregate, find_clearing, DemandCurve, SupplyCurve};
use crate::book::OrderBook;
use crate::events::{
    ClearingEvent, PassReport, PricePublisher, Settlement, SettlementFailure, SettlementHandler,
};
use types::ids::OrderId;
use types::order::Side;

impl OrderBook {
    /// Run one matching pass over the whole book
    ///
    /// Symbols resting on only one side are skipped with their orders
    /// untouched, as are symbols where no limit level yields positive
    /// tradable volume. Each settled order executes its entire resting
    /// size at the clearing price.
    pub fn trade(
        &mut self,
        publisher: &mut dyn PricePublisher,
        settlement: &mut dyn SettlementHandler,
    ) -> PassReport {
        let mut report = PassReport::default();

        for symbol in self.crossed_symbols() {
            let demand = DemandCurve::build(&aggregate(self.resting(&symbol, Side::BUY)));
            let supply = SupplyCurve::build(&aggregate(self.resting(&symbol, Side::SELL)));

            let Some(clearing) = find_clearing(&demand, &supply) else {
                debug!(%symbol, "no clearing price, orders retained");
                continue;
            };
            debug!(%symbol, price = %clearing.price, tradable = %clearing.tradable, "clearing price found");

            // Listeners must see the new price before any fill lands.
            publisher.publish(&symbol, clearing.price);
            report.clearings.push(ClearingEvent {
                symbol: symbol.clone(),
                price: clearing.price,
                tradable: clearing.tradable,
            });

            for side in [Side::BUY, Side::SELL] {
                let crossing: Vec<OrderId> = self
                    .resting(&symbol, side)
                    .filter(|order| order.crosses(clearing.price))
                    .map(|order| order.order_id)
                    .collect();

                for order_id in crossing {
                    let order = self
                        .order(&order_id)
                        .expect("crossing order still in arena");
                    match settlement.trade_performed(order, clearing.price) {
                        Ok(()) => {
                            let settled = self.remove(&order_id).expect("settled order in arena");
                            report.settlements.push(Settlement {
                                order_id,
                                trader_id: settled.trader_id,
                                symbol: settled.symbol,
                                side: settled.side,
                                quantity: settled.quantity,
                                price: clearing.price,
                            });
                        }
                        Err(error) => {
                            warn!(%symbol, %order_id, %error, "settlement rejected, order left resting");
                            report.failures.push(SettlementFailure {
                                order_id,
                                trader_id: order.trader_id,
                                symbol: symbol.clone(),
                                side,
                                error,
                            });
                        }
                    }
                }
            }
        }

        report
    }
}
