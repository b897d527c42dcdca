//! Position and open-order records
//!
//! Fills for the same symbol merge into one `Holding` per symbol rather
//! than accumulating one entry per fill; the holding carries the total
//! cost paid for the shares currently held.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::OrderId;
use types::numeric::Quantity;
use types::order::{OrderKind, Side};

/// Shares owned in one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub quantity: Quantity,
    /// Total cash paid for the shares currently held
    pub cost_basis: Decimal,
}

impl Holding {
    /// Create a holding from one acquisition
    pub fn new(quantity: Quantity, cost: Decimal) -> Self {
        Self {
            quantity,
            cost_basis: cost,
        }
    }

    /// Merge an acquisition into the holding
    pub fn add(&mut self, quantity: Quantity, cost: Decimal) {
        self.quantity += quantity;
        self.cost_basis += cost;
    }

    /// Consume shares, reducing the cost basis proportionally
    ///
    /// Returns the remaining quantity. Callers must have verified that
    /// enough shares are held.
    pub fn consume(&mut self, quantity: Quantity) -> Quantity {
        let remaining = self
            .quantity
            .checked_sub(quantity)
            .expect("consumption exceeds held quantity");
        if remaining.is_zero() {
            self.cost_basis = Decimal::ZERO;
        } else {
            let sold = Decimal::from(quantity.as_u64());
            let held = Decimal::from(self.quantity.as_u64());
            self.cost_basis -= self.cost_basis * sold / held;
        }
        self.quantity = remaining;
        remaining
    }

    /// Average cost per share, zero for an empty holding
    pub fn average_cost(&self) -> Decimal {
        if self.quantity.is_zero() {
            Decimal::ZERO
        } else {
            self.cost_basis / Decimal::from(self.quantity.as_u64())
        }
    }
}

/// An outstanding placed order awaiting settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub order_id: OrderId,
    pub side: Side,
    pub quantity: Quantity,
    pub kind: OrderKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holding_add_merges() {
        let mut holding = Holding::new(Quantity::new(10), Decimal::from(400));
        holding.add(Quantity::new(5), Decimal::from(250));

        assert_eq!(holding.quantity, Quantity::new(15));
        assert_eq!(holding.cost_basis, Decimal::from(650));
    }

    #[test]
    fn test_consume_partial_reduces_basis_proportionally() {
        let mut holding = Holding::new(Quantity::new(10), Decimal::from(400));
        let remaining = holding.consume(Quantity::new(4));

        assert_eq!(remaining, Quantity::new(6));
        assert_eq!(holding.cost_basis, Decimal::from(240));
        assert_eq!(holding.average_cost(), Decimal::from(40));
    }

    #[test]
    fn test_consume_all_zeroes_basis() {
        let mut holding = Holding::new(Quantity::new(10), Decimal::from(400));
        let remaining = holding.consume(Quantity::new(10));

        assert_eq!(remaining, Quantity::ZERO);
        assert_eq!(holding.cost_basis, Decimal::ZERO);
        assert_eq!(holding.average_cost(), Decimal::ZERO);
    }

    #[test]
    #[should_panic(expected = "consumption exceeds held quantity")]
    fn test_consume_too_much_panics() {
        let mut holding = Holding::new(Quantity::new(3), Decimal::from(90));
        holding.consume(Quantity::new(5));
    }
}
