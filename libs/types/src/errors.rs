//! Error taxonomy for the exchange
//!
//! One taxonomy covers every failure mode, each variant carrying the
//! amounts or identifiers a human needs to understand the rejection.

use crate::ids::{Symbol, TraderId};
use crate::numeric::Quantity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exchange-wide error type
///
/// Placement and settlement validation surface these to the direct caller.
/// Only the auction pass catches them, recording the failure in its report
/// and leaving the offending order resting.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarketError {
    #[error("insufficient funds for {symbol}: required {required}, available {available}")]
    InsufficientFunds {
        symbol: Symbol,
        required: Decimal,
        available: Decimal,
    },

    #[error("duplicate outstanding order for {symbol}")]
    DuplicateOrder { symbol: Symbol },

    #[error("no position held in {symbol}")]
    PositionNotHeld { symbol: Symbol },

    #[error("insufficient shares of {symbol}: held {held}, requested {requested}")]
    InsufficientShares {
        symbol: Symbol,
        held: Quantity,
        requested: Quantity,
    },

    #[error("unknown symbol: {0}")]
    UnknownSymbol(Symbol),

    #[error("unknown trader: {0}")]
    UnknownTrader(TraderId),

    #[error("symbol already listed: {0}")]
    AlreadyListed(Symbol),
}
