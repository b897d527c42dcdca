//! The market: listed stocks, registered traders, and the order book
//!
//! `Market` is the single entry point for participants. It routes order
//! placements through trader-side validation into the book, runs matching
//! passes, and keeps every stock's reference price and the append-only
//! price history up to date as clearing prices are published.

pub mod history;
pub mod market;

pub use history::{MarketHistory, PricePoint};
pub use market::{Market, Stock};
