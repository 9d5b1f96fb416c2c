//! # Domain Models
//!
//! Canonical types shared by the provider adapter, the CSV loader, and the
//! renderers.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Trimmed, upper-cased ticker |
//! | [`Period`] | Historical lookback window (`1d` … `max`) |
//! | [`PriceRow`] | One dated OHLCV record plus optional adjustments |
//! | [`PriceTable`] | Date-ordered rows for one fetch or file |
//!
//! Dates are plain calendar dates ([`time::Date`]); [`parse_trading_date`]
//! accepts the representations found in exported price files.

mod date;
mod models;
mod period;
mod symbol;

pub use date::{format_trading_date, parse_trading_date};
pub use models::{PriceRow, PriceTable};
pub use period::Period;
pub use symbol::Symbol;
