//! # Stockview Core
//!
//! Price history retrieval, CSV ingestion, and text rendering behind the
//! stockview desktop window.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance chart API) |
//! | [`csv_loader`] | Price files on disk |
//! | [`data_source`] | [`PriceSource`] trait, requests and errors |
//! | [`domain`] | Symbol, period, price rows and tables |
//! | [`error`] | Validation errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`render`] | Table and change-summary rendering |
//!
//! ## Flow
//!
//! ```text
//! ticker + period label
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Symbol / Period │────▶│ PriceSource      │──▶ HTTP client
//! └─────────────────┘     └────────┬─────────┘
//!                                  │ PriceTable
//!  CsvLoader ──────────────────────┤
//!                                  ▼
//!                         ┌──────────────────┐
//!                         │ render           │──▶ text / styled segments
//!                         └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use stockview_core::{SourceError, SourceErrorKind};
//!
//! fn dialog_title(error: &SourceError) -> &'static str {
//!     match error.kind() {
//!         SourceErrorKind::NotFound => "No Data",
//!         SourceErrorKind::InvalidRequest => "Invalid Input",
//!         SourceErrorKind::Unavailable | SourceErrorKind::Internal => "Provider Error",
//!     }
//! }
//! ```

pub mod adapters;
pub mod csv_loader;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod render;

pub use adapters::YahooAdapter;

pub use csv_loader::{CsvLoader, LoadError};

pub use data_source::{HistoryRequest, PriceSource, SourceError, SourceErrorKind};

pub use domain::{format_trading_date, parse_trading_date, Period, PriceRow, PriceTable, Symbol};

pub use error::ValidationError;

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use render::{
    plain_text, render_change_summary, render_table, ChangeSummary, SegmentStyle, StyledSegment,
    SummaryError,
};
