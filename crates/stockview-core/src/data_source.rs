//! Price source trait and request/error types.
//!
//! A [`PriceSource`] answers one question: the daily price history of a
//! symbol over a [`Period`]. Failures are classified by [`SourceErrorKind`] so
//! the window can tell "no such ticker" apart from "provider unreachable".
//!
//! ```rust,ignore
//! use stockview_core::{HistoryRequest, Period, PriceSource, Symbol, YahooAdapter};
//!
//! async fn closes(adapter: &YahooAdapter) -> Result<(), stockview_core::SourceError> {
//!     let request = HistoryRequest::new(Symbol::parse("aapl")?, Period::FiveDays);
//!     let table = adapter.history(request).await?;
//!     for row in &table.rows {
//!         println!("{}: {:.2}", row.date, row.close);
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{Period, PriceTable, Symbol, ValidationError};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    InvalidRequest,
    NotFound,
    Unavailable,
    Internal,
}

/// Structured source error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn not_found(symbol: &Symbol) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: format!("No data found for ticker '{symbol}'."),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Request payload for the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub period: Period,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, period: Period) -> Self {
        Self { symbol, period }
    }
}

/// Source adapter contract.
///
/// Implementations must be `Send + Sync`; the window hands them to background
/// tasks behind an `Arc`.
pub trait PriceSource: Send + Sync {
    /// Short provider name used in logs.
    fn id(&self) -> &'static str;

    /// Fetches daily price history.
    ///
    /// # Errors
    ///
    /// - [`SourceErrorKind::NotFound`] when the provider knows nothing about
    ///   the symbol or returns zero rows
    /// - [`SourceErrorKind::Unavailable`] on transport failures and non-2xx
    ///   statuses
    /// - [`SourceErrorKind::Internal`] when the payload cannot be decoded
    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceTable, SourceError>> + Send + 'a>>;
}
