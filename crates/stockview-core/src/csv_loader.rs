//! CSV price file loader.
//!
//! Reads an exported price history (Yahoo download, broker export, a table
//! previously saved from this tool) into a [`PriceTable`]. The whole file must
//! parse; the first bad cell aborts the load.

use std::path::Path;

use thiserror::Error;

use crate::{parse_trading_date, PriceRow, PriceTable, ValidationError};

/// Failure reading or parsing a price file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("row {row}: column '{column}' has invalid number '{value}'")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    adj_close: Option<usize>,
    volume: Option<usize>,
    dividends: Option<usize>,
    stock_splits: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let names: Vec<String> = headers
            .iter()
            .map(|name| name.trim().to_ascii_lowercase())
            .collect();
        let find = |wanted: &str| names.iter().position(|name| name == wanted);
        let require = |column: &'static str| {
            find(&column.to_ascii_lowercase()).ok_or(LoadError::MissingColumn { column })
        };

        Ok(Self {
            date: require("Date")?,
            open: require("Open")?,
            high: require("High")?,
            low: require("Low")?,
            close: require("Close")?,
            adj_close: find("adj close"),
            volume: find("volume"),
            dividends: find("dividends"),
            stock_splits: find("stock splits"),
        })
    }
}

/// CSV loader for price history files.
pub struct CsvLoader;

impl CsvLoader {
    /// Load a price table from `path`.
    ///
    /// Headers are matched case-insensitively. `Date`, `Open`, `High`, `Low`
    /// and `Close` are required; `Adj Close`, `Volume`, `Dividends` and
    /// `Stock Splits` are picked up when present. Other columns are ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<PriceTable, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        let table = Self::from_reader(reader)?;
        tracing::debug!(path = %path.display(), rows = table.len(), "loaded price file");
        Ok(table)
    }

    fn from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<PriceTable, LoadError> {
        let columns = ColumnMap::from_headers(reader.headers()?)?;

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            rows.push(parse_row(&record, columns, idx + 1)?);
        }

        Ok(PriceTable::new(rows))
    }
}

fn parse_row(
    record: &csv::StringRecord,
    columns: ColumnMap,
    row: usize,
) -> Result<PriceRow, LoadError> {
    let invalid = |source: ValidationError| LoadError::InvalidRow { row, source };

    let date = parse_trading_date(record.get(columns.date).unwrap_or_default()).map_err(invalid)?;
    let price = |index: usize, column: &'static str| {
        required_number(record, index, column, row)
    };

    let mut parsed = PriceRow::new(
        date,
        price(columns.open, "Open")?,
        price(columns.high, "High")?,
        price(columns.low, "Low")?,
        price(columns.close, "Close")?,
    )
    .map_err(invalid)?;

    if let Some(value) = optional_number(record, columns.adj_close, "Adj Close", row)? {
        parsed = parsed.with_adj_close(value).map_err(invalid)?;
    }
    if let Some(value) = optional_number(record, columns.volume, "Volume", row)? {
        if value < 0.0 || value.fract() != 0.0 {
            return Err(LoadError::InvalidNumber {
                row,
                column: "Volume",
                value: cell(record, columns.volume).to_owned(),
            });
        }
        parsed = parsed.with_volume(value as u64);
    }
    if let Some(value) = optional_number(record, columns.dividends, "Dividends", row)? {
        parsed = parsed.with_dividends(value).map_err(invalid)?;
    }
    if let Some(value) = optional_number(record, columns.stock_splits, "Stock Splits", row)? {
        parsed = parsed.with_stock_splits(value).map_err(invalid)?;
    }

    Ok(parsed)
}

fn cell(record: &csv::StringRecord, index: Option<usize>) -> &str {
    index.and_then(|index| record.get(index)).unwrap_or_default()
}

fn required_number(
    record: &csv::StringRecord,
    index: usize,
    column: &'static str,
    row: usize,
) -> Result<f64, LoadError> {
    let value = record.get(index).unwrap_or_default();
    value.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        row,
        column,
        value: value.to_owned(),
    })
}

fn optional_number(
    record: &csv::StringRecord,
    index: Option<usize>,
    column: &'static str,
    row: usize,
) -> Result<Option<f64>, LoadError> {
    let value = cell(record, index);
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| LoadError::InvalidNumber {
            row,
            column,
            value: value.to_owned(),
        })
}
