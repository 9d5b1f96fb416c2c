use time::Date;

use crate::ValidationError;

/// One dated OHLCV record.
///
/// The optional columns are only present when the source supplies them: the
/// provider fills `volume`, `dividends` and `stock_splits`, exported files may
/// carry any subset plus `adj_close`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
    pub dividends: Option<f64>,
    pub stock_splits: Option<f64>,
}

impl PriceRow {
    pub fn new(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            adj_close: None,
            volume: None,
            dividends: None,
            stock_splits: None,
        })
    }

    pub fn with_adj_close(mut self, adj_close: f64) -> Result<Self, ValidationError> {
        validate_non_negative("adj_close", adj_close)?;
        self.adj_close = Some(adj_close);
        Ok(self)
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_dividends(mut self, dividends: f64) -> Result<Self, ValidationError> {
        validate_non_negative("dividends", dividends)?;
        self.dividends = Some(dividends);
        Ok(self)
    }

    pub fn with_stock_splits(mut self, stock_splits: f64) -> Result<Self, ValidationError> {
        validate_non_negative("stock_splits", stock_splits)?;
        self.stock_splits = Some(stock_splits);
        Ok(self)
    }
}

/// Date-ordered price history produced by one fetch or one file load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    pub rows: Vec<PriceRow>,
}

impl PriceTable {
    pub fn new(rows: Vec<PriceRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&PriceRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&PriceRow> {
        self.rows.last()
    }

    pub fn has_adj_close(&self) -> bool {
        self.rows.iter().any(|row| row.adj_close.is_some())
    }

    pub fn has_volume(&self) -> bool {
        self.rows.iter().any(|row| row.volume.is_some())
    }

    pub fn has_dividends(&self) -> bool {
        self.rows.iter().any(|row| row.dividends.is_some())
    }

    pub fn has_stock_splits(&self) -> bool {
        self.rows.iter().any(|row| row.stock_splits.is_some())
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn rejects_non_finite_prices() {
        let err = PriceRow::new(date!(2024 - 01 - 02), 1.0, f64::NAN, 1.0, 1.0)
            .expect_err("must fail");
        assert_eq!(err, ValidationError::NonFiniteValue { field: "high" });
    }

    #[test]
    fn rejects_negative_dividends() {
        let row = PriceRow::new(date!(2024 - 01 - 02), 1.0, 1.0, 1.0, 1.0).expect("row");
        let err = row.with_dividends(-0.5).expect_err("must fail");
        assert_eq!(err, ValidationError::NegativeValue { field: "dividends" });
    }

    #[test]
    fn optional_columns_are_reported_per_table() {
        let plain = PriceRow::new(date!(2024 - 01 - 02), 1.0, 1.0, 1.0, 1.0).expect("row");
        let traded = plain.clone().with_volume(100);
        let table = PriceTable::new(vec![plain, traded]);

        assert!(table.has_volume());
        assert!(!table.has_dividends());
        assert!(!table.has_adj_close());
        assert_eq!(table.len(), 2);
    }
}
