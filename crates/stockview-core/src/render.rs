//! Text rendering for price tables and change summaries.
//!
//! Output is plain text plus a small style vocabulary so the window (or a
//! terminal) decides how "positive" and "negative" actually look.

use thiserror::Error;

use crate::{format_trading_date, PriceTable};

/// Render a bordered, centered, fixed-width table.
///
/// The first column is the row index with an empty header. Every price is
/// printed with exactly three decimals and every date as `YYYY-MM-DD`.
/// Optional columns appear only when at least one row carries them.
pub fn render_table(table: &PriceTable) -> String {
    let mut headers = vec!["", "Date", "Open", "High", "Low", "Close"];
    let adj_close = table.has_adj_close();
    let volume = table.has_volume();
    let dividends = table.has_dividends();
    let stock_splits = table.has_stock_splits();
    if adj_close {
        headers.push("Adj Close");
    }
    if volume {
        headers.push("Volume");
    }
    if dividends {
        headers.push("Dividends");
    }
    if stock_splits {
        headers.push("Stock Splits");
    }

    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut cells = vec![
                index.to_string(),
                format_trading_date(row.date),
                price(row.open),
                price(row.high),
                price(row.low),
                price(row.close),
            ];
            if adj_close {
                cells.push(row.adj_close.map(price).unwrap_or_default());
            }
            if volume {
                cells.push(row.volume.map(|v| v.to_string()).unwrap_or_default());
            }
            if dividends {
                cells.push(row.dividends.map(price).unwrap_or_default());
            }
            if stock_splits {
                cells.push(row.stock_splits.map(price).unwrap_or_default());
            }
            cells
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = border(&widths);
    let mut lines = Vec::with_capacity(body.len() + 4);
    lines.push(rule.clone());
    lines.push(line(headers.iter().copied(), &widths));
    lines.push(rule.clone());
    if !body.is_empty() {
        lines.extend(body.iter().map(|cells| line(cells.iter().map(String::as_str), &widths)));
        lines.push(rule);
    }
    lines.join("\n")
}

fn price(value: f64) -> String {
    format!("{value:.3}")
}

fn border(widths: &[usize]) -> String {
    let mut out = String::from("+");
    for width in widths {
        out.push_str(&"-".repeat(width + 2));
        out.push('+');
    }
    out
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut out = String::from("|");
    for (cell, width) in cells.zip(widths.iter().copied()) {
        out.push_str(&format!(" {cell:^width$} |"));
    }
    out
}

/// Why a change summary could not be computed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SummaryError {
    #[error("no price rows to summarize")]
    EmptyTable,
    #[error("starting close price is zero; percentage change is undefined")]
    ZeroStartPrice,
}

/// First close, last close and the percentage move between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeSummary {
    pub start_price: f64,
    pub end_price: f64,
    pub percent_change: f64,
}

impl ChangeSummary {
    pub fn new(start_price: f64, end_price: f64) -> Result<Self, SummaryError> {
        if start_price == 0.0 {
            return Err(SummaryError::ZeroStartPrice);
        }

        Ok(Self {
            start_price,
            end_price,
            percent_change: (end_price - start_price) / start_price * 100.0,
        })
    }

    pub fn from_table(table: &PriceTable) -> Result<Self, SummaryError> {
        let (Some(first), Some(last)) = (table.first(), table.last()) else {
            return Err(SummaryError::EmptyTable);
        };
        Self::new(first.close, last.close)
    }

    pub fn is_gain(&self) -> bool {
        self.percent_change >= 0.0
    }
}

/// Visual role of a text segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStyle {
    Default,
    Positive,
    Negative,
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub style: SegmentStyle,
}

impl StyledSegment {
    pub fn new(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub fn render_change_summary(summary: &ChangeSummary) -> Vec<StyledSegment> {
    let header = format!(
        "\nStock Price Change Analysis:\nStart Price: ${:.2}\nEnd Price: ${:.2}\nPercentage Change: ",
        summary.start_price, summary.end_price
    );

    let change = if summary.is_gain() {
        StyledSegment::new(
            format!("+{:.2}%\n", summary.percent_change),
            SegmentStyle::Positive,
        )
    } else {
        StyledSegment::new(
            format!("{:.2}%\n", summary.percent_change),
            SegmentStyle::Negative,
        )
    };

    vec![StyledSegment::new(header, SegmentStyle::Default), change]
}

/// Concatenate segment text, dropping styles.
pub fn plain_text(segments: &[StyledSegment]) -> String {
    segments.iter().map(|segment| segment.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PriceRow;
    use time::macros::date;

    #[test]
    fn flat_move_counts_as_gain() {
        let summary = ChangeSummary::new(50.0, 50.0).expect("summary");
        let segments = render_change_summary(&summary);
        assert_eq!(segments[1].text, "+0.00%\n");
        assert_eq!(segments[1].style, SegmentStyle::Positive);
    }

    #[test]
    fn tiny_loss_is_negative_even_when_rounded_to_zero() {
        let summary = ChangeSummary::new(100_000.0, 99_999.0).expect("summary");
        let segments = render_change_summary(&summary);
        assert_eq!(segments[1].text, "-0.00%\n");
        assert_eq!(segments[1].style, SegmentStyle::Negative);
    }

    #[test]
    fn empty_table_has_no_summary() {
        let err = ChangeSummary::from_table(&PriceTable::default()).expect_err("must fail");
        assert_eq!(err, SummaryError::EmptyTable);
    }

    #[test]
    fn table_borders_line_up() {
        let row = PriceRow::new(date!(2024 - 01 - 02), 1.0, 2.0, 0.5, 1.25).expect("row");
        let rendered = render_table(&PriceTable::new(vec![row]));
        let widths: Vec<usize> = rendered.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{rendered}");
        assert_eq!(rendered.lines().count(), 5);
    }

    #[test]
    fn empty_table_renders_header_only() {
        let rendered = render_table(&PriceTable::default());
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.contains("Date"));
    }
}
