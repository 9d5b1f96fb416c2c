use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::data_source::{HistoryRequest, PriceSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{PriceRow, PriceTable, Symbol};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance chart adapter.
///
/// One GET per call, no retries. Daily bars with dividend and split events,
/// prices auto-adjusted with the adjusted close when Yahoo supplies it.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::default()))
    }
}

impl YahooAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn chart_endpoint(&self, req: &HistoryRequest) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d&events=div%2Csplits&includeAdjustedClose=true",
            self.base_url,
            urlencoding::encode(req.symbol.as_str()),
            req.period.code(),
        )
    }

    async fn fetch_history(&self, req: &HistoryRequest) -> Result<PriceTable, SourceError> {
        let endpoint = self.chart_endpoint(req);
        tracing::debug!(provider = self.id(), %endpoint, "requesting price history");

        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            if e.timed_out() {
                SourceError::unavailable(format!(
                    "yahoo did not answer within {} ms",
                    self.timeout_ms
                ))
            } else {
                SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
            }
        })?;

        parse_chart_response(&req.symbol, response.status, &response.body)
    }
}

impl PriceSource for YahooAdapter {
    fn id(&self) -> &'static str {
        "yahoo"
    }

    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceTable, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let table = self.fetch_history(&req).await?;
            tracing::debug!(
                provider = self.id(),
                symbol = %req.symbol,
                period = %req.period,
                rows = table.len(),
                "price history received"
            );
            Ok(table)
        })
    }
}

/// Decode a chart payload into a table.
///
/// Zero usable rows, a 404, or a provider-level "Not Found" error all map to
/// [`SourceError::not_found`].
fn parse_chart_response(
    symbol: &Symbol,
    status: u16,
    body: &str,
) -> Result<PriceTable, SourceError> {
    let parsed = serde_json::from_str::<YahooChartResponse>(body);

    if status == 404 {
        return Err(SourceError::not_found(symbol));
    }

    if !(200..300).contains(&status) {
        let detail = parsed
            .ok()
            .and_then(|chart| chart.chart.error)
            .and_then(|error| error.description)
            .map(|description| format!(": {description}"))
            .unwrap_or_default();
        return Err(SourceError::unavailable(format!(
            "yahoo returned status {status}{detail}"
        )));
    }

    let chart = parsed
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?
        .chart;

    if let Some(error) = chart.error {
        if error.code.eq_ignore_ascii_case("not found") {
            return Err(SourceError::not_found(symbol));
        }
        return Err(SourceError::unavailable(format!(
            "yahoo chart API error: {}",
            error.description.unwrap_or(error.code)
        )));
    }

    let result = chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| SourceError::not_found(symbol))?;

    let rows = build_rows(result)?;
    if rows.is_empty() {
        return Err(SourceError::not_found(symbol));
    }

    Ok(PriceTable::new(rows))
}

fn build_rows(result: YahooChartResult) -> Result<Vec<PriceRow>, SourceError> {
    let offset = result.meta.and_then(|meta| meta.gmtoffset).unwrap_or(0);
    let timestamps = result.timestamp.unwrap_or_default();
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(Vec::new());
    };
    let adjclose = result
        .indicators
        .adjclose
        .and_then(|series| series.into_iter().next())
        .map(|series| series.adjclose)
        .unwrap_or_default();

    let mut dividends: BTreeMap<Date, f64> = BTreeMap::new();
    let mut splits: BTreeMap<Date, f64> = BTreeMap::new();
    if let Some(events) = result.events {
        for dividend in events.dividends.into_values() {
            *dividends
                .entry(exchange_date(dividend.date, offset)?)
                .or_insert(0.0) += dividend.amount;
        }
        for split in events.splits.into_values() {
            if split.denominator > 0.0 {
                splits.insert(
                    exchange_date(split.date, offset)?,
                    split.numerator / split.denominator,
                );
            }
        }
    }

    let mut rows = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(i),
            quote.high.get(i),
            quote.low.get(i),
            quote.close.get(i),
        ) else {
            continue;
        };

        let date = exchange_date(ts, offset)?;
        let (open, high, low, close) = match adjclose.get(i).copied().flatten() {
            Some(adj) if *close > 0.0 => {
                let ratio = adj / close;
                (open * ratio, high * ratio, low * ratio, adj)
            }
            _ => (*open, *high, *low, *close),
        };
        let volume = quote
            .volume
            .get(i)
            .copied()
            .flatten()
            .map(|v| v.max(0.0) as u64)
            .unwrap_or(0);

        let row = PriceRow::new(date, open, high, low, close).and_then(|row| {
            row.with_volume(volume)
                .with_dividends(dividends.get(&date).copied().unwrap_or(0.0))?
                .with_stock_splits(splits.get(&date).copied().unwrap_or(0.0))
        });

        match row {
            Ok(row) => rows.push(row),
            Err(error) => tracing::warn!(%date, %error, "skipping malformed yahoo bar"),
        }
    }

    Ok(rows)
}

/// Calendar date of a bar in exchange time.
fn exchange_date(ts: i64, gmtoffset: i64) -> Result<Date, SourceError> {
    OffsetDateTime::from_unix_timestamp(ts.saturating_add(gmtoffset))
        .map(OffsetDateTime::date)
        .map_err(|e| SourceError::internal(format!("invalid timestamp {ts}: {e}")))
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    events: Option<YahooChartEvents>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct YahooChartEvents {
    #[serde(default)]
    dividends: BTreeMap<String, YahooDividend>,
    #[serde(default)]
    splits: BTreeMap<String, YahooSplit>,
}

#[derive(Debug, Deserialize)]
struct YahooDividend {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct YahooSplit {
    date: i64,
    numerator: f64,
    denominator: f64,
}

#[derive(Debug, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
    #[serde(default)]
    adjclose: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::Period;
    use time::macros::date;

    fn symbol() -> Symbol {
        Symbol::parse("AAPL").expect("valid symbol")
    }

    #[test]
    fn endpoint_carries_range_and_events() {
        let adapter = YahooAdapter::default().with_base_url("http://localhost:9/");
        let req = HistoryRequest::new(Symbol::parse("^gspc").expect("valid"), Period::SixMonths);

        assert_eq!(
            adapter.chart_endpoint(&req),
            "http://localhost:9/v8/finance/chart/%5EGSPC?range=6mo&interval=1d&events=div%2Csplits&includeAdjustedClose=true"
        );
    }

    #[test]
    fn endpoint_percent_encodes_reserved_characters() {
        let adapter = YahooAdapter::default().with_base_url("http://localhost:9");
        let nse = HistoryRequest::new(Symbol::parse("m&m.ns").expect("valid"), Period::OneMonth);
        let option = HistoryRequest::new(
            Symbol::parse("AAPL240119C00150000").expect("valid"),
            Period::FiveDays,
        );

        assert!(adapter
            .chart_endpoint(&nse)
            .starts_with("http://localhost:9/v8/finance/chart/M%26M.NS?range=1mo&"));
        assert!(adapter
            .chart_endpoint(&option)
            .starts_with("http://localhost:9/v8/finance/chart/AAPL240119C00150000?range=5d&"));
    }

    #[test]
    fn shifts_timestamps_into_exchange_time() {
        // 2024-03-05 00:00 JST is still 2024-03-04 in UTC.
        let body = r#"{"chart":{"result":[{
            "meta":{"gmtoffset":32400},
            "timestamp":[1709564400],
            "indicators":{"quote":[{"open":[10.0],"high":[11.0],"low":[9.0],"close":[10.5],"volume":[5]}]}
        }],"error":null}}"#;

        let table = parse_chart_response(&symbol(), 200, body).expect("must parse");
        assert_eq!(table.rows[0].date, date!(2024 - 03 - 05));
    }

    #[test]
    fn rows_with_missing_prices_are_dropped() {
        let body = r#"{"chart":{"result":[{
            "timestamp":[1704205800,1704292200],
            "indicators":{"quote":[{"open":[null,2.0],"high":[null,2.0],"low":[null,2.0],"close":[null,2.0],"volume":[null,7]}]}
        }],"error":null}}"#;

        let table = parse_chart_response(&symbol(), 200, body).expect("must parse");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].volume, Some(7));
    }

    #[test]
    fn provider_not_found_error_is_classified() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let error = parse_chart_response(&symbol(), 200, body).expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NotFound);
    }

    #[test]
    fn server_errors_surface_description() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Unprocessable Entity","description":"Invalid input - interval=1d is not supported"}}}"#;
        let error = parse_chart_response(&symbol(), 422, body).expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert!(error.message().contains("422"));
        assert!(error.message().contains("interval=1d is not supported"));
    }

    #[test]
    fn garbage_payload_is_internal() {
        let error = parse_chart_response(&symbol(), 200, "<html>").expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Internal);
    }
}
