//! Behavior tests for the Yahoo price source.
//!
//! These drive the adapter through an in-memory HTTP client and check how
//! payloads, empty results and transport failures are classified.

use stockview_core::{
    render_table, HistoryRequest, HttpError, Period, PriceSource, SourceErrorKind, Symbol,
    ValidationError, YahooAdapter,
};
use stockview_tests::RecordingHttpClient;

const TWO_SESSIONS: &str = r#"{"chart":{"result":[{
    "meta":{"currency":"USD","symbol":"AAPL","gmtoffset":-18000},
    "timestamp":[1704205800,1704292200],
    "events":{
        "dividends":{"1704292200":{"amount":0.24,"date":1704292200}},
        "splits":{"1704205800":{"date":1704205800,"numerator":4,"denominator":1,"splitRatio":"4:1"}}
    },
    "indicators":{
        "quote":[{
            "open":[187.15,184.22],
            "high":[188.44,185.88],
            "low":[183.885,183.43],
            "close":[185.64,184.25],
            "volume":[82488700,58414500]
        }],
        "adjclose":[{"adjclose":[185.64,184.25]}]
    }
}],"error":null}}"#;

fn request(ticker: &str, period: Period) -> HistoryRequest {
    HistoryRequest::new(Symbol::parse(ticker).expect("valid"), period)
}

// =============================================================================
// Valid responses
// =============================================================================

#[tokio::test]
async fn when_yahoo_returns_sessions_they_become_dated_rows() {
    // Given: a provider answering with two daily sessions
    let client = RecordingHttpClient::responding(200, TWO_SESSIONS);
    let adapter = YahooAdapter::new(client.clone());

    // When: five days of history are requested
    let table = adapter
        .history(request("aapl", Period::FiveDays))
        .await
        .expect("history should parse");

    // Then: both sessions arrive in order with events joined by date
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].close, 185.64);
    assert_eq!(table.rows[0].stock_splits, Some(4.0));
    assert_eq!(table.rows[0].dividends, Some(0.0));
    assert_eq!(table.rows[1].dividends, Some(0.24));
    assert_eq!(table.rows[1].volume, Some(58_414_500));

    // And: exactly one request carried the symbol and period code
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.contains("/v8/finance/chart/AAPL?"));
    assert!(requests[0].url.contains("range=5d"));
}

#[tokio::test]
async fn when_rendered_provider_rows_use_iso_dates_and_three_decimals() {
    let adapter = YahooAdapter::new(RecordingHttpClient::responding(200, TWO_SESSIONS));

    let table = adapter
        .history(request("AAPL", Period::FiveDays))
        .await
        .expect("history should parse");
    let rendered = render_table(&table);

    assert!(rendered.contains("2024-01-02"), "{rendered}");
    assert!(rendered.contains("2024-01-03"), "{rendered}");
    assert!(rendered.contains("183.885"), "{rendered}");
    assert!(rendered.contains("187.150"), "{rendered}");
    assert!(rendered.contains("82488700"), "{rendered}");
}

#[tokio::test]
async fn when_adjusted_close_differs_prices_are_scaled() {
    let body = r#"{"chart":{"result":[{
        "timestamp":[1704205800],
        "indicators":{
            "quote":[{"open":[100.0],"high":[110.0],"low":[90.0],"close":[100.0],"volume":[1]}],
            "adjclose":[{"adjclose":[50.0]}]
        }
    }],"error":null}}"#;
    let adapter = YahooAdapter::new(RecordingHttpClient::responding(200, body));

    let table = adapter
        .history(request("XYZ", Period::OneDay))
        .await
        .expect("history should parse");

    let row = &table.rows[0];
    assert_eq!((row.open, row.high, row.low, row.close), (50.0, 55.0, 45.0, 50.0));
}

// =============================================================================
// Not found
// =============================================================================

#[tokio::test]
async fn when_ticker_is_unknown_system_reports_not_found() {
    let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
    let adapter = YahooAdapter::new(RecordingHttpClient::responding(404, body));

    let error = adapter
        .history(request("NOPE", Period::OneMonth))
        .await
        .expect_err("unknown ticker must fail");

    assert_eq!(error.kind(), SourceErrorKind::NotFound);
    assert_eq!(error.message(), "No data found for ticker 'NOPE'.");
}

#[tokio::test]
async fn when_provider_returns_zero_rows_system_reports_not_found() {
    let body = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#;
    let adapter = YahooAdapter::new(RecordingHttpClient::responding(200, body));

    let error = adapter
        .history(request("EMPTY", Period::OneDay))
        .await
        .expect_err("empty history must fail");

    assert_eq!(error.kind(), SourceErrorKind::NotFound);
}

// =============================================================================
// Transport failures
// =============================================================================

#[tokio::test]
async fn when_transport_fails_error_is_unavailable_not_not_found() {
    let adapter =
        YahooAdapter::new(RecordingHttpClient::failing(HttpError::new("connection refused")));

    let error = adapter
        .history(request("AAPL", Period::OneYear))
        .await
        .expect_err("transport failure must fail");

    assert_eq!(error.kind(), SourceErrorKind::Unavailable);
    assert!(error.message().contains("connection refused"));
}

#[tokio::test]
async fn when_request_times_out_message_names_the_budget() {
    let adapter = YahooAdapter::new(RecordingHttpClient::failing(HttpError::timeout("slow")))
        .with_timeout_ms(250);

    let error = adapter
        .history(request("AAPL", Period::Max))
        .await
        .expect_err("timeout must fail");

    assert_eq!(error.kind(), SourceErrorKind::Unavailable);
    assert!(error.message().contains("250 ms"));
}

#[tokio::test]
async fn configured_timeout_and_base_url_reach_the_transport() {
    let client = RecordingHttpClient::responding(200, TWO_SESSIONS);
    let adapter = YahooAdapter::new(client.clone())
        .with_base_url("http://127.0.0.1:8080/")
        .with_timeout_ms(1_500);

    adapter
        .history(request("AAPL", Period::ThreeMonths))
        .await
        .expect("history should parse");

    let sent = &client.recorded_requests()[0];
    assert!(sent.url.starts_with("http://127.0.0.1:8080/v8/finance/chart/AAPL"));
    assert_eq!(sent.timeout_ms, 1_500);
}

// =============================================================================
// Input validation happens before any request
// =============================================================================

#[test]
fn blank_tickers_never_become_requests() {
    for input in ["", " ", "\t"] {
        assert_eq!(Symbol::parse(input), Err(ValidationError::EmptySymbol));
    }
}
