//! Command-line and environment configuration.
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--ticker` | `STOCKVIEW_TICKER` | empty |
//! | `--period` | `STOCKVIEW_PERIOD` | `5 Days` |
//! | `--base-url` | `STOCKVIEW_BASE_URL` | Yahoo query1 host |
//! | `--timeout-ms` | `STOCKVIEW_TIMEOUT_MS` | `10000` |
//! | `--log-level` | (`RUST_LOG` wins) | `info` |

use clap::Parser;
use stockview_core::adapters::yahoo::DEFAULT_BASE_URL;
use stockview_core::http_client::DEFAULT_TIMEOUT_MS;
use stockview_core::Period;

/// Period shown in the dropdown when none (or an unknown one) is configured.
pub const DEFAULT_PERIOD: Period = Period::FiveDays;

/// Desktop viewer for historical stock prices.
#[derive(Debug, Parser)]
#[command(
    name = "stockview",
    author,
    version,
    about = "Desktop viewer for historical stock prices"
)]
pub struct Cli {
    /// Ticker placed in the input field at startup.
    #[arg(long, env = "STOCKVIEW_TICKER", default_value = "")]
    pub ticker: String,

    /// Initial period label, e.g. "5 Days", "1 Year" or "Max".
    #[arg(long, env = "STOCKVIEW_PERIOD", default_value = "5 Days")]
    pub period: String,

    /// Provider base URL.
    #[arg(long, env = "STOCKVIEW_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "STOCKVIEW_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Dropdown label to start with; unknown labels fall back to "5 Days".
    pub fn initial_period(&self) -> Period {
        Period::from_label_or(self.period.trim(), DEFAULT_PERIOD)
    }
}
