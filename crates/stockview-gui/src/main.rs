mod app;
mod cli;
mod controller;
mod error;
mod file_picker;
mod view;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use eframe::egui;
use stockview_core::{PriceSource, YahooAdapter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::{AppState, StockViewApp};
use crate::cli::Cli;
use crate::error::GuiError;
use crate::file_picker::NativeFilePicker;

const WINDOW_TITLE: &str = "Stock Data Viewer";
const WINDOW_SIZE: [f32; 2] = [930.0, 750.0];

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str())),
        )
        .with(fmt::layer())
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "stockview exited with an error");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), GuiError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(GuiError::Runtime)?;
    let _guard = runtime.enter();

    let source: Arc<dyn PriceSource> = Arc::new(
        YahooAdapter::default()
            .with_base_url(cli.base_url.as_str())
            .with_timeout_ms(cli.timeout_ms),
    );
    let state = AppState::new(cli.ticker.trim(), cli.initial_period());
    tracing::info!(
        source = source.id(),
        base_url = %cli.base_url,
        timeout_ms = cli.timeout_ms,
        "starting stockview"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            Ok(Box::new(StockViewApp::new(
                cc,
                state,
                source,
                Box::new(NativeFilePicker),
            )))
        }),
    )?;

    Ok(())
}
