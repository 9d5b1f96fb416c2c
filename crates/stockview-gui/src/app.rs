use std::sync::Arc;

use eframe::egui;
use stockview_core::{Period, PriceSource, StyledSegment};

use crate::controller::{self, PendingTask, Services};
use crate::file_picker::FilePicker;
use crate::view;

/// What an output region currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RegionContent {
    #[default]
    Empty,
    Text(String),
    Styled(Vec<StyledSegment>),
}

/// A read-only display region with an optional caption.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRegion {
    pub caption: Option<String>,
    pub content: RegionContent,
}

impl OutputRegion {
    pub fn replace(&mut self, caption: impl Into<String>, content: RegionContent) {
        self.caption = Some(caption.into());
        self.content = content;
    }
}

/// Modal error waiting for acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
}

/// Everything the window shows and every action reads.
///
/// The ticker and percentage-change actions both write `primary`; uploaded
/// files go to `secondary`.
pub struct AppState {
    pub ticker: String,
    pub period_label: String,
    pub primary: OutputRegion,
    pub secondary: OutputRegion,
    pub dialog: Option<ErrorDialog>,
    pub pending: Option<PendingTask>,
}

impl AppState {
    pub fn new(ticker: impl Into<String>, period: Period) -> Self {
        Self {
            ticker: ticker.into(),
            period_label: period.label().to_owned(),
            primary: OutputRegion::default(),
            secondary: OutputRegion::default(),
            dialog: None,
            pending: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}

/// eframe entry point: drains task completions, draws, dispatches clicks.
pub struct StockViewApp {
    state: AppState,
    services: Services,
}

impl StockViewApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        state: AppState,
        source: Arc<dyn PriceSource>,
        picker: Box<dyn FilePicker>,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        view::apply_theme(&ctx);
        Self {
            state,
            services: Services {
                source,
                picker,
                notify: Arc::new(move || ctx.request_repaint()),
            },
        }
    }
}

impl eframe::App for StockViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        controller::poll(&mut self.state);

        for action in view::show(ctx, &mut self.state) {
            controller::dispatch(&mut self.state, &self.services, action);
        }
    }
}
