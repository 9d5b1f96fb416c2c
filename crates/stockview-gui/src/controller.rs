//! Action handlers.
//!
//! Every handler takes the [`AppState`] explicitly. Network fetches and file
//! reads run as tokio tasks; each task sends exactly one result back over a
//! channel which [`poll`] drains on the UI thread.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use stockview_core::{
    render_change_summary, render_table, ChangeSummary, CsvLoader, HistoryRequest, Period,
    PriceSource, Symbol,
};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;

use crate::app::{AppState, ErrorDialog, RegionContent};
use crate::error::ActionError;
use crate::file_picker::FilePicker;

/// Collaborators the handlers need besides the state.
pub struct Services {
    pub source: Arc<dyn PriceSource>,
    pub picker: Box<dyn FilePicker>,
    /// Wakes the UI thread once a task has posted its result.
    pub notify: Arc<dyn Fn() + Send + Sync>,
}

/// User intents emitted by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    GetStockData,
    CheckPercentageChange,
    UploadCsv,
    Cancel,
    DismissDialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    StockData,
    PercentageChange,
    UploadCsv,
}

impl ActionKind {
    pub const fn busy_label(self) -> &'static str {
        match self {
            Self::StockData => "Fetching stock data...",
            Self::PercentageChange => "Fetching price change...",
            Self::UploadCsv => "Reading CSV file...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Primary,
    Secondary,
}

/// Finished work, ready to be written into a region.
#[derive(Debug)]
struct RegionUpdate {
    target: Target,
    caption: String,
    content: RegionContent,
}

type TaskResult = Result<RegionUpdate, ActionError>;

/// The one in-flight background task.
pub struct PendingTask {
    pub kind: ActionKind,
    handle: JoinHandle<()>,
    rx: mpsc::Receiver<TaskResult>,
}

pub fn dispatch(state: &mut AppState, services: &Services, action: UiAction) {
    match action {
        UiAction::GetStockData => get_stock_data(state, services),
        UiAction::CheckPercentageChange => check_percentage_change(state, services),
        UiAction::UploadCsv => upload_csv(state, services),
        UiAction::Cancel => cancel(state),
        UiAction::DismissDialog => state.dialog = None,
    }
}

/// Fetch history and render it as a table into the primary region.
pub fn get_stock_data(state: &mut AppState, services: &Services) {
    if state.is_busy() {
        return;
    }
    let Some(symbol) = read_symbol(state, ActionKind::StockData) else {
        return;
    };
    let period = Period::from_label_or(&state.period_label, Period::TABLE_DEFAULT);
    let source = Arc::clone(&services.source);

    spawn(state, services, ActionKind::StockData, async move {
        let table = source
            .history(HistoryRequest::new(symbol.clone(), period))
            .await?;
        Ok(RegionUpdate {
            target: Target::Primary,
            caption: format!("{symbol} · {} · {} rows", period.label(), table.len()),
            content: RegionContent::Text(render_table(&table)),
        })
    });
}

/// Fetch history and render the first-to-last close change into the primary region.
pub fn check_percentage_change(state: &mut AppState, services: &Services) {
    if state.is_busy() {
        return;
    }
    let Some(symbol) = read_symbol(state, ActionKind::PercentageChange) else {
        return;
    };
    let period = Period::from_label_or(&state.period_label, Period::SUMMARY_DEFAULT);
    let source = Arc::clone(&services.source);

    spawn(state, services, ActionKind::PercentageChange, async move {
        let table = source
            .history(HistoryRequest::new(symbol.clone(), period))
            .await?;
        let summary = ChangeSummary::from_table(&table)?;
        Ok(RegionUpdate {
            target: Target::Primary,
            caption: format!("{symbol} · {} change", period.label()),
            content: RegionContent::Styled(render_change_summary(&summary)),
        })
    });
}

/// Ask for a file and render it into the secondary region.
///
/// A dismissed dialog changes nothing.
pub fn upload_csv(state: &mut AppState, services: &Services) {
    if state.is_busy() {
        return;
    }
    let Some(path) = services.picker.pick_csv() else {
        tracing::debug!("file selection cancelled");
        return;
    };

    spawn(state, services, ActionKind::UploadCsv, load_csv(path));
}

async fn load_csv(path: PathBuf) -> TaskResult {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let table = tokio::task::spawn_blocking(move || CsvLoader::load(&path))
        .await
        .map_err(|e| ActionError::Task(e.to_string()))??;

    Ok(RegionUpdate {
        target: Target::Secondary,
        caption: format!("Uploaded file: {name} · {} rows", table.len()),
        content: RegionContent::Text(render_table(&table)),
    })
}

/// Abort the running task; regions keep their previous content.
pub fn cancel(state: &mut AppState) {
    if let Some(task) = state.pending.take() {
        task.handle.abort();
        tracing::info!(action = ?task.kind, "action cancelled");
    }
}

/// Apply a finished task's result, if one has arrived.
pub fn poll(state: &mut AppState) {
    let Some(task) = state.pending.as_mut() else {
        return;
    };

    let result = match task.rx.try_recv() {
        Ok(result) => result,
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Disconnected) => Err(ActionError::Task(String::from(
            "background task ended without a result",
        ))),
    };
    let kind = task.kind;
    state.pending = None;

    match result {
        Ok(update) => {
            tracing::info!(action = ?kind, caption = %update.caption, "action completed");
            let region = match update.target {
                Target::Primary => &mut state.primary,
                Target::Secondary => &mut state.secondary,
            };
            region.replace(update.caption, update.content);
        }
        Err(error) => report(state, kind, error),
    }
}

fn read_symbol(state: &mut AppState, kind: ActionKind) -> Option<Symbol> {
    match Symbol::parse(&state.ticker) {
        Ok(symbol) => Some(symbol),
        Err(error) => {
            report(state, kind, error.into());
            None
        }
    }
}

fn report(state: &mut AppState, kind: ActionKind, error: ActionError) {
    tracing::warn!(action = ?kind, %error, "action failed");
    state.dialog = Some(ErrorDialog {
        title: error.title().to_owned(),
        message: error.message(),
    });
}

fn spawn<F>(state: &mut AppState, services: &Services, kind: ActionKind, job: F)
where
    F: Future<Output = TaskResult> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    let notify = Arc::clone(&services.notify);

    let handle = tokio::spawn(async move {
        let result = job.await;
        let _ = tx.send(result).await;
        notify();
    });

    tracing::debug!(action = ?kind, "action started");
    state.pending = Some(PendingTask { kind, handle, rx });
}
