use stockview_core::{LoadError, SourceError, SourceErrorKind, SummaryError, ValidationError};
use thiserror::Error;

/// Startup failures mapped to exit codes.
#[derive(Debug, Error)]
pub enum GuiError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("window error: {0}")]
    Window(#[from] eframe::Error),
}

impl GuiError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Runtime(_) => 10,
            Self::Window(_) => 11,
        }
    }
}

/// Failure of one user action, shown to the user as a modal dialog.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Input(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    File(#[from] LoadError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("background task failed: {0}")]
    Task(String),
}

impl ActionError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Input(_) => "Invalid Input",
            Self::Source(error) if error.kind() == SourceErrorKind::NotFound => "No Data",
            Self::Source(_) => "Provider Error",
            Self::File(_) => "CSV Error",
            Self::Summary(_) => "Calculation Error",
            Self::Task(_) => "Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Input(ValidationError::EmptySymbol) => {
                String::from("Please enter a valid stock ticker symbol.")
            }
            Self::Input(error) => format!("Invalid ticker: {error}."),
            Self::Source(error) if error.kind() == SourceErrorKind::NotFound => {
                error.message().to_owned()
            }
            Self::Source(error) => format!("Could not fetch stock data: {}", error.message()),
            Self::File(error) => format!("Failed to read CSV file: {error}"),
            Self::Summary(error) => format!("Cannot compute percentage change: {error}."),
            Self::Task(message) => message.clone(),
        }
    }
}
