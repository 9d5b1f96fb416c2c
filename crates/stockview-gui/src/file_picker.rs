use std::path::PathBuf;

/// Interactive "open file" step. `None` means the user dismissed the dialog.
pub trait FilePicker {
    fn pick_csv(&self) -> Option<PathBuf>;
}

/// Native dialog suggesting `*.csv` with an "All files" fallback.
#[derive(Debug, Default)]
pub struct NativeFilePicker;

impl FilePicker for NativeFilePicker {
    fn pick_csv(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Upload CSV")
            .add_filter("CSV files", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
    }
}
