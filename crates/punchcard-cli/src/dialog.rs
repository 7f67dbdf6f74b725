//! Dialog backends
//!
//! `NativeDialogs` shows the platform file picker and message box.
//! `ConsoleDialogs` takes the input from the command line and prints the
//! completion message, for headless runs.

use punchcard_core::Dialogs;
use std::path::PathBuf;
use tracing::debug;

const PICK_TITLE: &str = "Select Attendance File (CSV or Excel)";
const NOTIFY_TITLE: &str = "Success";

/// Native dialog context.
///
/// Lives for the whole run. `rfd` opens each dialog on demand and keeps no
/// toolkit state between them, so there is nothing to release: dropping the
/// context only logs the end of the dialog session, on every exit path.
pub struct NativeDialogs {
    preselected: Option<PathBuf>,
}

impl NativeDialogs {
    /// Acquire the dialog context. A preselected file skips the picker.
    pub fn open(preselected: Option<PathBuf>) -> Self {
        debug!("Dialog context acquired");
        Self { preselected }
    }
}

impl Dialogs for NativeDialogs {
    fn pick_file(&mut self) -> Option<PathBuf> {
        if let Some(path) = self.preselected.take() {
            return Some(path);
        }

        rfd::FileDialog::new()
            .set_title(PICK_TITLE)
            .add_filter("Data files", &["xlsx", "csv", "xls"])
            .add_filter("All files", &["*"])
            .pick_file()
    }

    fn notify(&mut self, message: &str) {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(NOTIFY_TITLE)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

impl Drop for NativeDialogs {
    fn drop(&mut self) {
        debug!("Dialog context released");
    }
}

/// Headless dialogs: the input comes from the command line
pub struct ConsoleDialogs {
    input: Option<PathBuf>,
}

impl ConsoleDialogs {
    pub fn new(input: Option<PathBuf>) -> Self {
        Self { input }
    }
}

impl Dialogs for ConsoleDialogs {
    fn pick_file(&mut self) -> Option<PathBuf> {
        self.input.take()
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}
