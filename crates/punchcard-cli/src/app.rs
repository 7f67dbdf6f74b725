//! Run pipeline: acquire, summarize, write, notify
//!
//! ```text
//! Start -> Acquire --cancel--> Exit
//!             |
//!          Summarize --error--> Exit(1)
//!             |
//!           Write --error--> Exit(1)
//!             |
//!          Notify -> Exit
//! ```

use crate::config::Config;
use anyhow::{Context, Result};
use punchcard_core::{Dialogs, Summarizer};
use punchcard_parser::read_file;
use punchcard_render::ExcelRenderer;
use punchcard_solver::DailySummarizer;
use std::path::{Path, PathBuf};
use tracing::info;

/// How a run ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No file was chosen; nothing written
    Cancelled,
    /// Report written to this path
    Written(PathBuf),
}

/// Run one report from file selection to notification
pub fn run<D: Dialogs>(dialogs: &mut D, config: &Config) -> Result<Outcome> {
    let Some(input) = dialogs.pick_file() else {
        info!("No file selected");
        return Ok(Outcome::Cancelled);
    };

    let table =
        read_file(&input).with_context(|| format!("Failed to read {}", input.display()))?;

    let report = DailySummarizer::new()
        .summarize(&table)
        .with_context(|| format!("Failed to summarize {}", input.display()))?;

    let target = config.output_target()?;
    let output = target.report_path(config.today);
    ExcelRenderer::new()
        .save(&report, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    dialogs.notify(&success_message(&target.location, &output));
    Ok(Outcome::Written(output))
}

/// Completion text naming the report file
pub fn success_message(location: &str, output: &Path) -> String {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.display().to_string());
    format!("Report saved to {location}:\n{name}")
}
