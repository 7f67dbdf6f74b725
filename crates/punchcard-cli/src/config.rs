//! Command-line arguments and run configuration

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use punchcard_render::report_file_name;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "punchcard")]
#[command(author, version, about = "Daily attendance summaries from punch-clock exports", long_about = None)]
pub struct Cli {
    /// Attendance export (.csv, .xlsx, .xls); a file dialog opens when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Directory the report is written to [default: ~/Desktop]
    #[arg(short, long, value_name = "DIR", env = "PUNCHCARD_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run without dialogs and print the result instead (requires FILE)
    #[arg(long, env = "PUNCHCARD_NO_DIALOG", requires = "file")]
    pub no_dialog: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Everything a run needs, read once at startup
#[derive(Clone, Debug)]
pub struct Config {
    /// Input chosen on the command line, if any
    pub input: Option<PathBuf>,
    /// Directory from `--output-dir`, replacing the desktop
    pub output_dir: Option<PathBuf>,
    /// Home directory, if the platform reports one
    pub home: Option<PathBuf>,
    /// Whether native dialogs are used
    pub interactive: bool,
    /// Date stamped into the report file name
    pub today: NaiveDate,
}

/// Where the report is written
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTarget {
    pub dir: PathBuf,
    /// Human name of `dir` used in the completion message
    pub location: String,
}

impl OutputTarget {
    /// Full path of the report produced on `date`
    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(report_file_name(date))
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            input: cli.file.clone(),
            output_dir: cli.output_dir.clone(),
            home: dirs::home_dir(),
            interactive: !cli.no_dialog,
            today: Local::now().date_naive(),
        }
    }

    /// Output directory: the override, else `<home>/Desktop`.
    ///
    /// Resolved only once there is a report to write, so a cancelled run
    /// never needs a home directory.
    pub fn output_target(&self) -> Result<OutputTarget> {
        if let Some(dir) = &self.output_dir {
            return Ok(OutputTarget {
                dir: dir.clone(),
                location: dir.display().to_string(),
            });
        }

        let home = self
            .home
            .as_ref()
            .context("Could not determine the home directory")?;
        Ok(OutputTarget {
            dir: home.join("Desktop"),
            location: "Desktop".to_string(),
        })
    }
}
