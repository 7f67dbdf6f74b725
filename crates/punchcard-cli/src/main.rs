//! punchcard CLI - Daily attendance summaries
//!
//! Picks a punch-clock export, summarizes punches per person per day and
//! writes `report_<date>.xlsx` to the desktop.

mod app;
mod config;
mod dialog;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::app::Outcome;
use crate::config::{Cli, Config};
use crate::dialog::{ConsoleDialogs, NativeDialogs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = Config::from_cli(&cli);

    let outcome = if config.interactive {
        let mut dialogs = NativeDialogs::open(config.input.clone());
        app::run(&mut dialogs, &config)?
    } else {
        let mut dialogs = ConsoleDialogs::new(config.input.clone());
        app::run(&mut dialogs, &config)?
    };

    match outcome {
        Outcome::Cancelled => debug!("Cancelled; no report written"),
        Outcome::Written(path) => debug!(path = %path.display(), "Done"),
    }

    Ok(())
}
