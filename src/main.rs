//! vitals - a live terminal dashboard for your machine's vital signs.
//!
//! Polls CPU, memory, thermal, network, disk, process, GPU, battery, and
//! container sources once a second and renders them as a multi-panel
//! text-mode display. `--once` prints a single plain-text snapshot
//! instead.

mod core;
mod format;
mod metrics;
mod report;
mod sensors;
mod ui;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::core::app::App;
use crate::core::state::AlertThresholds;
use crate::ui::theme::{Theme, ThemeKind};

#[derive(Parser)]
#[command(name = "vitals")]
#[command(author = "Vitals Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A live terminal dashboard for your machine's vital signs", long_about = None)]
struct Cli {
    /// Print one snapshot report to stdout and exit
    #[arg(long)]
    once: bool,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeKind::Default)]
    theme: ThemeKind,

    /// CPU usage alert threshold
    #[arg(long, value_name = "PERCENT", default_value_t = 90.0)]
    alert_cpu: f64,

    /// Temperature alert threshold
    #[arg(long, value_name = "DEGREES", default_value_t = 85.0)]
    alert_temp: f64,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbosity: u8) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // The dashboard owns the terminal, so logs go to a file.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitals")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "vitals.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version print to stdout and exit 0; anything else
            // (unknown flags, bad values) prints usage and exits 1.
            let code = i32::from(err.use_stderr());
            let _ = err.print();
            std::process::exit(code);
        }
    };

    // Keep the guard alive for the duration of the program
    let _logging_guard = setup_logging(cli.verbose)?;

    let thresholds = AlertThresholds {
        cpu_percent: cli.alert_cpu,
        temp_degrees: cli.alert_temp,
    };

    if cli.once {
        return report::print_snapshot(thresholds);
    }

    let mut app = App::new(Theme::from_kind(cli.theme), thresholds)?;
    app.run()
}
