//! Pipeline trace replay CLI.
//!
//! This binary feeds recorded debugger snapshots through a tracking session. It performs:
//! 1. **Replay:** Read a JSON-lines trace, one snapshot per line, skipping malformed lines.
//! 2. **Views:** Print the status line, pipeline diagram, Gantt table and metrics table.
//! 3. **Export:** Emit the same views as JSON for other tools.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod output;
mod replay;

use crate::error::CliError;
use crate::output::{Format, View};

#[derive(Parser, Debug)]
#[command(
    name = "pipeview",
    author,
    version,
    about = "Pipeline history viewer for 5-stage debugger traces",
    long_about = "Replay a recorded trace of pipeline snapshots and print per-instruction timelines, CPI metrics and the pipeline diagram.\n\nA trace is a JSON-lines file with one {\"pipeline\": {...}, \"vm\": {...}} object per line.\n\nExamples:\n  pipeview replay trace.jsonl\n  pipeview replay trace.jsonl --view gantt\n  pipeview replay trace.jsonl --format json --capacity 200"
)]
struct Cli {
    /// Log at debug level (otherwise RUST_LOG, default warn).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a snapshot trace and print the resulting views.
    Replay {
        /// JSON-lines trace file.
        trace: PathBuf,

        /// JSON configuration file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override metrics.capacity from the configuration.
        #[arg(long)]
        capacity: Option<usize>,

        /// Which view to print.
        #[arg(long, value_enum, default_value_t = View::All)]
        view: View,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, or `debug` when verbose.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Replay {
            trace,
            config,
            capacity,
            view,
            format,
        } => {
            let config = replay::load_config(config.as_deref(), capacity)?;
            let mut session = pipeview_core::Session::new(&config);
            let _ = replay::replay_file(&trace, &mut session)?;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            match format {
                Format::Text => output::write_text(&mut out, &session, view)?,
                Format::Json => output::write_json(&mut out, &session, view)?,
            }
            Ok(())
        }
    }
}
