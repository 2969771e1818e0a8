//! CLI entrypoint for the crtcompat harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crtcompat::SELECTION;
use crtcompat_harness::structured_log::{LogEmitter, LogEntry, LogLevel};
use crtcompat_harness::{SelectionReport, plan, require_all_passed, run_plan};

/// Verification tooling for crtcompat.
#[derive(Debug, Parser)]
#[command(name = "crtcompat-harness")]
#[command(about = "Inspect and verify the compiled crtcompat layer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the build-time selection as JSON.
    Selection,
    /// Check the properties of the active path.
    Verify {
        /// JSONL log output path (if omitted, prints to stdout).
        #[arg(long)]
        log: Option<PathBuf>,
        /// Also run the sleep parity check (takes about four seconds).
        #[arg(long)]
        with_sleep: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Selection => {
            let body = serde_json::to_string_pretty(&SelectionReport::current())?;
            println!("{body}");
        }
        Command::Verify { log, with_sleep } => {
            let run_id = format!("run-{}", std::process::id());
            let mut emitter = match &log {
                Some(path) => LogEmitter::to_file(path, &run_id)?,
                None => LogEmitter::to_stdout(&run_id),
            };
            let props = plan(SELECTION.path, with_sleep);
            eprintln!(
                "Verifying {} properties on the {} path",
                props.len(),
                SELECTION.path.as_str()
            );
            emitter.emit_entry(
                LogEntry::new("", LogLevel::Info, "verify_start")
                    .with_mode(SELECTION.path.as_str())
                    .with_details(serde_json::to_value(SelectionReport::current())?),
            )?;
            let results = run_plan(&props, &mut emitter)?;
            emitter.emit_entry(
                LogEntry::new("", LogLevel::Info, "verify_end")
                    .with_mode(SELECTION.path.as_str())
                    .with_details(crtcompat_harness::selection::gap_counts()),
            )?;
            emitter.flush()?;

            for result in &results {
                eprintln!(
                    "[{}] {:?} ({} ms)",
                    result.property.name(),
                    result.outcome,
                    result.duration_ms
                );
            }
            if let Some(path) = &log {
                eprintln!("Log written to {}", path.display());
            }
            require_all_passed(&results)?;
        }
    }

    Ok(())
}
