//! CLI interface for jetlag.
//!
//! Each subcommand is non-interactive: arguments in, structured output out.
//!
//! - `jetlag plan` generates a recovery plan for one itinerary.
//! - `jetlag shift` prints the shorter-path shift between two zones.
//! - `jetlag plans list|show` browses the local plan archive.
//!
//! Plans are printed as JSON unless `--summary` is given.

mod format;
mod plan;
mod plans;
mod shift;

use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::model::RecoveryMode;
use crate::storage::Storage;

pub use plan::PlanArgs;
pub use plans::PlansCommand;
pub use shift::ShiftArgs;

/// Jetlag: plan your way out of jet lag.
#[derive(Debug, Parser)]
#[command(name = "jetlag", after_long_help = EXAMPLES_HELP)]
pub struct Cli {
    /// Log plan assembly details to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

const EXAMPLES_HELP: &str = r"Examples:
  jetlag plan --from Europe/London --to America/New_York \
      --depart 2024-06-01T10:00 --arrive 2024-06-01T13:00 --summary
  jetlag plan --from Asia/Taipei --to America/Vancouver \
      --depart 2024-06-01T10:30 --arrive 2024-06-01T06:00 --mode aggressive --save
  jetlag shift --from Asia/Kolkata --to America/Los_Angeles
  jetlag plans list
  jetlag plans show a3b --summary";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a recovery plan for a flight.
    ///
    /// Departure is origin-local and arrival destination-local time.
    /// The plan JSON is written to `--out` (if given) or stdout.
    Plan(PlanArgs),

    /// Print the timezone shift between two zones.
    Shift(ShiftArgs),

    /// Browse saved plans.
    Plans {
        #[command(subcommand)]
        command: PlansCommand,
    },
}

/// CLI-facing recovery mode, mapped to the domain `RecoveryMode`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Research-based rates; longest but gentlest.
    Conservative,
    /// Intensive protocol, at most three days.
    Aggressive,
}

impl ModeArg {
    fn to_domain(self) -> RecoveryMode {
        match self {
            Self::Conservative => RecoveryMode::Conservative,
            Self::Aggressive => RecoveryMode::Aggressive,
        }
    }
}

/// Run a parsed command, returning an error message on failure.
pub fn run(cli: Cli, config: &Config, storage: &Storage) -> Result<(), String> {
    match cli.command {
        Command::Plan(args) => plan::cmd_plan(config, storage, &args),
        Command::Shift(args) => shift::cmd_shift(&args),
        Command::Plans { command } => match command {
            PlansCommand::List => plans::cmd_list(storage),
            PlansCommand::Show { id, summary } => plans::cmd_show(storage, &id, summary),
        },
    }
}

/// Write `text` to `out`, or stdout when no path is given.
fn emit(text: &str, out: Option<&Path>) -> Result<(), String> {
    match out {
        Some(path) => {
            fs::write(path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
