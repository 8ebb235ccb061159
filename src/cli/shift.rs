//! `jetlag shift`: the shorter-path shift between two zones.

use clap::Args;
use jiff::Timestamp;

use crate::circadian::{shift_between, timezone};

use super::format;

#[derive(Debug, Args)]
pub struct ShiftArgs {
    /// Origin IANA timezone.
    #[arg(long)]
    from: String,

    /// Destination IANA timezone.
    #[arg(long)]
    to: String,

    /// Instant at which to compare offsets (RFC 3339). Defaults to now.
    #[arg(long)]
    at: Option<Timestamp>,
}

pub(super) fn cmd_shift(args: &ShiftArgs) -> Result<(), String> {
    let origin = timezone::resolve(&args.from).map_err(|e| e.to_string())?;
    let destination = timezone::resolve(&args.to).map_err(|e| e.to_string())?;
    let at = args.at.unwrap_or_else(Timestamp::now);

    let shift = shift_between(&origin, &destination, at);
    println!("{}", format::format_shift(&shift));
    Ok(())
}
