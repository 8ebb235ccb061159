//! `jetlag plan`: build a request from flags and config, generate, emit.

use std::path::PathBuf;

use clap::Args;
use jiff::civil::DateTime;

use crate::circadian::timezone;
use crate::config::Config;
use crate::model::PlanRequest;
use crate::plan;
use crate::storage::{ArchivedPlan, Storage};

use super::{ModeArg, emit, format};

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Origin IANA timezone (e.g. `Europe/London`).
    #[arg(long)]
    from: String,

    /// Destination IANA timezone (e.g. `America/New_York`).
    #[arg(long)]
    to: String,

    /// Departure, origin-local (e.g. `2024-06-01T10:00`).
    #[arg(long)]
    depart: DateTime,

    /// Arrival, destination-local.
    #[arg(long)]
    arrive: DateTime,

    /// Flight duration in hours. Defaults to arrival minus departure.
    #[arg(long)]
    duration: Option<f64>,

    /// Usual bedtime, hour of the day (0–23).
    #[arg(long)]
    bedtime: Option<u8>,

    /// Usual wake time, hour of the day (0–23).
    #[arg(long)]
    wake: Option<u8>,

    /// Recovery policy.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Save the plan to the local archive and print its ID to stderr.
    #[arg(long)]
    save: bool,

    /// Write output to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print a human-readable summary instead of JSON.
    #[arg(long)]
    summary: bool,
}

pub(super) fn cmd_plan(config: &Config, storage: &Storage, args: &PlanArgs) -> Result<(), String> {
    let request = build_request(config, args)?;
    let generated = plan::generate(&request).map_err(|e| e.to_string())?;
    for warning in &generated.warnings {
        tracing::warn!(%warning, "plan calculation warning");
    }

    if args.save {
        save(storage, &request, &generated.plan)?;
    }

    let text = if args.summary {
        format::format_plan(&generated.plan)
    } else {
        serde_json::to_string_pretty(&generated.plan)
            .map_err(|e| format!("failed to serialize plan: {e}"))?
    };
    emit(&text, args.out.as_deref())
}

/// Resolve local times against their zones and merge flags over config.
fn build_request(config: &Config, args: &PlanArgs) -> Result<PlanRequest, String> {
    let origin = timezone::resolve(&args.from).map_err(|e| e.to_string())?;
    let destination = timezone::resolve(&args.to).map_err(|e| e.to_string())?;

    let departure = args
        .depart
        .to_zoned(origin)
        .map_err(|e| format!("invalid departure: {e}"))?
        .timestamp();
    let arrival = args
        .arrive
        .to_zoned(destination)
        .map_err(|e| format!("invalid arrival: {e}"))?
        .timestamp();

    let flight_duration_hours = args
        .duration
        .unwrap_or_else(|| arrival.duration_since(departure).as_secs_f64() / 3600.0);

    Ok(PlanRequest {
        origin_timezone: args.from.clone(),
        destination_timezone: args.to.clone(),
        departure,
        arrival,
        flight_duration_hours,
        sleep: config.sleep(args.bedtime, args.wake),
        recovery_mode: config.mode(args.mode.map(ModeArg::to_domain)),
    })
}

/// Archive the plan unless an identical request was already saved.
fn save(
    storage: &Storage,
    request: &PlanRequest,
    plan: &crate::model::RecoveryPlan,
) -> Result<(), String> {
    let existing = storage
        .find_by_fingerprint(&request.fingerprint())
        .map_err(|e| format!("failed to search archive: {e}"))?;
    if let Some(existing) = existing {
        eprintln!("Already saved as {}", existing.id);
        return Ok(());
    }

    let archived = ArchivedPlan::new(request.clone(), plan.clone());
    storage
        .save_plan(&archived)
        .map_err(|e| format!("failed to save plan: {e}"))?;
    eprintln!("Saved plan {}", archived.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;

    use crate::cli::{Cli, Command};
    use crate::model::RecoveryMode;

    fn parse(args: &[&str]) -> PlanArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Plan(args) => args,
            other => panic!("expected plan, got {other:?}"),
        }
    }

    #[test]
    fn local_times_resolve_against_their_own_zones() {
        let args = parse(&[
            "jetlag",
            "plan",
            "--from",
            "Europe/London",
            "--to",
            "America/New_York",
            "--depart",
            "2024-06-01T10:00",
            "--arrive",
            "2024-06-01T13:00",
        ]);
        let request = build_request(&Config::default(), &args).unwrap();

        assert_eq!(request.departure.to_string(), "2024-06-01T09:00:00Z");
        assert_eq!(request.arrival.to_string(), "2024-06-01T17:00:00Z");
        assert!((request.flight_duration_hours - 8.0).abs() < 1e-9);
        assert_eq!(request.recovery_mode, RecoveryMode::Conservative);
    }

    #[test]
    fn flags_override_config() {
        let args = parse(&[
            "jetlag",
            "plan",
            "--from",
            "Asia/Taipei",
            "--to",
            "America/Vancouver",
            "--depart",
            "2024-06-01T10:30",
            "--arrive",
            "2024-06-01T06:00",
            "--duration",
            "11",
            "--wake",
            "5",
            "--mode",
            "aggressive",
        ]);
        let config = Config {
            bedtime: Some(23),
            wake_time: Some(7),
            recovery_mode: Some(RecoveryMode::Conservative),
        };
        let request = build_request(&config, &args).unwrap();

        assert_eq!(request.flight_duration_hours, 11.0);
        assert_eq!(request.sleep.normal_bedtime, 23);
        assert_eq!(request.sleep.normal_wake_time, 5);
        assert_eq!(request.recovery_mode, RecoveryMode::Aggressive);
    }

    #[test]
    fn unknown_zone_is_reported() {
        let args = parse(&[
            "jetlag",
            "plan",
            "--from",
            "Mars/Olympus_Mons",
            "--to",
            "America/New_York",
            "--depart",
            "2024-06-01T10:00",
            "--arrive",
            "2024-06-01T13:00",
        ]);
        let err = build_request(&Config::default(), &args).unwrap_err();
        assert!(err.contains("Mars/Olympus_Mons"));
    }
}
