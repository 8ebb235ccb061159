//! Archive commands: list, show.

use clap::Subcommand;
use uuid::Uuid;

use crate::storage::{ArchivedPlan, Storage};

use super::format;

#[derive(Debug, Subcommand)]
pub enum PlansCommand {
    /// List saved plans, oldest first.
    List,

    /// Print a saved plan.
    Show {
        /// Plan ID: full UUID or unambiguous prefix (e.g. `a3b`).
        id: String,

        /// Print a human-readable summary instead of JSON.
        #[arg(long)]
        summary: bool,
    },
}

pub(super) fn cmd_list(storage: &Storage) -> Result<(), String> {
    let plans = storage
        .list_plans()
        .map_err(|e| format!("failed to list plans: {e}"))?;

    if plans.is_empty() {
        println!("No saved plans");
        return Ok(());
    }

    for p in &plans {
        println!("{}", format::format_plan_row(p));
    }
    Ok(())
}

pub(super) fn cmd_show(storage: &Storage, reference: &str, summary: bool) -> Result<(), String> {
    let archived = resolve_plan(storage, reference)?;
    if summary {
        println!("{}", format::format_plan(&archived.plan));
    } else {
        let json = serde_json::to_string_pretty(&archived)
            .map_err(|e| format!("failed to serialize plan: {e}"))?;
        println!("{json}");
    }
    Ok(())
}

/// Resolve a plan reference (full UUID or unambiguous prefix) to a saved plan.
fn resolve_plan(storage: &Storage, reference: &str) -> Result<ArchivedPlan, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return storage
            .load_plan(id)
            .map_err(|e| format!("plan not found: {e}"));
    }

    // Try as a prefix match against all plans.
    let plans = storage
        .list_plans()
        .map_err(|e| format!("failed to list plans: {e}"))?;

    let matches: Vec<Uuid> = plans
        .iter()
        .map(|p| p.id)
        .filter(|id| id.to_string().starts_with(reference))
        .collect();

    match matches.as_slice() {
        [] => Err(format!("no plan matching '{reference}'")),
        [id] => storage
            .load_plan(*id)
            .map_err(|e| format!("failed to load plan: {e}")),
        _ => {
            let ids: Vec<String> = matches.iter().map(|id| id.to_string()[..8].to_string()).collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {} plans: {}",
                matches.len(),
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use tempfile::TempDir;

    use crate::model::{PlanRequest, RecoveryMode, SleepPreferences};

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("jetlag")).unwrap();
        (dir, storage)
    }

    fn saved_plan(storage: &Storage, id: Uuid) -> ArchivedPlan {
        let request = PlanRequest {
            origin_timezone: "Europe/Paris".into(),
            destination_timezone: "Asia/Dubai".into(),
            departure: "2024-06-01T08:00:00Z".parse().unwrap(),
            arrival: "2024-06-01T14:00:00Z".parse().unwrap(),
            flight_duration_hours: 6.0,
            sleep: SleepPreferences::default(),
            recovery_mode: RecoveryMode::Conservative,
        };
        let plan = crate::plan::generate_at(&request, Timestamp::UNIX_EPOCH)
            .unwrap()
            .plan;
        let mut archived = ArchivedPlan::new(request, plan);
        archived.id = id;
        storage.save_plan(&archived).unwrap();
        archived
    }

    #[test]
    fn resolves_full_id_and_prefix() {
        let (_dir, storage) = test_storage();
        let id: Uuid = "a3b0fc12-0000-4000-8000-000000000001".parse().unwrap();
        saved_plan(&storage, id);

        assert_eq!(resolve_plan(&storage, &id.to_string()).unwrap().id, id);
        assert_eq!(resolve_plan(&storage, "a3b").unwrap().id, id);
    }

    #[test]
    fn ambiguous_prefix_is_an_error() {
        let (_dir, storage) = test_storage();
        saved_plan(&storage, "a3b0fc12-0000-4000-8000-000000000001".parse().unwrap());
        saved_plan(&storage, "a3b9aa00-0000-4000-8000-000000000002".parse().unwrap());

        let err = resolve_plan(&storage, "a3b").unwrap_err();
        assert!(err.contains("ambiguous"));
        assert!(resolve_plan(&storage, "a3b9").is_ok());
    }

    #[test]
    fn unknown_prefix_is_an_error() {
        let (_dir, storage) = test_storage();
        let err = resolve_plan(&storage, "ffff").unwrap_err();
        assert!(err.contains("no plan matching"));
    }
}
