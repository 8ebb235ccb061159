//! Plan archive: save, load, list, and look up plans by request.

use jiff::Timestamp;
use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Direction, PlanRequest, RecoveryPlan};

use super::{Result, Storage, StorageError};

/// zstd level for plan bodies. Plans are small and mostly repeated keys.
const COMPRESSION_LEVEL: i32 = 3;

/// A saved plan together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedPlan {
    pub id: Uuid,

    /// [`PlanRequest::fingerprint`] of `request`.
    pub fingerprint: String,
    pub request: PlanRequest,
    pub plan: RecoveryPlan,
    pub saved_at: Timestamp,
}

impl ArchivedPlan {
    /// Wrap a freshly generated plan for saving.
    pub fn new(request: PlanRequest, plan: RecoveryPlan) -> Self {
        Self {
            id: Uuid::new_v4(),
            fingerprint: request.fingerprint(),
            request,
            plan,
            saved_at: Timestamp::now(),
        }
    }
}

/// Listing row: enough to pick a plan without decompressing it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    pub id: Uuid,
    pub fingerprint: String,
    pub origin_timezone: String,
    pub destination_timezone: String,
    pub departure: Timestamp,
    pub direction: Direction,
    pub shift_hours: f64,
    pub recovery_days: u32,
    pub saved_at: Timestamp,
}

impl Storage {
    /// Saves a plan. Fails if a plan with the same id is already archived.
    pub fn save_plan(&self, archived: &ArchivedPlan) -> Result<()> {
        let conn = self.open_db()?;
        let request = serde_json::to_string(&archived.request)?;
        let body = zstd::encode_all(
            serde_json::to_vec(&archived.plan)?.as_slice(),
            COMPRESSION_LEVEL,
        )?;
        let plan = &archived.plan;

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO plan
             (id, fingerprint, origin, destination, departure, direction,
              shift_hours, days, saved_at, request, body)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                archived.id.to_string(),
                &archived.fingerprint,
                &plan.origin_timezone,
                &plan.destination_timezone,
                archived.request.departure.to_string(),
                plan.direction.to_string(),
                plan.shift.shift_hours,
                plan.estimated_recovery_days,
                archived.saved_at.to_string(),
                request,
                body,
            ],
        )?;
        if inserted == 0 {
            return Err(StorageError::PlanAlreadyExists(archived.id));
        }
        tracing::debug!(id = %archived.id, "saved plan");
        Ok(())
    }

    /// Loads a single saved plan.
    pub fn load_plan(&self, id: Uuid) -> Result<ArchivedPlan> {
        let conn = self.open_db()?;
        load_plan_row(&conn, id)?.ok_or(StorageError::PlanNotFound(id))
    }

    /// The most recently saved plan for a request fingerprint, if any.
    pub fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<ArchivedPlan>> {
        let conn = self.open_db()?;
        let mut stmt = conn.prepare("SELECT id, saved_at FROM plan WHERE fingerprint = ?1")?;
        let rows = stmt.query_map([fingerprint], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut newest: Option<(Timestamp, Uuid)> = None;
        for row in rows {
            let (id, saved_at) = row?;
            let candidate = (parse_timestamp("saved_at", &saved_at)?, parse_id(&id)?);
            if newest.is_none_or(|n| candidate > n) {
                newest = Some(candidate);
            }
        }

        match newest {
            Some((_, id)) => load_plan_row(&conn, id),
            None => Ok(None),
        }
    }

    /// Lists all saved plans, oldest first.
    pub fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        let conn = self.open_db()?;
        let mut stmt = conn.prepare(
            "SELECT id, fingerprint, origin, destination, departure, direction,
                    shift_hours, days, saved_at
             FROM plan",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, f64>(6)?,
                row.get::<_, u32>(7)?,
                row.get::<_, String>(8)?,
            ))
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            let (id, fingerprint, origin, destination, departure, direction, shift_hours, days, saved_at) =
                row?;
            summaries.push(PlanSummary {
                id: parse_id(&id)?,
                fingerprint,
                origin_timezone: origin,
                destination_timezone: destination,
                departure: parse_timestamp("departure", &departure)?,
                direction: parse_direction(&direction)?,
                shift_hours,
                recovery_days: days,
                saved_at: parse_timestamp("saved_at", &saved_at)?,
            });
        }
        summaries.sort_by(|a, b| a.saved_at.cmp(&b.saved_at).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }
}

/// Reads and decompresses the plan row with the given id.
fn load_plan_row(conn: &Connection, id: Uuid) -> Result<Option<ArchivedPlan>> {
    let row = conn
        .query_row(
            "SELECT id, fingerprint, saved_at, request, body FROM plan WHERE id = ?1",
            [id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Vec<u8>>(4)?,
                ))
            },
        )
        .optional()?;
    let Some((id, fingerprint, saved_at, request, body)) = row else {
        return Ok(None);
    };

    let json = zstd::decode_all(body.as_slice())
        .map_err(|e| StorageError::Corrupt(format!("undecodable plan body: {e}")))?;

    Ok(Some(ArchivedPlan {
        id: parse_id(&id)?,
        fingerprint,
        request: serde_json::from_str(&request)?,
        plan: serde_json::from_slice(&json)?,
        saved_at: parse_timestamp("saved_at", &saved_at)?,
    }))
}

fn parse_id(s: &str) -> Result<Uuid> {
    s.parse()
        .map_err(|e| StorageError::Corrupt(format!("invalid plan id: {e}")))
}

fn parse_timestamp(column: &str, s: &str) -> Result<Timestamp> {
    s.parse()
        .map_err(|e| StorageError::Corrupt(format!("invalid {column}: {e}")))
}

fn parse_direction(s: &str) -> Result<Direction> {
    match s {
        "east" => Ok(Direction::East),
        "west" => Ok(Direction::West),
        "none" => Ok(Direction::None),
        other => Err(StorageError::Corrupt(format!("unknown direction: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::{RecoveryMode, SleepPreferences};

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("jetlag")).unwrap();
        (dir, storage)
    }

    fn sample_request() -> PlanRequest {
        PlanRequest {
            origin_timezone: "Europe/London".into(),
            destination_timezone: "America/New_York".into(),
            departure: "2024-06-01T09:00:00Z".parse().unwrap(),
            arrival: "2024-06-01T17:00:00Z".parse().unwrap(),
            flight_duration_hours: 8.0,
            sleep: SleepPreferences::default(),
            recovery_mode: RecoveryMode::Conservative,
        }
    }

    fn sample_plan(request: &PlanRequest) -> ArchivedPlan {
        let plan = crate::plan::generate_at(request, "2024-05-20T12:00:00Z".parse().unwrap())
            .unwrap()
            .plan;
        ArchivedPlan::new(request.clone(), plan)
    }

    #[test]
    fn save_and_load_plan() {
        let (_dir, storage) = test_storage();
        let archived = sample_plan(&sample_request());

        storage.save_plan(&archived).unwrap();
        let loaded = storage.load_plan(archived.id).unwrap();

        assert_eq!(loaded, archived);
    }

    #[test]
    fn save_duplicate_plan_fails() {
        let (_dir, storage) = test_storage();
        let archived = sample_plan(&sample_request());

        storage.save_plan(&archived).unwrap();
        let err = storage.save_plan(&archived).unwrap_err();

        assert!(matches!(err, StorageError::PlanAlreadyExists(_)));
    }

    #[test]
    fn load_nonexistent_plan_fails() {
        let (_dir, storage) = test_storage();
        let err = storage.load_plan(Uuid::new_v4()).unwrap_err();

        assert!(matches!(err, StorageError::PlanNotFound(_)));
    }

    #[test]
    fn list_plans_empty() {
        let (_dir, storage) = test_storage();
        assert!(storage.list_plans().unwrap().is_empty());
    }

    #[test]
    fn list_plans_returns_all_sorted_by_saved_at() {
        let (_dir, storage) = test_storage();
        let request = sample_request();

        let mut first = sample_plan(&request);
        first.saved_at = Timestamp::new(1_000_000_000, 0).unwrap();
        let mut second = sample_plan(&request);
        second.saved_at = Timestamp::new(2_000_000_000, 0).unwrap();

        // Save in reverse order to verify sorting.
        storage.save_plan(&second).unwrap();
        storage.save_plan(&first).unwrap();

        let summaries = storage.list_plans().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, first.id);
        assert_eq!(summaries[1].id, second.id);
        assert_eq!(summaries[0].direction, Direction::West);
        assert_eq!(summaries[0].recovery_days, 3);
        assert_eq!(summaries[0].destination_timezone, "America/New_York");
    }

    #[test]
    fn find_by_fingerprint_returns_newest() {
        let (_dir, storage) = test_storage();
        let request = sample_request();

        let mut old = sample_plan(&request);
        old.saved_at = Timestamp::new(1_000_000_000, 0).unwrap();
        let mut new = sample_plan(&request);
        new.saved_at = Timestamp::new(2_000_000_000, 0).unwrap();
        storage.save_plan(&old).unwrap();
        storage.save_plan(&new).unwrap();

        let found = storage
            .find_by_fingerprint(&request.fingerprint())
            .unwrap()
            .unwrap();
        assert_eq!(found.id, new.id);
    }

    #[test]
    fn find_by_unknown_fingerprint_is_none() {
        let (_dir, storage) = test_storage();
        storage.save_plan(&sample_plan(&sample_request())).unwrap();

        let mut other = sample_request();
        other.recovery_mode = RecoveryMode::Aggressive;
        assert!(
            storage
                .find_by_fingerprint(&other.fingerprint())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn corrupt_body_is_reported() {
        let (_dir, storage) = test_storage();
        let archived = sample_plan(&sample_request());
        storage.save_plan(&archived).unwrap();

        let conn = storage.open_db().unwrap();
        conn.execute("UPDATE plan SET body = x'00010203'", []).unwrap();

        let err = storage.load_plan(archived.id).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn saves_within_one_second_order_by_time() {
        let (_dir, storage) = test_storage();
        let request = sample_request();

        // Fractions print without trailing zeros, so ".1" sorts after ".12"
        // as text even though it is earlier.
        let mut older = sample_plan(&request);
        older.saved_at = "2024-06-01T12:00:40.1Z".parse().unwrap();
        let mut newer = sample_plan(&request);
        newer.saved_at = "2024-06-01T12:00:40.12Z".parse().unwrap();
        storage.save_plan(&older).unwrap();
        storage.save_plan(&newer).unwrap();

        let found = storage
            .find_by_fingerprint(&request.fingerprint())
            .unwrap()
            .unwrap();
        assert_eq!(found.id, newer.id);

        let ids: Vec<Uuid> = storage.list_plans().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![older.id, newer.id]);
    }
}
