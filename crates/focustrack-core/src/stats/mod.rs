//! Completed-interval statistics.
//!
//! The report counts completed focus intervals per task and sums their
//! elapsed time in whole seconds. Every existing task appears, those with
//! zero completions included; intervals whose task was deleted still
//! contribute under their orphaned task id (they are simply not pre-seeded
//! at zero).

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::focus::FocusInterval;
use crate::storage::{now_micros, Database};

use chrono::{DateTime, Utc};

/// Aggregate focus statistics.
///
/// Serializes to the flat wire object `{"<task_id>": <count>, ...,
/// "total_time": <seconds>}`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FocusStats {
    /// Completed interval count per task id.
    #[serde(flatten)]
    pub completed_per_task: BTreeMap<i64, u64>,
    /// Total completed focus time in whole seconds.
    pub total_time: u64,
}

/// Collect statistics as of the current wall clock.
pub fn collect(db: &Database) -> Result<FocusStats> {
    collect_at(db, now_micros())
}

/// Collect statistics as observed at `now`.
///
/// Runs the expiry sweep first so intervals past their end time count as
/// completed, then aggregates inside the same transaction snapshot.
pub fn collect_at(db: &Database, now: DateTime<Utc>) -> Result<FocusStats> {
    let tx = db.conn().unchecked_transaction()?;
    db.sweep_expired_at(now)?;
    let task_ids = db.task_ids()?;
    let intervals = db.list_intervals()?;
    tx.commit()?;
    Ok(summarize(&task_ids, &intervals))
}

/// Aggregate completed intervals over the given task id universe.
///
/// Elapsed time per interval is the floor of the exact fractional-second
/// difference; it never rounds up and never goes negative.
pub fn summarize(task_ids: &[i64], intervals: &[FocusInterval]) -> FocusStats {
    let mut stats = FocusStats::default();
    for &task_id in task_ids {
        stats.completed_per_task.insert(task_id, 0);
    }
    for interval in intervals {
        if !interval.completed {
            continue;
        }
        *stats.completed_per_task.entry(interval.task_id).or_insert(0) += 1;
        stats.total_time += interval.elapsed_secs();
    }
    stats
}
