//! Focus interval lifecycle engine.
//!
//! The engine drives the `ACTIVE -> COMPLETED` transition. There is no
//! background timer: expiry is computed lazily against wall-clock time at
//! the moment of each relevant read, so "active" is accurate only as of the
//! last read. Each read-modify-write sequence runs inside one SQLite
//! transaction to keep the one-active-interval-per-task invariant under
//! interleaved callers.
//!
//! Every operation has a deterministic `*_at` variant taking the
//! observation instant explicitly; the plain variant observes the current
//! wall clock.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::error::{CoreError, Result, ValidationError};
use crate::storage::{now_micros, Database};

use super::FocusInterval;

/// Lifecycle engine over an injected store.
pub struct FocusEngine<'db> {
    db: &'db Database,
}

impl<'db> FocusEngine<'db> {
    /// Create an engine over the given store.
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Start a focus interval for a task, observing the current wall clock.
    pub fn start(&self, task_id: i64, duration_min: u32) -> Result<FocusInterval> {
        self.start_at(task_id, duration_min, now_micros())
    }

    /// Start a focus interval for a task as observed at `now`.
    ///
    /// Fails with `Validation` on a zero duration, `NotFound` if the task
    /// does not exist, and `Conflict` if the task still has an active
    /// interval after expired ones are swept.
    pub fn start_at(
        &self,
        task_id: i64,
        duration_min: u32,
        now: DateTime<Utc>,
    ) -> Result<FocusInterval> {
        if duration_min == 0 {
            return Err(ValidationError::NonPositiveDuration.into());
        }

        let tx = self.db.conn().unchecked_transaction()?;
        if !self.db.task_exists(task_id)? {
            return Err(CoreError::NotFound(
                "Task with the given ID doesn't exist".into(),
            ));
        }
        let swept = self.db.sweep_expired_at(now)?;
        if swept > 0 {
            debug!(swept, "expiry sweep completed intervals");
        }
        if self.db.uncompleted_interval(task_id)?.is_some() {
            return Err(CoreError::Conflict(
                "Focus interval with the given task ID already exists".into(),
            ));
        }
        let end = now + Duration::minutes(i64::from(duration_min));
        let interval = self.db.insert_interval(task_id, now, end, duration_min)?;
        tx.commit()?;

        info!(task_id, duration_min, interval_id = interval.id, "focus interval started");
        Ok(interval)
    }

    /// Stop the active interval for a task, observing the current wall clock.
    pub fn stop(&self, task_id: i64) -> Result<FocusInterval> {
        self.stop_at(task_id, now_micros())
    }

    /// Stop the active interval for a task as observed at `now`.
    ///
    /// An interval whose end time has already passed is not stoppable: it is
    /// marked completed with its original end time and `NotFound` is
    /// returned, exactly as if the sweep had run first. Otherwise the
    /// interval completes with `end_time` overwritten by the stop instant.
    pub fn stop_at(&self, task_id: i64, now: DateTime<Utc>) -> Result<FocusInterval> {
        let tx = self.db.conn().unchecked_transaction()?;
        let interval = match self.db.uncompleted_interval(task_id)? {
            Some(interval) => interval,
            None => {
                return Err(CoreError::NotFound(
                    "Active focus interval with the given task ID doesn't exist".into(),
                ))
            }
        };
        if interval.end_time <= now {
            // Expiry wins over a stop issued too late.
            self.db.complete_interval(interval.id, None)?;
            tx.commit()?;
            debug!(task_id, interval_id = interval.id, "stop raced an expired interval");
            return Err(CoreError::NotFound(
                "Active focus interval with the given task ID doesn't exist".into(),
            ));
        }
        self.db.complete_interval(interval.id, Some(now))?;
        let stopped = self.db.get_interval(interval.id)?;
        tx.commit()?;

        info!(task_id, interval_id = stopped.id, "focus interval stopped");
        Ok(stopped)
    }

    /// The active interval for a task, if any, observing the current clock.
    pub fn active(&self, task_id: i64) -> Result<Option<FocusInterval>> {
        self.active_at(task_id, now_micros())
    }

    /// The active interval for a task as observed at `now`.
    ///
    /// Runs the expiry sweep first, so the answer is authoritative for
    /// `now`.
    pub fn active_at(&self, task_id: i64, now: DateTime<Utc>) -> Result<Option<FocusInterval>> {
        let tx = self.db.conn().unchecked_transaction()?;
        self.db.sweep_expired_at(now)?;
        let interval = self.db.uncompleted_interval(task_id)?;
        tx.commit()?;
        Ok(interval)
    }

    /// Sweep expired intervals as of the current wall clock.
    ///
    /// Returns the number of intervals transitioned to completed.
    pub fn sweep(&self) -> Result<usize> {
        self.db.sweep_expired_at(now_micros())
    }
}
