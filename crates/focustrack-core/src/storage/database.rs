//! SQLite-based storage for tasks and focus intervals.
//!
//! Two tables, one-to-many by `task_id`, no foreign-key cascade on delete:
//! intervals referencing a deleted task remain and keep contributing to
//! statistics.
//!
//! Timestamps are stored as RFC 3339 UTC strings with exactly six fractional
//! digits and a `Z` suffix. The fixed format makes stored text compare
//! lexicographically in chronological order, so expiry checks run as plain
//! string comparisons in SQL.
//!
//! The connection is the single serialization point: every read-modify-write
//! sequence (create/update/delete, and the lifecycle operations driving this
//! store) runs inside one SQLite transaction on it. `Connection` is not
//! `Sync`; callers that share a `Database` across threads must wrap it in a
//! mutex.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{CoreError, DatabaseError, Result};
use crate::focus::FocusInterval;
use crate::task::{
    parse_status, validate_description, validate_title, NewTask, Task, TaskPatch, TaskStatus,
};

use super::{data_dir, truncate_micros};

/// Format a timestamp for storage.
fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp back into `DateTime<Utc>`.
fn parse_ts(text: &str) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Build a Task from a `id, title, description, status` row.
fn row_to_task(row: &rusqlite::Row) -> std::result::Result<Task, rusqlite::Error> {
    let status_str: String = row.get(3)?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: parse_status(&status_str),
    })
}

/// Build a FocusInterval from a
/// `id, task_id, start_time, end_time, completed, duration_min` row.
fn row_to_interval(row: &rusqlite::Row) -> std::result::Result<FocusInterval, rusqlite::Error> {
    let start_str: String = row.get(2)?;
    let end_str: String = row.get(3)?;
    Ok(FocusInterval {
        id: row.get(0)?,
        task_id: row.get(1)?,
        start_time: parse_ts(&start_str)?,
        end_time: parse_ts(&end_str)?,
        completed: row.get(4)?,
        duration_min: row.get(5)?,
    })
}

/// SQLite database holding the task and focus-interval stores.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/focustrack/focustrack.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("focustrack.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tasks (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL DEFAULT '',
                status      TEXT NOT NULL DEFAULT 'PENDING'
            );

            CREATE TABLE IF NOT EXISTS focus_intervals (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                task_id      INTEGER NOT NULL,
                start_time   TEXT NOT NULL,
                end_time     TEXT NOT NULL,
                completed    INTEGER NOT NULL DEFAULT 0,
                duration_min INTEGER NOT NULL,
                CHECK (duration_min > 0)
            );

            -- Indexes for the active-interval lookup and the expiry sweep
            CREATE INDEX IF NOT EXISTS idx_focus_intervals_task_id ON focus_intervals(task_id);
            CREATE INDEX IF NOT EXISTS idx_focus_intervals_active ON focus_intervals(completed, end_time);",
        )?;
        Ok(())
    }

    // === Task CRUD ===

    /// Create a task, assigning the next id.
    ///
    /// Fails with `Conflict` if the title already exists (case-sensitive
    /// exact match) and with `Validation` on bad field lengths. The
    /// check-then-insert sequence runs in one transaction.
    pub fn create_task(&self, new: &NewTask) -> Result<Task> {
        validate_title(&new.title)?;
        validate_description(&new.description)?;

        let tx = self.conn.unchecked_transaction()?;
        if self.title_exists(&new.title, None)? {
            return Err(CoreError::Conflict(
                "Task with that title already exists".into(),
            ));
        }
        self.conn.execute(
            "INSERT INTO tasks (title, description, status) VALUES (?1, ?2, ?3)",
            params![new.title, new.description, new.status.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();
        tx.commit()?;

        Ok(Task {
            id,
            title: new.title.clone(),
            description: new.description.clone(),
            status: new.status,
        })
    }

    /// Fetch a task by id, failing with `NotFound` if absent.
    pub fn get_task(&self, id: i64) -> Result<Task> {
        let task = self
            .conn
            .query_row(
                "SELECT id, title, description, status FROM tasks WHERE id = ?1",
                params![id],
                row_to_task,
            )
            .optional()?;
        task.ok_or_else(|| CoreError::NotFound("Task with that ID doesn't exist".into()))
    }

    /// Whether a task with the given id exists.
    pub fn task_exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM tasks WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn title_exists(&self, title: &str, exclude_id: Option<i64>) -> Result<bool> {
        let found: Option<i64> = match exclude_id {
            Some(id) => self
                .conn
                .query_row(
                    "SELECT 1 FROM tasks WHERE title = ?1 AND id != ?2",
                    params![title, id],
                    |row| row.get(0),
                )
                .optional()?,
            None => self
                .conn
                .query_row(
                    "SELECT 1 FROM tasks WHERE title = ?1",
                    params![title],
                    |row| row.get(0),
                )
                .optional()?,
        };
        Ok(found.is_some())
    }

    /// List all tasks, or only those matching `status`, ordered by id.
    pub fn list_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        match status {
            Some(status) => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, title, description, status FROM tasks
                     WHERE status = ?1 ORDER BY id ASC",
                )?;
                let rows = stmt.query_map(params![status.as_str()], row_to_task)?;
                for row in rows {
                    tasks.push(row?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, title, description, status FROM tasks ORDER BY id ASC",
                )?;
                let rows = stmt.query_map([], row_to_task)?;
                for row in rows {
                    tasks.push(row?);
                }
            }
        }
        Ok(tasks)
    }

    /// Apply a partial update.
    ///
    /// `Some` fields overwrite (an explicit empty description clears it),
    /// `None` fields stay untouched. Fails with `NotFound` if the task is
    /// absent, `Conflict` if the new title collides with a different task,
    /// `Validation` on bad lengths. Applies fully or not at all.
    pub fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(description) = &patch.description {
            validate_description(description)?;
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut task = self.get_task(id)?;
        if let Some(title) = &patch.title {
            if self.title_exists(title, Some(id))? {
                return Err(CoreError::Conflict(
                    "Task with that title already exists".into(),
                ));
            }
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        self.conn.execute(
            "UPDATE tasks SET title = ?1, description = ?2, status = ?3 WHERE id = ?4",
            params![task.title, task.description, task.status.as_str(), id],
        )?;
        tx.commit()?;
        Ok(task)
    }

    /// Delete a task, returning the removed record.
    ///
    /// Fails with `NotFound` if absent. Intervals referencing the task are
    /// kept.
    pub fn delete_task(&self, id: i64) -> Result<Task> {
        let tx = self.conn.unchecked_transaction()?;
        let task = self.get_task(id)?;
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(task)
    }

    /// Ids of all existing tasks, ascending.
    pub fn task_ids(&self) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare("SELECT id FROM tasks ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    // === Focus intervals ===

    /// Insert a new active interval and return it.
    ///
    /// Timestamps are truncated to microsecond precision before storage so
    /// the returned record equals what a later read yields.
    pub fn insert_interval(
        &self,
        task_id: i64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        duration_min: u32,
    ) -> Result<FocusInterval> {
        let start_time = truncate_micros(start_time);
        let end_time = truncate_micros(end_time);
        self.conn.execute(
            "INSERT INTO focus_intervals (task_id, start_time, end_time, completed, duration_min)
             VALUES (?1, ?2, ?3, 0, ?4)",
            params![task_id, format_ts(start_time), format_ts(end_time), duration_min],
        )?;
        Ok(FocusInterval {
            id: self.conn.last_insert_rowid(),
            task_id,
            start_time,
            end_time,
            completed: false,
            duration_min,
        })
    }

    /// Fetch an interval by id, failing with `NotFound` if absent.
    pub fn get_interval(&self, id: i64) -> Result<FocusInterval> {
        let interval = self
            .conn
            .query_row(
                "SELECT id, task_id, start_time, end_time, completed, duration_min
                 FROM focus_intervals WHERE id = ?1",
                params![id],
                row_to_interval,
            )
            .optional()?;
        interval.ok_or_else(|| {
            CoreError::NotFound("Focus interval with that ID doesn't exist".into())
        })
    }

    /// The not-yet-completed interval for a task, if any.
    ///
    /// Authoritative only after an expiry sweep: an un-swept record may
    /// already be past its end time. At most one such row exists per task.
    pub fn uncompleted_interval(&self, task_id: i64) -> Result<Option<FocusInterval>> {
        let interval = self
            .conn
            .query_row(
                "SELECT id, task_id, start_time, end_time, completed, duration_min
                 FROM focus_intervals WHERE task_id = ?1 AND completed = 0",
                params![task_id],
                row_to_interval,
            )
            .optional()?;
        Ok(interval)
    }

    /// All intervals, ordered by id.
    pub fn list_intervals(&self) -> Result<Vec<FocusInterval>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_id, start_time, end_time, completed, duration_min
             FROM focus_intervals ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], row_to_interval)?;
        let mut intervals = Vec::new();
        for row in rows {
            intervals.push(row?);
        }
        Ok(intervals)
    }

    /// Mark every interval whose end time has passed as completed, leaving
    /// `end_time` unchanged. Idempotent. Returns the number of rows swept.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> Result<usize> {
        let swept = self.conn.execute(
            "UPDATE focus_intervals SET completed = 1
             WHERE completed = 0 AND end_time <= ?1",
            params![format_ts(truncate_micros(now))],
        )?;
        Ok(swept)
    }

    /// Mark one interval completed. `stop_time`, when supplied, overwrites
    /// `end_time` (the explicit-stop case); expiry passes `None`.
    pub fn complete_interval(&self, id: i64, stop_time: Option<DateTime<Utc>>) -> Result<()> {
        match stop_time {
            Some(stop) => {
                self.conn.execute(
                    "UPDATE focus_intervals SET completed = 1, end_time = ?1 WHERE id = ?2",
                    params![format_ts(truncate_micros(stop)), id],
                )?;
            }
            None => {
                self.conn.execute(
                    "UPDATE focus_intervals SET completed = 1 WHERE id = ?1",
                    params![id],
                )?;
            }
        }
        Ok(())
    }
}
