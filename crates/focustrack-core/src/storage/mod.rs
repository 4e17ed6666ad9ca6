pub mod config;
pub mod database;

pub use config::Config;
pub use database::Database;

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Returns `~/.config/focustrack[-dev]/` based on FOCUSTRACK_ENV.
///
/// Set FOCUSTRACK_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSTRACK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focustrack-dev")
    } else {
        base_dir.join("focustrack")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Current instant truncated to microsecond precision.
///
/// All persisted timestamps carry exactly microsecond precision, so values
/// handed to callers must already be truncated to round-trip bit-exact.
pub(crate) fn now_micros() -> DateTime<Utc> {
    truncate_micros(Utc::now())
}

/// Drop sub-microsecond components from a timestamp.
pub(crate) fn truncate_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(ts.timestamp_micros()).unwrap_or(ts)
}
