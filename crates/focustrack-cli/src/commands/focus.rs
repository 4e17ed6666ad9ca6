//! Focus interval commands for CLI.

use clap::Subcommand;
use focustrack_core::{Config, Database, FocusEngine, Result};

#[derive(Subcommand)]
pub enum FocusAction {
    /// Start a focus interval for a task
    Start {
        /// Task ID
        task_id: i64,
        /// Duration in minutes; defaults to the configured value
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Stop the active focus interval for a task
    Stop {
        /// Task ID
        task_id: i64,
    },
    /// Print the active focus interval for a task as JSON
    Status {
        /// Task ID
        task_id: i64,
    },
}

pub fn run(action: FocusAction) -> Result<()> {
    let db = Database::open()?;
    let engine = FocusEngine::new(&db);

    match action {
        FocusAction::Start { task_id, duration } => {
            let duration = duration
                .unwrap_or_else(|| Config::load_or_default().focus.default_duration_min);
            let interval = engine.start(task_id, duration)?;
            println!("{}", serde_json::to_string_pretty(&interval)?);
        }
        FocusAction::Stop { task_id } => {
            let interval = engine.stop(task_id)?;
            println!("{}", serde_json::to_string_pretty(&interval)?);
        }
        FocusAction::Status { task_id } => {
            let interval = engine.active(task_id)?;
            println!("{}", serde_json::to_string_pretty(&interval)?);
        }
    }
    Ok(())
}
