//! Task management commands for CLI.

use clap::Subcommand;
use focustrack_core::{Database, NewTask, Result, TaskPatch, TaskStatus};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title (3-100 characters, unique)
        title: String,
        /// Task description (up to 300 characters)
        #[arg(long, default_value = "")]
        description: String,
        /// Initial status: pending, in-progress or done
        #[arg(long, default_value = "pending")]
        status: TaskStatus,
    },
    /// List tasks
    List {
        /// Only tasks with this exact status
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Get task details
    Get {
        /// Task ID
        id: i64,
    },
    /// Update a task; only supplied fields change
    Update {
        /// Task ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description (an empty string clears it)
        #[arg(long)]
        description: Option<String>,
        /// New status
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Delete a task (its focus intervals are kept)
    Delete {
        /// Task ID
        id: i64,
    },
}

pub fn run(action: TaskAction) -> Result<()> {
    let db = Database::open()?;

    match action {
        TaskAction::Add {
            title,
            description,
            status,
        } => {
            let task = db.create_task(&NewTask {
                title,
                description,
                status,
            })?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { status } => {
            let tasks = db.list_tasks(status)?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => {
            let task = db.get_task(id)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Update {
            id,
            title,
            description,
            status,
        } => {
            let task = db.update_task(
                id,
                &TaskPatch {
                    title,
                    description,
                    status,
                },
            )?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            let task = db.delete_task(id)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
    }
    Ok(())
}
