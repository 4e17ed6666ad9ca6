use clap::Subcommand;
use focustrack_core::{stats, Database, Result};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Per-task completed counts plus total focus time in seconds
    Show,
}

pub fn run(action: StatsAction) -> Result<()> {
    let db = Database::open()?;

    match action {
        StatsAction::Show => {
            let report = stats::collect(&db)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
