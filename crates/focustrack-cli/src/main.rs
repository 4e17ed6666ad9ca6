use clap::{Parser, Subcommand};
use focustrack_core::CoreError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "focustrack", version, about = "Focustrack CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Focus interval control
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Completed-interval statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Exit codes per error kind: validation 2, not-found 3, conflict 4.
fn exit_code(err: &CoreError) -> i32 {
    match err {
        CoreError::Validation(_) => 2,
        CoreError::NotFound(_) => 3,
        CoreError::Conflict(_) => 4,
        _ => 1,
    }
}

fn main() {
    // Tracing is opt-in via RUST_LOG; logs go to stderr so JSON output on
    // stdout stays parseable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Focus { action } => commands::focus::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(exit_code(&e));
    }
}
