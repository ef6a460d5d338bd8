use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "scorm")]
#[command(about = "SCORM 2004 CMI data model tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert between seconds and timeinterval strings
    Duration {
        #[command(subcommand)]
        action: DurationAction,
    },
    /// Inspect scorm.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Run a scripted session against an in-memory LMS
    Simulate {
        /// TOML fixture with the LMS's initial values
        #[arg(long)]
        fixture: Option<PathBuf>,
        /// Mark the attempt completed before committing
        #[arg(long)]
        complete: bool,
        /// Append an objective with this progress measure (0..1)
        #[arg(long)]
        objective_progress: Option<f64>,
        /// Also print the final session record as JSON
        #[arg(long)]
        record: bool,
    },
}

#[derive(Subcommand)]
enum DurationAction {
    /// Seconds to `P[n]DT[n]H[n]M[n]S`
    Encode { seconds: f64 },
    /// `P[n]DT[n]H[n]M[n]S` to seconds
    Decode { interval: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved engine config and package limit conditions
    Show {
        /// Read this file instead of the default location
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Duration { action } => match action {
            DurationAction::Encode { seconds } => commands::duration::encode(seconds)?,
            DurationAction::Decode { interval } => commands::duration::decode(&interval),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show { path } => commands::config::show(path)?,
        },
        Commands::Simulate {
            fixture,
            complete,
            objective_progress,
            record,
        } => {
            let options = commands::simulate::SimulateOptions {
                fixture,
                complete,
                objective_progress,
                print_record: record,
            };
            commands::simulate::run(options).await?
        }
    }

    Ok(())
}
