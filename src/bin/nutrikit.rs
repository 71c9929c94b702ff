//! Nutrikit CLI - developer harness for the nutrition engine
//!
//! Commands:
//! - onboard: Create a user from an onboarding request
//! - switch: Switch a user's goal strategy
//! - sync: Ingest a health-sample batch
//! - log: Append a diary entry
//! - dashboard: Print the dashboard summary for a day
//! - recommend: Rank recipes against the day's remaining gap
//! - achievements: Print streak, level, and badges
//! - doctor: Diagnose state file and configuration
//!
//! Engine state lives in a JSON file loaded before and saved after every
//! mutating command.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use nutrikit::api::{HealthSyncRequest, OnboardingRequest, StrategySwitchRequest};
use nutrikit::types::DiaryEntry;
use nutrikit::{EngineError, MemoryStore, NutritionEngine, ENGINE_VERSION};

/// Nutrikit - deterministic nutrition target and recommendation engine
#[derive(Parser)]
#[command(name = "nutrikit")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Compute nutrition targets, recommendations, and achievements", long_about = None)]
struct Cli {
    /// Engine state file (created if missing)
    #[arg(long, default_value = "nutrikit-state.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user from an onboarding request (JSON file, - for stdin)
    Onboard {
        /// Request file path
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Switch a user's goal strategy
    Switch {
        #[arg(long)]
        user: Uuid,

        /// Request file path (JSON, - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Ingest a batch of health samples
    Sync {
        #[arg(long)]
        user: Uuid,

        /// Request file path (JSON, - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Append a diary entry
    Log {
        #[arg(long)]
        user: Uuid,

        /// Entry file path (JSON, - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the dashboard summary
    Dashboard {
        #[arg(long)]
        user: Uuid,

        /// Day to summarize (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Rank recipes against the remaining nutrient gap
    Recommend {
        #[arg(long)]
        user: Uuid,

        /// Day to evaluate (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print streak, level, and badge progress
    Achievements {
        #[arg(long)]
        user: Uuid,
    },

    /// Diagnose state file and configuration
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Engine(#[from] EngineError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn run(cli: Cli) -> Result<(), CliError> {
    let store = load_store(&cli.state)?;
    let mut engine = NutritionEngine::new(store);

    match cli.command {
        Commands::Onboard { input } => {
            let request: OnboardingRequest = read_json(&input)?;
            let response = engine.onboard(&request)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            save_store(&cli.state, engine)?;
        }

        Commands::Switch { user, input } => {
            let request: StrategySwitchRequest = read_json(&input)?;
            let config = engine.switch_strategy(user, &request)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            save_store(&cli.state, engine)?;
        }

        Commands::Sync { user, input } => {
            let request: HealthSyncRequest = read_json(&input)?;
            let response = engine.sync_health(user, &request)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            save_store(&cli.state, engine)?;
        }

        Commands::Log { user, input } => {
            let entry: DiaryEntry = read_json(&input)?;
            engine.log_diary(user, entry)?;
            save_store(&cli.state, engine)?;
        }

        Commands::Dashboard { user, date } => {
            let summary = engine.dashboard_summary(user, date)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Recommend { user, date } => {
            let recommendation = engine.recommend_recipes(user, date)?;
            println!("{}", serde_json::to_string_pretty(&recommendation)?);
        }

        Commands::Achievements { user } => {
            let response = engine.achievements(user)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Doctor { json } => cmd_doctor(&cli.state, json)?,
    }

    Ok(())
}

fn load_store(path: &Path) -> Result<MemoryStore, CliError> {
    if path.exists() {
        let json = fs::read_to_string(path)?;
        Ok(MemoryStore::from_json(&json)?)
    } else {
        Ok(MemoryStore::new())
    }
}

fn save_store(path: &Path, engine: NutritionEngine<MemoryStore>) -> Result<(), CliError> {
    let json = engine.into_store().to_json()?;
    fs::write(path, json)?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let data = if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&data)?)
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    ok: bool,
    message: String,
}

fn cmd_doctor(state: &Path, json: bool) -> Result<(), CliError> {
    let mut checks = vec![DoctorCheck {
        name: "engine_version".to_string(),
        ok: true,
        message: format!("nutrikit {ENGINE_VERSION}"),
    }];

    if state.exists() {
        match fs::read_to_string(state).map_err(CliError::from).and_then(|json| {
            MemoryStore::from_json(&json).map_err(CliError::from)
        }) {
            Ok(_) => checks.push(DoctorCheck {
                name: "state_file".to_string(),
                ok: true,
                message: format!("{} is valid engine state", state.display()),
            }),
            Err(e) => checks.push(DoctorCheck {
                name: "state_file".to_string(),
                ok: false,
                message: format!("cannot load {}: {e}", state.display()),
            }),
        }
    } else {
        checks.push(DoctorCheck {
            name: "state_file".to_string(),
            ok: true,
            message: format!("{} does not exist yet (will be created)", state.display()),
        });
    }

    checks.push(DoctorCheck {
        name: "stdin".to_string(),
        ok: true,
        message: if atty::is(atty::Stream::Stdin) {
            "stdin is a TTY (interactive mode)".to_string()
        } else {
            "stdin is a pipe".to_string()
        },
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
    } else {
        println!("Nutrikit Doctor Report");
        println!("======================");
        for check in &checks {
            let icon = if check.ok { "[OK]" } else { "[ERR]" };
            println!("  {} {}: {}", icon, check.name, check.message);
        }
    }

    if checks.iter().all(|c| c.ok) {
        Ok(())
    } else {
        Err(CliError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            "one or more checks failed",
        )))
    }
}
