//! # BlogSuite Command Line
//!
//! Runs the blog pipeline (or a single phase) from the terminal and prints
//! the result as JSON.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing::{error, info};

use blogsuite_core::agent::ExecutionContext;
use blogsuite_core::agents::agent_keys;
use blogsuite_core::config::ConfigManager;
use blogsuite_core::constants::{context_keys, system};
use blogsuite_core::logging::init_structured_logging;
use blogsuite_core::orchestration::{Phase, PhaseOrchestrator};

#[derive(Parser)]
#[command(name = "blogsuite")]
#[command(about = "Run the multi-agent blog creation pipeline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file (default: config/blogsuite.toml plus environment overlay)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline, or one phase with --phase
    Run {
        /// Blog topic
        #[arg(short, long)]
        topic: String,

        /// Run only this phase (display name or snake_case key)
        #[arg(short, long)]
        phase: Option<String>,

        /// Extra input values, `key=value`; values parse as JSON when they can
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Pretty-print the JSON result
        #[arg(long)]
        pretty: bool,
    },

    /// List phases with their agent counts
    Phases,

    /// Load and validate configuration, then print it
    ValidateConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "blogsuite failed");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let manager = load_config(cli.config.as_deref())?;
    init_structured_logging(&manager.config().logging);

    info!(
        environment = %manager.environment(),
        version = system::BLOGSUITE_CORE_VERSION,
        "blogsuite starting"
    );

    match cli.command {
        Commands::Run {
            topic,
            phase,
            set,
            pretty,
        } => {
            let orchestrator = PhaseOrchestrator::from_config(manager.config())?;
            let input = build_input(&topic, &set)?;

            let output = match phase {
                Some(name) => {
                    let outcome = orchestrator.run_phase_named(&name, &input).await;
                    serde_json::to_value(&outcome)?
                }
                None => {
                    let result = orchestrator.create_full_blog(input).await;
                    serde_json::to_value(&result)?
                }
            };

            print_json(&output, pretty)?;
        }
        Commands::Phases => {
            for phase in Phase::ALL {
                println!("{:<40} {:>3} agents", phase.display_name(), agent_keys(phase).len());
            }
        }
        Commands::ValidateConfig => {
            println!("Configuration valid (environment: {})", manager.environment());
            print_json(&serde_json::to_value(manager.config())?, true)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Arc<ConfigManager>> {
    let manager = match path {
        Some(path) => ConfigManager::load_from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ConfigManager::load().context("loading configuration")?,
    };
    Ok(manager)
}

fn build_input(topic: &str, assignments: &[String]) -> anyhow::Result<ExecutionContext> {
    let mut values = Map::new();
    values.insert(context_keys::TOPIC.to_string(), Value::String(topic.to_string()));

    for assignment in assignments {
        let Some((key, raw)) = assignment.split_once('=') else {
            bail!("invalid --set value '{assignment}', expected KEY=VALUE");
        };
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        values.insert(key.trim().to_string(), value);
    }

    Ok(ExecutionContext::new(values))
}

fn print_json(value: &Value, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
