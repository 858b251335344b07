//! Raga Wellness: raga recommendations from self-reported stress and energy.
//!
//! Entry point for the HTTP service and the one-shot CLI commands.

use anyhow::Context;
use clap::{Parser, Subcommand};
use raga_analytics::{validate_history, AnalyticsReport};
use raga_api::rest::validate_assessment;
use raga_api::ApiServer;
use raga_core::config::AppConfig;
use raga_core::{Assessment, Gender, HistoryEntry, RagaError};
use raga_rl_engine::{catalog, RecommendationEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "raga-wellness")]
#[command(about = "Raga recommendations from self-reported stress and energy")]
#[command(version)]
struct Cli {
    /// Exploration rate for cluster selection (overrides config)
    #[arg(long, global = true, env = "RAGA_WELLNESS__ENGINE__EPSILON")]
    epsilon: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Bind address (overrides config)
        #[arg(long, env = "RAGA_WELLNESS__API__HOST")]
        host: Option<String>,

        /// HTTP port (overrides config)
        #[arg(long, env = "RAGA_WELLNESS__API__HTTP_PORT")]
        http_port: Option<u16>,

        /// Node identifier (overrides config)
        #[arg(long, env = "RAGA_WELLNESS__NODE_ID")]
        node_id: Option<String>,
    },

    /// Print a single recommendation as JSON
    Recommend {
        /// Stress level, 0-5
        #[arg(short, long)]
        stress: i32,

        /// Energy level, 0-100
        #[arg(short, long)]
        energy: f64,

        /// Gender: M or F
        #[arg(short, long)]
        gender: Gender,

        /// Seed for a reproducible recommendation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the raga catalog as JSON
    Catalog,

    /// Summarise a JSON file of history entries
    Analytics {
        /// Path to a JSON array of history entries
        #[arg(long)]
        history: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raga_wellness=info,raga_api=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    if let Some(epsilon) = cli.epsilon {
        config.engine.epsilon = epsilon;
    }

    let engine = RecommendationEngine::new(&config.engine)
        .context("Failed to initialize recommendation engine")?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        http_port: None,
        node_id: None,
    }) {
        Commands::Serve {
            host,
            http_port,
            node_id,
        } => {
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = http_port {
                config.api.http_port = port;
            }
            if let Some(node_id) = node_id {
                config.node_id = node_id;
            }
            serve(config, engine).await
        }
        Commands::Recommend {
            stress,
            energy,
            gender,
            seed,
        } => {
            let assessment = Assessment {
                stress_level: stress,
                energy_level: energy,
                gender,
            };
            validate_assessment(&assessment)
                .map_err(|msg| RagaError::Validation(msg.to_string()))?;

            let result = match seed {
                Some(seed) => engine.recommend_with_rng(
                    stress,
                    energy,
                    gender,
                    &mut StdRng::seed_from_u64(seed),
                ),
                None => engine.recommend_assessment(&assessment),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Commands::Catalog => {
            println!("{}", serde_json::to_string_pretty(catalog())?);
            Ok(())
        }
        Commands::Analytics { history } => {
            let raw = std::fs::read_to_string(&history)
                .with_context(|| format!("Failed to read {}", history.display()))?;
            let entries: Vec<HistoryEntry> = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse {}", history.display()))?;
            validate_history(&entries)
                .with_context(|| format!("Rejected history in {}", history.display()))?;
            info!(entries = entries.len(), "History loaded");

            let report = AnalyticsReport::build(&entries);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig, engine: RecommendationEngine) -> anyhow::Result<()> {
    info!("Raga Wellness starting up");
    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        epsilon = engine.epsilon(),
        "Configuration loaded"
    );

    let api_server = ApiServer::new(config, Arc::new(engine));

    if let Err(e) = api_server.start_metrics() {
        tracing::error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Raga Wellness is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
