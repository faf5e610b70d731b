//! Delivery Simulator CLI
//!
//! Runs simulations against a JSON dataset, lists recorded runs and converts
//! CSV seed files into a dataset.
//!
//! Results go to stdout as JSON; logs go to stderr and are filtered with
//! `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use delivery_simulator_core_rs::datasource::csv;
use delivery_simulator_core_rs::{
    BusinessRules, Dataset, HistoryStore, SimulationRequest, SimulationService,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "delivery-sim")]
#[command(about = "Greedy delivery allocation simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and record it
    Run {
        /// Dataset JSON with drivers, routes and orders
        #[arg(long)]
        data: PathBuf,

        /// Number of drivers to dispatch, taken from the head of the roster
        #[arg(long, allow_negative_numbers = true)]
        drivers: i64,

        /// Hour cap per driver
        #[arg(long, allow_negative_numbers = true)]
        max_hours: f64,

        /// Nominal route start time (HH:MM), recorded with the run
        #[arg(long)]
        start_time: String,

        /// History file to append the run to (created if missing)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Rule overrides as JSON; absent fields keep their defaults
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Include the per-order delivery ledger in the output
        #[arg(long)]
        ledger: bool,
    },

    /// List recorded runs, newest first
    History {
        /// History file to read
        #[arg(long)]
        history: PathBuf,
    },

    /// Convert drivers/routes/orders CSV seed files into a dataset JSON
    ImportCsv {
        #[arg(long)]
        drivers: PathBuf,

        #[arg(long)]
        routes: PathBuf,

        #[arg(long)]
        orders: PathBuf,

        /// Where to write the dataset
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            drivers,
            max_hours,
            start_time,
            history,
            rules,
            ledger,
        } => {
            let dataset = Dataset::from_json_file(&data)
                .with_context(|| format!("loading dataset {}", data.display()))?;
            let rules = match rules {
                Some(path) => load_rules(&path)?,
                None => BusinessRules::default(),
            };
            let existing = match &history {
                Some(path) => HistoryStore::load_from_file(path)
                    .with_context(|| format!("loading history {}", path.display()))?,
                None => HistoryStore::new(),
            };

            let mut service = SimulationService::new(dataset, rules).with_history(existing);
            let request = SimulationRequest::new(drivers, &start_time, max_hours);
            let report = service.run(&request)?;

            if let Some(path) = &history {
                service
                    .history()
                    .save_to_file(path)
                    .with_context(|| format!("saving history {}", path.display()))?;
                info!(path = %path.display(), runs = service.history().len(), "history saved");
            }

            let mut output = json!({
                "simulationId": report.simulation_id,
                "summary": report.summary,
                "droppedOrders": report.outcome.dropped_orders.len(),
            });
            if ledger {
                output["deliveries"] = serde_json::to_value(&report.outcome.deliveries)?;
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::History { history } => {
            let store = HistoryStore::load_from_file(&history)
                .with_context(|| format!("loading history {}", history.display()))?;

            let runs: Vec<_> = store
                .recent_first()
                .map(|run| {
                    json!({
                        "id": run.id(),
                        "createdAt": run.created_at(),
                        "parameters": run.parameters(),
                        "summary": run.summary(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&runs)?);
        }

        Commands::ImportCsv {
            drivers,
            routes,
            orders,
            out,
        } => {
            let dataset = csv::import_files(&drivers, &routes, &orders)?;
            dataset
                .write_json_file(&out)
                .with_context(|| format!("writing dataset {}", out.display()))?;
            info!(
                path = %out.display(),
                drivers = dataset.drivers.len(),
                routes = dataset.routes.len(),
                orders = dataset.orders.len(),
                "dataset written"
            );
        }
    }

    Ok(())
}

fn load_rules(path: &Path) -> Result<BusinessRules> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading rules {}", path.display()))?;
    let rules: BusinessRules = serde_json::from_str(&json)
        .with_context(|| format!("parsing rules {}", path.display()))?;
    rules
        .validate()
        .with_context(|| format!("validating rules {}", path.display()))?;
    Ok(rules)
}
