#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the housing map dashboard.
//!
//! ```text
//! housing_map serve [--bind 127.0.0.1] [--port 8080] [--interactive]
//! housing_map view [--state California] [--city Fresno] [--date 2024-01-01] [--json]
//! housing_map map [--date 2024-01-01] [--out map.json]
//! housing_map interactive
//! ```
//!
//! Running with no subcommand enters interactive mode. Every command runs
//! a full dashboard cycle: the data files are read and the state
//! boundaries fetched before anything is rendered.
//!
//! Uses `indicatif-log-bridge` (via [`housing_map_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and spinners never fight for the terminal.

mod interactive;
mod report;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use housing_map_cli_utils::{MultiProgress, Spinner};
use housing_map_dashboard::config::{CONFIG_ENV_VAR, load_config};
use housing_map_dashboard::{Dataset, DashboardError, run_cycle};
use housing_map_dashboard_models::Interaction;
use housing_map_dashboard_models::config::DashboardConfig;
use housing_map_server::{BindAddress, DEFAULT_BIND_ADDR, DEFAULT_PORT};

#[derive(Parser)]
#[command(
    name = "housing_map",
    about = "US housing days-on-market dashboard"
)]
struct Cli {
    /// TOML file merged over the built-in configuration
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind to
        #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
        bind: String,
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Prompt for the bind address and port before starting
        #[arg(long)]
        interactive: bool,
    },
    /// Print the metrics and trend for a selection
    View {
        /// State name, or "USA" for the whole country
        #[arg(long)]
        state: Option<String>,
        /// City within the state
        #[arg(long, requires = "state")]
        city: Option<String>,
        /// Date to render (YYYY-MM-DD); defaults to the most recent
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print the full view model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the map layers as JSON
    Map {
        /// Date to render (YYYY-MM-DD); defaults to the most recent
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output file; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Pick a state, city and date from menus
    Interactive,
}

/// Loads a fresh [`Dataset`] while a spinner ticks, leaving a summary
/// line behind on success.
async fn load_dataset(
    multi: &MultiProgress,
    config: &DashboardConfig,
    client: &reqwest::Client,
) -> Result<Dataset, DashboardError> {
    let spinner = Spinner::start(multi, "Loading housing data and state boundaries...");
    match Dataset::load(config, client).await {
        Ok(dataset) => {
            spinner.finish(&report::loaded_message(&dataset));
            Ok(dataset)
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = housing_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let client = reqwest::Client::new();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Serve {
            bind,
            port,
            interactive,
        } => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                let system = actix_web::rt::System::new();
                if interactive {
                    system.block_on(housing_map_server::interactive::run(config))
                } else {
                    let bind = BindAddress { host: bind, port };
                    system.block_on(housing_map_server::run_server(config, bind))
                }
            })
            .await??;
        }
        Commands::View {
            state,
            city,
            date,
            json,
        } => {
            let dataset = load_dataset(&multi, &config, &client).await?;
            let view = run_cycle(
                &dataset,
                &config,
                &Interaction::None,
                state.as_deref(),
                city.as_deref(),
                date,
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", report::format_view(&view));
            }
        }
        Commands::Map { date, out } => {
            let dataset = load_dataset(&multi, &config, &client).await?;
            let date = dataset.resolve_date(date)?;
            let map = dataset.map(&config, date)?;
            let json = serde_json::to_string_pretty(&map)?;

            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    log::info!("Wrote map for {date} to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Interactive => interactive::run(&multi, &config, &client).await?,
    }

    Ok(())
}
