#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the housing map API server.
//!
//! Reads an optional override configuration from `HOUSING_MAP_CONFIG` and
//! listens on `BIND_ADDR`:`PORT`.

use std::path::PathBuf;

use housing_map_dashboard::config::{CONFIG_ENV_VAR, load_config};
use housing_map_server::{BindAddress, run_server};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    run_server(config, BindAddress::from_env()).await?;

    Ok(())
}
