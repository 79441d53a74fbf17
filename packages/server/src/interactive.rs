//! Interactive mode for the server.
//!
//! Prompts the user for bind address and port before starting the server.

use dialoguer::{Confirm, Input};
use housing_map_dashboard_models::config::DashboardConfig;

use crate::BindAddress;

/// Runs the server in interactive mode, prompting for the bind address.
///
/// The environment (`BIND_ADDR`, `PORT`) supplies the defaults shown in
/// the prompts.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(config: DashboardConfig) -> std::io::Result<()> {
    println!("Housing Map Server");
    println!();

    let defaults = BindAddress::from_env();

    let host: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.host.clone())
        .interact_text()
        .unwrap_or(defaults.host);

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    if !Confirm::new()
        .with_prompt(format!("Start server on {host}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config, BindAddress { host, port }).await
}
