//! Zenkai Gains client - command-line entry point.
//!
//! Loads settings, starts the page controller, feeds it the commands for
//! the requested subcommand and prints every update it emits.

mod cli;
mod render;

use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use zenkai_application::ApiClient;
use zenkai_infrastructure::{ReqwestApiClient, SettingsRepository, SystemClock};
use zenkai_ui::Controller;

use crate::cli::{Cli, Command, run_config};
use crate::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = SettingsRepository::new();
    let mut config = settings.load_with_env().await?;
    cli.apply(&mut config);
    if let Command::Config(command) = cli.command {
        println!("{}", run_config(command, &settings, &config).await?);
        return Ok(());
    }
    info!(
        api_url = %config.api_url,
        "starting Zenkai client v{}",
        env!("CARGO_PKG_VERSION")
    );

    let script = cli.script().await?;
    let client: Arc<dyn ApiClient> = Arc::new(ReqwestApiClient::from_config(&config)?);

    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

    let printer = tokio::spawn(async move {
        while let Some(update) = update_rx.recv().await {
            if let Some(text) = render(&update) {
                println!("{text}");
            }
        }
    });

    let clock = Arc::new(SystemClock::new());
    let controller = Controller::start(client, clock, &config, update_tx).await;
    for command in script {
        cmd_tx.send(command)?;
    }
    drop(cmd_tx);
    controller.run(cmd_rx).await;

    printer.await?;
    Ok(())
}
