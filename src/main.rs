pub mod api;
pub mod app;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod log;
pub mod model;
pub mod output;
pub mod time;
pub mod util;
pub mod view;
pub mod watch;

use anyhow::Result;
use clap::Parser;

use api::ReconClient;
use cli::{Cli, Command};
use cmd::common::OutputOptions;
use config::ClientConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    if let Err(e) = log::init_logger(&cli) {
        eprintln!("Failed to initialize logger: {:#}", e);
    }
    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::from_cli(&cli);
    let opts = OutputOptions::from_cli(&cli);
    let client = ReconClient::from_config(&config)?;
    tracing::debug!("Using recon service at {}", client.base_url());

    if opts.human() {
        app::show_banner_with_starttime(&config);
    }

    match cli.command {
        Command::Scan(args) => cmd::scan::run(args, &client, &config, &opts).await,
        Command::Watch(args) => cmd::watch::run(args, &client, &config, &opts).await,
        Command::Status(args) => cmd::status::run(args, &client, &opts).await,
        Command::Logs(args) => cmd::logs::run(args, &client, &opts).await,
        Command::Results => cmd::results::run_list(&client, &opts).await,
        Command::Report(args) => cmd::results::run_report(args, &client, &opts).await,
        Command::Dashboard => cmd::results::run_dashboard(&client, &opts).await,
        Command::Console => cmd::console::run(&client, &config).await,
    }
}
