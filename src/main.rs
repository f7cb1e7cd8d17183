use std::path::Path;

use clap::Parser;
use quotedesk::api::QuoteClient;
use quotedesk::cli::commands::Cli;
use quotedesk::cli::handlers;
use quotedesk::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let mut config = config_io::load_config(cli.config.as_deref().map(Path::new), &cwd)?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    match cli.command {
        None => {
            // No subcommand → launch TUI; stderr belongs to the terminal
            logging::init_file(&config.log)?;
            let client = QuoteClient::from_config(&config.api)?;
            log::info!("dashboard starting against {}", client.base_url());
            quotedesk::tui::run(&config, client)
        }
        Some(_) => {
            logging::init_stderr(&config.log)?;
            handlers::dispatch(cli, &config)
        }
    }
}
