// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use abcall_analitica::{AppState, Config, ProxyError, Query, server, utils::logging};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "abcall_analitica")]
#[command(version = "0.1.0")]
#[command(about = "Search and chat proxy for the ABCall issue analytics frontend", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one query against the search upstream and print the records
    Search {
        /// Search query text
        query: String,
    },

    /// Ask the chat upstream a single question
    Ask {
        /// Question text
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(config, host, port).await?;
        }
        Commands::Search { query } => {
            cmd_search(&config, query).await?;
        }
        Commands::Ask { query } => {
            cmd_ask(&config, query).await?;
        }
    }

    Ok(())
}

async fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate().context("Invalid server settings")?;

    info!(
        "Starting proxy (credentials environment: {})",
        config.credentials.environment
    );
    server::serve(&config).await.context("Server failed")?;
    Ok(())
}

async fn cmd_search(config: &Config, query: String) -> Result<()> {
    let state = AppState::from_config(config);

    let records = state
        .search
        .search(&Query::new(query))
        .await
        .map_err(search_failure)?;

    println!("{}", logging::format_success(&format!("{} results", records.len())));
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Keeps the HTTP status the endpoint would have answered with.
fn search_failure(err: ProxyError) -> anyhow::Error {
    anyhow::anyhow!("search failed [{}]: {}", err.status_code(), err.detail())
}

async fn cmd_ask(config: &Config, query: String) -> Result<()> {
    let state = AppState::from_config(config);

    println!("{}", logging::format_info(&format!("Asking {}", config.chat.model)));
    let reply = state.chat.generate(&Query::new(query)).await?;
    println!("{}", reply.response);
    Ok(())
}
