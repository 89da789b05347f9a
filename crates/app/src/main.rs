//! Umbric - headless driver for the Vexla conversation orchestrator.
//!
//! `umbric` (or `umbric chat`) runs an interactive session over stdin;
//! `umbric serve` runs the ClickHouse query proxy.

mod config;
mod driver;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use services::{ProxyServer, QueryProxy};
use shared::settings::AppSettings;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Settings file (defaults to <config dir>/umbric/settings.json)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Viewport width used to pick the layout
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Seed for the reply picker, for reproducible sessions
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat over stdin (default)
    Chat,
    /// Run the read-only ClickHouse query proxy
    Serve {
        /// Listen address (overrides `query_backend.bind_addr`)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the session; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_path = cli.config.clone().or_else(config::config_path);
    let loaded = match &settings_path {
        Some(path) => config::load_settings(path),
        None => Ok(None),
    };
    let mut settings = match &loaded {
        Ok(Some(settings)) => settings.clone(),
        _ => AppSettings::default(),
    };

    init_logging(&settings.log_level);
    if let Err(e) = &loaded {
        warn!("using default settings: {:#}", e);
    }
    settings.query_backend = settings.query_backend.with_env_overrides();

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            driver::run(settings, settings_path, (cli.width, cli.height), cli.seed).await
        }
        Command::Serve { bind } => serve(settings, bind).await,
    }
}

async fn serve(settings: AppSettings, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| settings.query_backend.bind_addr.clone());
    let proxy = QueryProxy::from_settings(&settings.query_backend)
        .context("invalid query backend settings")?;
    if !proxy.is_configured() {
        info!("set CLICKHOUSE_QUERIES_API, CLICKHOUSE_KEY_ID and CLICKHOUSE_KEY_SECRET to enable queries");
    }
    ProxyServer::bind(&bind, proxy)?.run().await
}
