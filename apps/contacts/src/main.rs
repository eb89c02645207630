use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::ContactController;
use storage::Storage;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod ui;

use config::{load_settings, normalize_database_url};

#[derive(Parser, Debug)]
#[command(about = "Keep a local list of contacts")]
struct Args {
    /// SQLite URL or plain file path; overrides config and environment.
    #[arg(long)]
    database_url: Option<String>,
    /// Settings file (defaults to ./contacts.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref());
    if let Some(database_url) = args.database_url {
        settings.database_url = database_url;
    }

    let filter =
        EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open contacts database; verify the path and its permissions"
        );
        error
    })?;
    info!(%database_url, "contacts database ready");

    let controller = ContactController::new(Arc::new(storage));
    ui::shell::run(
        controller,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    )
    .await
}
