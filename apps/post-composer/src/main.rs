//! # Stoke List Post Composer
//!
//! Command-line front end for composing, previewing and submitting posts.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod telemetry;

use cli::{Cli, Cmd};
use config::AppConfig;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::debug!(zone = %config.zone, "Configuration loaded");

    match cli.cmd {
        Cmd::Project { post } => commands::project_post(&config, &post),
        Cmd::Preview { form, edit } => commands::preview(&config, &form, edit.as_deref()),
        Cmd::Submit {
            form,
            edit,
            dry_run,
        } => commands::submit(&config, &form, edit, dry_run).await,
    }
}
