//! Tradeflow Worker - Backend import service for the trade back-office
//!
//! Runs the bulk CSV import pipelines (companies, proforma invoices)
//! against PostgreSQL. The HTTP API layer uploads files and invokes this
//! worker; routing and authentication live there, not here.

mod cli;
mod config;
mod db;
mod services;
mod types;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ../logs
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "../logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "worker.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - both stdout and file
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tradeflow_worker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    let args = cli::Cli::parse();

    let config = config::Config::from_env()?;
    info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url).await?;
    info!("Connected to PostgreSQL");

    db::run_migrations(&pool).await?;

    match args.command {
        cli::Command::Migrate => {}
        cli::Command::ImportCompanies { file } => {
            info!("Importing companies from {}", file.display());
            let report = services::company_import::import_companies_from_csv(&pool, &file).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        cli::Command::ImportPi { file } => {
            info!("Importing proforma invoices from {}", file.display());
            let count = services::pi_import::import_pis_from_csv(&pool, &file).await?;
            println!("{count}");
        }
    }

    Ok(())
}
