//! CLI argument parsing for the tradeflow-worker binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tradeflow-worker", about = "Tradeflow back-office import worker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import companies from a CSV file and print the reconciliation report
    ImportCompanies {
        /// Path to the uploaded CSV file (deleted after processing)
        file: PathBuf,
    },
    /// Import proforma invoices from a CSV file and print the created count
    ImportPi {
        /// Path to the uploaded CSV file (deleted after processing)
        file: PathBuf,
    },
    /// Run database migrations and exit
    Migrate,
}
