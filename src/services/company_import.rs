//! Company CSV import pipeline
//!
//! Streams company rows, maps each valid row to one insert candidate (rows
//! missing name or GST number are skipped silently), bulk-inserts the batch
//! with continue-on-error semantics and reconciles the outcome into a
//! partial-success report. Duplicates within the batch are NOT deduplicated
//! client-side - the store's GST uniqueness constraint is the sole
//! mechanism.

use std::path::Path;

use anyhow::Result;
use futures::StreamExt;
use tracing::info;

use crate::services::{bulk, cleanup, csv_source};
use crate::services::bulk::BulkSink;
use crate::types::{CompanyRecord, CompanyRow, ImportReport};

/// Import companies from a CSV file. The source file is deleted after any
/// terminal state, including hard failure.
pub async fn import_companies_from_csv<S>(store: &S, path: &Path) -> Result<ImportReport>
where
    S: BulkSink<CompanyRecord>,
{
    let result = run(store, path).await;
    cleanup::reap_source(path).await;
    result
}

async fn run<S>(store: &S, path: &Path) -> Result<ImportReport>
where
    S: BulkSink<CompanyRecord>,
{
    let mut rows = csv_source::open_rows::<CompanyRow>(path).await?;

    let mut candidates = Vec::new();
    while let Some(row) = rows.next().await {
        if let Some(record) = CompanyRecord::from_row(row?) {
            candidates.push(record);
        }
    }

    if candidates.is_empty() {
        return Ok(ImportReport::empty_source("No valid companies found in CSV."));
    }

    let outcome = bulk::insert_unordered(store, &candidates).await?;
    let report = ImportReport::reconcile(outcome, "companies");

    info!(
        "Company import: {} inserted, {} rejected",
        report.inserted_count, report.error_count
    );

    Ok(report)
}
