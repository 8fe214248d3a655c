//! Proforma invoice CSV import pipeline
//!
//! Rows are grouped into one document per voucher number, in file order.
//! Each row resolves its owning company by name through a per-call cache
//! keyed by the row's company code; a row whose company cannot be resolved
//! invalidates its entire voucher, discarding any items already aggregated
//! for it. Surviving documents are bulk-inserted with continue-on-error
//! semantics; the import returns the precise count of documents the store
//! accepted.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::{bulk, cleanup, csv_source};
use crate::services::bulk::BulkSink;
use crate::types::{PiDocument, PiItem, PiRow};

/// Company lookup collaborator: exact-name point lookup.
#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    async fn company_id_by_name(&self, name: &str) -> Result<Option<Uuid>>;
}

/// Per-call aggregation state. Never shared across imports.
#[derive(Default)]
pub struct PiAggregator {
    /// Voucher number -> in-progress document
    documents: HashMap<String, PiDocument>,
    /// Vouchers permanently invalidated within this call
    invalid: HashSet<String>,
    /// Company code -> resolved company id (memoizes lookups for this file)
    company_cache: HashMap<String, Uuid>,
}

impl PiAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one row in file order. Row-level problems are skips, not
    /// errors; only a failing lookup call itself aborts the import.
    pub async fn consume<D>(&mut self, directory: &D, row: PiRow) -> Result<()>
    where
        D: CompanyDirectory + ?Sized,
    {
        let Some(voucher) = row.voucher_no.clone().filter(|v| !v.is_empty()) else {
            return Ok(());
        };

        // Once a voucher is invalid it stays invalid - no re-validation
        if self.invalid.contains(&voucher) {
            return Ok(());
        }

        let code = row.company_code.clone().unwrap_or_default();
        let company_id = match self.company_cache.get(&code) {
            Some(id) => *id,
            None => {
                let name = row.company_name.as_deref().unwrap_or("");
                match directory.company_id_by_name(name).await? {
                    Some(id) => {
                        self.company_cache.insert(code, id);
                        id
                    }
                    None => {
                        warn!("Skipping voucher {}: company not found -> {}", voucher, name);
                        self.invalid.insert(voucher.clone());
                        // A single bad row invalidates the whole invoice,
                        // including items aggregated from earlier rows
                        self.documents.remove(&voucher);
                        return Ok(());
                    }
                }
            }
        };

        let document = self
            .documents
            .entry(voucher.clone())
            .or_insert_with(|| PiDocument::open(company_id, voucher, &row));
        document.push_item(PiItem::from_row(&row));

        Ok(())
    }

    /// Final candidate set: every voucher that was never invalidated.
    pub fn into_documents(self) -> Vec<PiDocument> {
        self.documents.into_values().collect()
    }
}

/// Import PI documents from a CSV file, returning the number of documents
/// the store accepted. The source file is deleted after any terminal state.
pub async fn import_pis_from_csv<S>(store: &S, path: &Path) -> Result<usize>
where
    S: CompanyDirectory + BulkSink<PiDocument>,
{
    let result = run(store, path).await;
    cleanup::reap_source(path).await;
    result
}

async fn run<S>(store: &S, path: &Path) -> Result<usize>
where
    S: CompanyDirectory + BulkSink<PiDocument>,
{
    let mut rows = csv_source::open_rows::<PiRow>(path).await?;

    let mut aggregator = PiAggregator::new();
    while let Some(row) = rows.next().await {
        aggregator.consume(store, row?).await?;
    }

    let candidates = aggregator.into_documents();
    if candidates.is_empty() {
        return Ok(0);
    }

    let outcome = bulk::insert_unordered(store, &candidates).await?;
    for failure in &outcome.failures {
        warn!(
            "PI document rejected (voucher {}): {}",
            failure.identifier.as_deref().unwrap_or("Unknown"),
            failure.message
        );
    }
    info!(
        "PI import: {} of {} documents inserted",
        outcome.inserted, outcome.requested
    );

    Ok(outcome.inserted)
}
