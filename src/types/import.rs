//! Import report types and reconciliation

use serde::{Deserialize, Serialize};

use crate::services::bulk::BulkOutcome;

/// One rejected record in an import report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportFailure {
    /// Position of the record in the attempted batch
    pub index: usize,
    pub message: String,
    /// Business identifier of the rejected record (GST number for
    /// companies), "Unknown" when not derivable from the failure
    pub identifier: String,
}

/// Result of a batch import, serialized for the calling API layer.
///
/// `status` is true for complete AND partial success - a partial failure is
/// still a completed call. Hard failures never produce a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub status: bool,
    pub message: String,
    pub inserted_count: usize,
    pub error_count: usize,
    pub errors: Vec<ImportFailure>,
}

impl ImportReport {
    /// Report for a source that produced no candidates at all.
    pub fn empty_source(message: &str) -> Self {
        Self {
            status: true,
            message: message.to_string(),
            inserted_count: 0,
            error_count: 0,
            errors: Vec::new(),
        }
    }

    /// Reconcile a bulk outcome into the report shape: full success keeps
    /// the success message, rejections become per-record error entries.
    pub fn reconcile(outcome: BulkOutcome, entity: &str) -> Self {
        if outcome.failures.is_empty() {
            return Self {
                status: true,
                message: format!("All {entity} imported successfully."),
                inserted_count: outcome.inserted,
                error_count: 0,
                errors: Vec::new(),
            };
        }

        let errors: Vec<ImportFailure> = outcome
            .failures
            .into_iter()
            .map(|f| ImportFailure {
                index: f.index,
                message: f.message,
                identifier: f.identifier.unwrap_or_else(|| "Unknown".to_string()),
            })
            .collect();

        Self {
            status: true,
            message: format!(
                "Imported {} {entity}. {} failed.",
                outcome.inserted,
                errors.len()
            ),
            inserted_count: outcome.inserted,
            error_count: errors.len(),
            errors,
        }
    }
}
