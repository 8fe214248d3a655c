//! Unordered bulk persistence gate
//!
//! Attempts every record of a batch independently, so a single rejected
//! record never prevents the rest from committing. Store-side rejections
//! (uniqueness, schema validation) are collected per record; anything else
//! (connectivity, protocol errors) aborts the whole import.

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Outcome of a single insert attempt, classified for reconciliation.
#[derive(Debug, Error)]
pub enum InsertError {
    /// The store rejected this record (duplicate key, constraint violation).
    /// Recorded in the partial-success report; the batch continues.
    #[error("{0}")]
    Rejected(String),
    /// Non-record failure (connectivity, protocol). Fatal for the import.
    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for InsertError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            // SQLSTATE class 23 (integrity constraint) and 22 (data
            // exception) map to the store-validation rejections that the
            // report reconciles; everything else is fatal.
            let reconcilable = db
                .code()
                .is_some_and(|c| c.starts_with("23") || c.starts_with("22"));
            if reconcilable {
                return InsertError::Rejected(db.message().to_string());
            }
        }
        InsertError::Fatal(err.into())
    }
}

/// One rejected record of a bulk insert.
#[derive(Debug, Clone)]
pub struct BulkFailure {
    pub index: usize,
    pub message: String,
    pub identifier: Option<String>,
}

/// Result of an unordered bulk insert.
#[derive(Debug, Clone)]
pub struct BulkOutcome {
    pub requested: usize,
    pub inserted: usize,
    pub failures: Vec<BulkFailure>,
}

/// A store that can accept records of type `T` one at a time.
#[async_trait]
pub trait BulkSink<T: Send + Sync>: Send + Sync {
    /// Business identifier reported for a rejected record, if derivable.
    fn identifier(&self, record: &T) -> Option<String>;

    async fn insert_one(&self, record: &T) -> Result<(), InsertError>;
}

/// Insert all records with continue-on-error semantics. An empty input is a
/// zero-effect success and issues no store call.
pub async fn insert_unordered<T, S>(sink: &S, records: &[T]) -> Result<BulkOutcome>
where
    T: Send + Sync,
    S: BulkSink<T> + ?Sized,
{
    let mut outcome = BulkOutcome {
        requested: records.len(),
        inserted: 0,
        failures: Vec::new(),
    };

    for (index, record) in records.iter().enumerate() {
        match sink.insert_one(record).await {
            Ok(()) => outcome.inserted += 1,
            Err(InsertError::Rejected(message)) => outcome.failures.push(BulkFailure {
                index,
                message,
                identifier: sink.identifier(record),
            }),
            Err(InsertError::Fatal(err)) => return Err(err),
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Sink that rejects records equal to a marker value and counts calls.
    struct MarkerSink {
        reject: &'static str,
        fatal: &'static str,
        calls: AtomicUsize,
    }

    impl MarkerSink {
        fn new() -> Self {
            Self {
                reject: "dup",
                fatal: "down",
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BulkSink<&'static str> for MarkerSink {
        fn identifier(&self, record: &&'static str) -> Option<String> {
            Some(record.to_string())
        }

        async fn insert_one(&self, record: &&'static str) -> Result<(), InsertError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *record == self.reject {
                return Err(InsertError::Rejected("duplicate key".to_string()));
            }
            if *record == self.fatal {
                return Err(InsertError::Fatal(anyhow::anyhow!("connection lost")));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_one_rejection_does_not_abort_batch() {
        let sink = MarkerSink::new();
        let records = ["a", "dup", "c"];
        let outcome = insert_unordered(&sink, &records).await.unwrap();

        assert_eq!(outcome.requested, 3);
        assert_eq!(outcome.inserted, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 1);
        assert_eq!(outcome.failures[0].identifier.as_deref(), Some("dup"));
        // All three records were attempted
        assert_eq!(sink.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_input_issues_no_store_call() {
        let sink = MarkerSink::new();
        let records: [&'static str; 0] = [];
        let outcome = insert_unordered(&sink, &records).await.unwrap();

        assert_eq!(outcome.requested, 0);
        assert_eq!(outcome.inserted, 0);
        assert!(outcome.failures.is_empty());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fatal_error_propagates() {
        let sink = MarkerSink::new();
        let records = ["a", "down", "c"];
        let err = insert_unordered(&sink, &records).await.unwrap_err();
        assert!(err.to_string().contains("connection lost"));
    }
}
