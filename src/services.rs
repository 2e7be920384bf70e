//! Collaborator interfaces for the ingestion jobs.
//!
//! Jobs talk to four external systems: an object store for published
//! artifacts, a status store tracking submitted batches, the batch
//! inference provider and a notification channel. Each is a trait so
//! jobs stay testable with in-memory fakes.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Object key where the published summary artifact for a report lands.
pub fn object_key(code: &str, doc_type: &str) -> String {
    format!("monetary-policy/{}/{}.json", code, doc_type)
}

/// Lifecycle state of a submitted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BatchStatus {
    /// Submitted, results not yet retrieved.
    Pending,
    /// Results retrieved and published.
    Completed,
    /// Retrieval failed permanently.
    Error,
}

/// Tracking record for one submitted batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Report period code, "YYYY-MM".
    pub code: String,
    /// Document variant, e.g. "decision" or "issue".
    pub doc_type: String,
    /// Provider-side batch identifier.
    pub batch_id: String,
    /// Lifecycle state.
    pub status: BatchStatus,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl BatchRecord {
    /// Create a pending record for a freshly submitted batch.
    pub fn pending(
        code: impl Into<String>,
        doc_type: impl Into<String>,
        batch_id: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            doc_type: doc_type.into(),
            batch_id: batch_id.into(),
            status: BatchStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Store key, unique per (period, variant) pair.
    pub fn key(&self) -> String {
        record_key(&self.code, &self.doc_type)
    }
}

/// Status-store key for a (period, variant) pair.
pub fn record_key(code: &str, doc_type: &str) -> String {
    format!("{}#{}", code, doc_type)
}

/// Durable object storage for published artifacts.
pub trait ObjectStore {
    /// Write `bytes` under `key`, replacing any existing object.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Read the object under `key`.
    fn get(&self, key: &str) -> Result<Vec<u8>>;
}

/// Key-value tracking of submitted batches.
pub trait StatusStore {
    /// Insert or replace the record under its key.
    fn put(&self, record: &BatchRecord) -> Result<()>;

    /// Whether a record exists for the (period, variant) pair.
    fn exists(&self, code: &str, doc_type: &str) -> Result<bool>;

    /// All pending records for the given period code.
    fn pending_for(&self, code: &str) -> Result<Vec<BatchRecord>>;

    /// Transition the record under `key` to `status`.
    fn update_status(&self, key: &str, status: BatchStatus) -> Result<()>;
}

/// Batch inference provider.
pub trait BatchInference {
    /// Upload the JSONL request file and start a batch; returns the
    /// provider-side batch identifier.
    fn submit(&self, requests: &Path) -> Result<String>;

    /// Provider-side lifecycle status string for a batch.
    fn status(&self, batch_id: &str) -> Result<String>;

    /// Raw JSONL output of a completed batch.
    fn output(&self, batch_id: &str) -> Result<String>;
}

/// Outcome severity for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Job completed with data.
    Success,
    /// Job ran but there was nothing to ingest.
    NoData,
    /// Job failed.
    Error,
}

impl Severity {
    /// Message prefix for the notification channel.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::NoData => "ℹ️",
            Self::Error => "❌",
        }
    }
}

/// Delivery channel for job outcome notifications.
///
/// Delivery is best effort; implementations log failures instead of
/// returning them so a dead channel never fails a job.
pub trait Notifier {
    /// Send a message about `service` with the given severity.
    fn notify(&self, service: &str, message: &str, severity: Severity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_layout() {
        assert_eq!(
            object_key("2025-05", "decision"),
            "monetary-policy/2025-05/decision.json"
        );
    }

    #[test]
    fn test_record_key_pairs_period_and_variant() {
        let record = BatchRecord::pending("2025-05", "issue", "batch_abc");
        assert_eq!(record.key(), "2025-05#issue");
        assert_eq!(record.status, BatchStatus::Pending);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&BatchStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
        let json = serde_json::to_string(&BatchStatus::Completed).unwrap();
        assert_eq!(json, "\"COMPLETED\"");
    }

    #[test]
    fn test_severity_emoji() {
        assert_eq!(Severity::Success.emoji(), "✅");
        assert_eq!(Severity::NoData.emoji(), "ℹ️");
        assert_eq!(Severity::Error.emoji(), "❌");
    }
}
