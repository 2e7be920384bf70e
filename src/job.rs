//! Job outcome reporting.
//!
//! Every job invocation ends in an explicit outcome: success with details,
//! or a no-data verdict with a reason. "Nothing to do today" is a normal
//! result, not an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Terminal outcome of a job invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Data was ingested or a batch was processed.
    #[serde(rename = "SUCCESS")]
    Success,
    /// The job ran but found nothing to ingest.
    #[serde(rename = "NO_DATA")]
    NoData,
}

/// Structured outcome report for a job invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    /// Terminal outcome.
    pub status: JobStatus,
    /// Job-specific details (periods, counts, reasons).
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl JobReport {
    /// A success report with no details yet.
    pub fn success() -> Self {
        Self {
            status: JobStatus::Success,
            details: Map::new(),
        }
    }

    /// A no-data report carrying the reason.
    pub fn no_data(reason: impl Into<String>) -> Self {
        let mut details = Map::new();
        details.insert("reason".to_string(), Value::String(reason.into()));
        Self {
            status: JobStatus::NoData,
            details,
        }
    }

    /// Attach a detail field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Compact JSON rendering for logs and notifications.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}
