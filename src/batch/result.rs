//! Reassociation of batch output lines with their request identifiers.
//!
//! The provider returns one JSON object per line, keyed by `custom_id`.
//! A line may carry an error instead of a response, and a response may fail
//! schema validation; both become error records keyed by the identifier so
//! that a single malformed item never fails the whole batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// The `summary` payload, shaped per job variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SummaryBody {
    /// Ordered list of key-point strings.
    Points(Vec<String>),
    /// Single summary string.
    Text(String),
}

/// A successfully parsed paragraph summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParagraphSummary {
    /// One-line title
    pub title: String,
    /// Summary content
    pub summary: SummaryBody,
}

/// Outcome of one batch item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ItemOutcome {
    /// Parsed summary conforming to the declared schema.
    Summary(ParagraphSummary),
    /// Failure reason for this item.
    Failed {
        /// Error description
        error: String,
    },
}

/// One reassociated batch result entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemResult {
    /// Request identifier this entry answers.
    pub id: String,
    /// Success or per-item failure.
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

impl ItemResult {
    /// Whether this entry carries a parsed summary.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ItemOutcome::Summary(_))
    }
}

#[derive(Deserialize)]
struct OutputLine {
    custom_id: Option<String>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    response: Option<Value>,
}

/// Reassociate raw batch output lines into per-identifier results.
///
/// Per-item failures (provider error field, missing or schema-violating
/// content) become error records. A line that is not a JSON object at all is
/// a hard error: the artifact itself is corrupt and identifiers can no
/// longer be trusted.
pub fn reassociate<'a, I>(lines: I) -> Result<Vec<ItemResult>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut results = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row: OutputLine = serde_json::from_str(line)?;
        let id = row
            .custom_id
            .ok_or_else(|| Error::Other("batch output line has no custom_id".into()))?;

        if let Some(error) = row.error.filter(|e| !e.is_null()) {
            let reason = error
                .get("code")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            results.push(ItemResult {
                id,
                outcome: ItemOutcome::Failed { error: reason },
            });
            continue;
        }

        let outcome = parse_content(row.response.as_ref());
        results.push(ItemResult { id, outcome });
    }

    Ok(results)
}

fn parse_content(response: Option<&Value>) -> ItemOutcome {
    let content = response
        .and_then(|r| r.pointer("/body/choices/0/message/content"))
        .and_then(Value::as_str);

    let Some(content) = content else {
        return ItemOutcome::Failed {
            error: "missing response content".to_string(),
        };
    };

    match serde_json::from_str::<ParagraphSummary>(content) {
        Ok(summary) => ItemOutcome::Summary(summary),
        Err(e) => ItemOutcome::Failed {
            error: format!("json_parse_error: {}", e),
        },
    }
}
