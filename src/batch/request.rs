//! Batch inference request construction and JSONL serialization.
//!
//! Each surviving paragraph becomes one structured request: a stable ordinal
//! identifier, the rendered instruction as system content, the paragraph as
//! user content, deterministic decoding parameters and a JSON-schema
//! response contract. The serialized one-object-per-line file is the sole
//! artifact handed to the batch-inference collaborator.

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::pipeline::Paragraph;

use super::buckets::BucketTable;
use super::prompt::{render_instruction, SummaryShape};
use super::tokens::TokenEstimator;

/// Fixed target endpoint for chat-completion batch items.
pub const CHAT_COMPLETIONS_URL: &str = "/v1/chat/completions";

/// One role-tagged message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system" | "user"
    pub role: String,
    /// Message text
    pub content: String,
}

/// JSON-schema constrained response format declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Always "json_schema".
    #[serde(rename = "type")]
    pub kind: String,
    /// Named schema with required `title` and `summary` fields.
    pub json_schema: serde_json::Value,
}

impl ResponseFormat {
    /// The paragraph-summary schema for the given output shape.
    pub fn paragraph_summary(shape: SummaryShape) -> Self {
        let summary_type = match shape {
            SummaryShape::PointList => json!({
                "type": "array",
                "items": { "type": "string" }
            }),
            SummaryShape::SingleText => json!({ "type": "string" }),
        };
        Self {
            kind: "json_schema".to_string(),
            json_schema: json!({
                "name": "paragraph_summary",
                "schema": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "summary": summary_type
                    },
                    "required": ["title", "summary"]
                }
            }),
        }
    }
}

/// Request body with decoding parameters pinned for determinism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Model identifier
    pub model: String,
    /// System instruction followed by the user paragraph
    pub messages: Vec<ChatMessage>,
    /// Output length cap
    pub max_completion_tokens: u32,
    /// Always 0
    pub temperature: f32,
    /// Schema-validated response contract
    pub response_format: ResponseFormat,
}

/// One batch item: a single paragraph summary request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// Ordinal identifier, unique within the batch ("para-0001", ...).
    pub custom_id: String,
    /// Always "POST".
    pub method: String,
    /// Target endpoint path.
    pub url: String,
    /// Request body.
    pub body: RequestBody,
}

/// Ordinal identifier for the 1-based position `ordinal`.
pub fn ordinal_id(ordinal: usize) -> String {
    format!("para-{:04}", ordinal)
}

/// Builder turning clean paragraphs into a serialized request batch.
#[derive(Debug, Clone)]
pub struct BatchRequestBuilder {
    model: String,
    max_completion_tokens: u32,
    shape: SummaryShape,
    estimator: TokenEstimator,
    buckets: BucketTable,
}

impl BatchRequestBuilder {
    /// Create a builder for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_completion_tokens: 500,
            shape: SummaryShape::default(),
            estimator: TokenEstimator::default(),
            buckets: BucketTable::default(),
        }
    }

    /// Set the output token cap.
    pub fn with_max_completion_tokens(mut self, cap: u32) -> Self {
        self.max_completion_tokens = cap;
        self
    }

    /// Set the summary output shape.
    pub fn with_shape(mut self, shape: SummaryShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the token estimation method.
    pub fn with_estimator(mut self, estimator: TokenEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Set the length bucket table.
    pub fn with_buckets(mut self, buckets: BucketTable) -> Self {
        self.buckets = buckets;
        self
    }

    /// Build one request per paragraph, in source order.
    pub fn build(&self, paragraphs: &[Paragraph]) -> Vec<InferenceRequest> {
        paragraphs
            .iter()
            .enumerate()
            .map(|(i, paragraph)| {
                let text = paragraph.text();
                let tokens = self.estimator.count(&text);
                let bucket = self.buckets.select(tokens);
                let instruction = render_instruction(self.shape, bucket);

                InferenceRequest {
                    custom_id: ordinal_id(i + 1),
                    method: "POST".to_string(),
                    url: CHAT_COMPLETIONS_URL.to_string(),
                    body: RequestBody {
                        model: self.model.clone(),
                        messages: vec![
                            ChatMessage {
                                role: "system".to_string(),
                                content: instruction,
                            },
                            ChatMessage {
                                role: "user".to_string(),
                                content: text,
                            },
                        ],
                        max_completion_tokens: self.max_completion_tokens,
                        temperature: 0.0,
                        response_format: ResponseFormat::paragraph_summary(self.shape),
                    },
                }
            })
            .collect()
    }

    /// Serialize requests one JSON object per line into `sink`.
    pub fn write_jsonl<W: Write>(&self, requests: &[InferenceRequest], sink: &mut W) -> Result<()> {
        for request in requests {
            serde_json::to_writer(&mut *sink, request)?;
            sink.write_all(b"\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(texts: &[&str]) -> Vec<Paragraph> {
        texts.iter().map(|t| Paragraph::new(*t)).collect()
    }

    #[test]
    fn test_ordinal_ids_unique_and_ordered() {
        let builder = BatchRequestBuilder::new("gpt-5.1");
        let requests = builder.build(&paragraphs(&["첫째", "둘째", "셋째"]));
        let ids: Vec<_> = requests.iter().map(|r| r.custom_id.clone()).collect();
        assert_eq!(ids, vec!["para-0001", "para-0002", "para-0003"]);
    }

    #[test]
    fn test_deterministic_decoding_parameters() {
        let builder = BatchRequestBuilder::new("gpt-5.1").with_max_completion_tokens(800);
        let requests = builder.build(&paragraphs(&["물가가 안정되었다."]));
        let body = &requests[0].body;
        assert_eq!(body.temperature, 0.0);
        assert_eq!(body.max_completion_tokens, 800);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, CHAT_COMPLETIONS_URL);
    }

    #[test]
    fn test_two_role_messages() {
        let builder = BatchRequestBuilder::new("gpt-5.1");
        let requests = builder.build(&paragraphs(&["수출이 늘었다."]));
        let messages = &requests[0].body.messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "수출이 늘었다.");
    }

    #[test]
    fn test_schema_requires_title_and_summary() {
        let format = ResponseFormat::paragraph_summary(SummaryShape::PointList);
        let required = &format.json_schema["schema"]["required"];
        assert_eq!(*required, serde_json::json!(["title", "summary"]));
        assert_eq!(
            format.json_schema["schema"]["properties"]["summary"]["type"],
            "array"
        );

        let format = ResponseFormat::paragraph_summary(SummaryShape::SingleText);
        assert_eq!(
            format.json_schema["schema"]["properties"]["summary"]["type"],
            "string"
        );
    }

    #[test]
    fn test_bucket_label_embedded_in_instruction() {
        // 4500 chars / 3 = 1500 estimated tokens → second tier.
        let long = "가".repeat(4500);
        let builder = BatchRequestBuilder::new("gpt-5.1");
        let requests = builder.build(&[Paragraph::new(long)]);
        assert!(requests[0].body.messages[0].content.contains("5~6줄"));
    }

    #[test]
    fn test_write_jsonl_one_object_per_line() {
        let builder = BatchRequestBuilder::new("gpt-5.1");
        let requests = builder.build(&paragraphs(&["첫째 문단.", "둘째 문단."]));

        let mut buffer = Vec::new();
        builder.write_jsonl(&requests, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for (i, line) in lines.iter().enumerate() {
            let parsed: InferenceRequest = serde_json::from_str(line).unwrap();
            assert_eq!(parsed.custom_id, ordinal_id(i + 1));
        }
    }
}
