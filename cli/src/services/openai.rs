//! OpenAI-style batch inference adapter.
//!
//! Submission is a two-step call: upload the JSONL file with purpose
//! `batch`, then create a batch over the uploaded file against the chat
//! completions endpoint with a 24h completion window.

use std::path::Path;
use std::time::Duration;

use econodoc::batch::CHAT_COMPLETIONS_URL;
use econodoc::{BatchInference, Error, Result};
use log::info;
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const COMPLETION_WINDOW: &str = "24h";

/// Blocking client for the provider's files/batches endpoints.
pub struct OpenAiBatchClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenAiBatchClient {
    /// Create a client against the default API host.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom API host.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.api_key)
    }

    fn json_body(&self, response: Response, context: &str) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Inference(format!(
                "{} returned {}",
                context,
                status.as_u16()
            )));
        }
        response
            .json()
            .map_err(|e| Error::Inference(format!("{}: {}", context, e)))
    }

    fn string_field(value: &Value, field: &str, context: &str) -> Result<String> {
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::Inference(format!("{} response missing {}", context, field)))
    }
}

impl BatchInference for OpenAiBatchClient {
    fn submit(&self, requests: &Path) -> Result<String> {
        let form = multipart::Form::new()
            .text("purpose", "batch")
            .file("file", requests)?;
        let response = self
            .authorized(self.http.post(format!("{}/v1/files", self.base_url)))
            .multipart(form)
            .send()
            .map_err(|e| Error::Inference(e.to_string()))?;
        let file = self.json_body(response, "file upload")?;
        let file_id = Self::string_field(&file, "id", "file upload")?;
        info!("uploaded batch input file {}", file_id);

        let response = self
            .authorized(self.http.post(format!("{}/v1/batches", self.base_url)))
            .json(&json!({
                "input_file_id": file_id,
                "endpoint": CHAT_COMPLETIONS_URL,
                "completion_window": COMPLETION_WINDOW,
            }))
            .send()
            .map_err(|e| Error::Inference(e.to_string()))?;
        let batch = self.json_body(response, "batch create")?;
        Self::string_field(&batch, "id", "batch create")
    }

    fn status(&self, batch_id: &str) -> Result<String> {
        let response = self
            .authorized(
                self.http
                    .get(format!("{}/v1/batches/{}", self.base_url, batch_id)),
            )
            .send()
            .map_err(|e| Error::Inference(e.to_string()))?;
        let batch = self.json_body(response, "batch retrieve")?;
        Self::string_field(&batch, "status", "batch retrieve")
    }

    fn output(&self, batch_id: &str) -> Result<String> {
        let response = self
            .authorized(
                self.http
                    .get(format!("{}/v1/batches/{}", self.base_url, batch_id)),
            )
            .send()
            .map_err(|e| Error::Inference(e.to_string()))?;
        let batch = self.json_body(response, "batch retrieve")?;
        let output_file_id = Self::string_field(&batch, "output_file_id", "batch retrieve")?;

        let response = self
            .authorized(self.http.get(format!(
                "{}/v1/files/{}/content",
                self.base_url, output_file_id
            )))
            .send()
            .map_err(|e| Error::Inference(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::Inference(format!(
                "file content returned {}",
                response.status().as_u16()
            )));
        }
        response
            .text()
            .map_err(|e| Error::Inference(e.to_string()))
    }
}
