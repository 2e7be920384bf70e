//! # econodoc
//!
//! Korean economic data ingestion library.
//!
//! This library powers a set of scheduled ingestion jobs: statistics
//! connectors that reshape ECOS/KRX/REB responses into normalized monthly
//! series, and a document pipeline that turns noisy PDF-extracted monetary
//! policy reports into clean paragraphs, batch summarization requests and
//! reassociated results.
//!
//! ## Quick Start
//!
//! ```
//! use econodoc::{BatchRequestBuilder, Pipeline};
//!
//! let pipeline = Pipeline::default();
//! let paragraphs = pipeline.paragraphs("[표1] 주: 비고\n물가 상승률이 둔화되었다.");
//!
//! let builder = BatchRequestBuilder::new("gpt-5.1");
//! let requests = builder.build(&paragraphs);
//! assert_eq!(requests[0].custom_id, "para-0001");
//! ```
//!
//! ## Features
//!
//! - **Document pipeline**: normalization, structural segmentation,
//!   sentence filtering for Korean policy reports
//! - **Batch building**: token-bucketed prompts, JSONL request files,
//!   result reassociation by stable identifiers
//! - **Series reshaping**: monthly/quarterly ECOS rows, REB tables,
//!   in-place KRX upserts
//! - **Release calendar**: fixed publication dates with per-variant lag
//! - **Collaborator traits**: object store, status store, batch inference
//!   and notification seams for the job binaries

pub mod batch;
pub mod error;
pub mod job;
pub mod pipeline;
pub mod schedule;
pub mod series;
pub mod services;

// Re-export commonly used types
pub use batch::{
    ordinal_id, reassociate, BatchRequestBuilder, BucketTable, BucketTier, InferenceRequest,
    ItemOutcome, ItemResult, ParagraphSummary, SummaryBody, SummaryShape, TokenEstimator,
};
pub use error::{Error, Result};
pub use job::{JobReport, JobStatus};
pub use pipeline::{Paragraph, Pipeline, PipelineOptions, SegmentStrategy};
pub use schedule::{FilenameRule, ReleaseCalendar};
pub use series::{Cycle, SeriesPoint};
pub use services::{
    object_key, BatchInference, BatchRecord, BatchStatus, Notifier, ObjectStore, Severity,
    StatusStore,
};

/// Run the full document pipeline and build batch requests in one step.
///
/// # Example
///
/// ```
/// use econodoc::{summarization_requests, PipelineOptions, SegmentStrategy};
///
/// let options = PipelineOptions::new().with_segmentation(SegmentStrategy::departments());
/// let requests = summarization_requests("(조사국) 수출이 증가하였다.", options, "gpt-5.1");
/// assert_eq!(requests.len(), 1);
/// ```
pub fn summarization_requests(
    raw: &str,
    options: PipelineOptions,
    model: &str,
) -> Vec<InferenceRequest> {
    let pipeline = Pipeline::new(options);
    let paragraphs = pipeline.paragraphs(raw);
    BatchRequestBuilder::new(model).build(&paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarization_requests_end_to_end() {
        let requests = summarization_requests(
            "표 3 경제전망\n기준금리는 동결되었다.",
            PipelineOptions::default(),
            "gpt-5.1",
        );
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body.model, "gpt-5.1");
        assert!(requests[0].body.messages[1]
            .content
            .contains("기준금리는 동결되었다."));
    }

    #[test]
    fn test_summarization_requests_empty_input() {
        let requests =
            summarization_requests("- 3 -\n자료: 한국은행", PipelineOptions::default(), "gpt-5.1");
        assert!(requests.is_empty());
    }
}
