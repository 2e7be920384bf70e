//! Monetary-policy summarization batch submission.
//!
//! One job run per document variant: work out the target report period,
//! check the duplicate guard, find today's PDF on the release page, run the
//! document pipeline and submit the request batch. The two variants differ
//! only in configuration.

use std::io::Write;

use chrono::{Datelike, NaiveDate};
use econodoc::pipeline::{Pipeline, PipelineOptions, SegmentStrategy};
use econodoc::{
    BatchInference, BatchRecord, BatchRequestBuilder, FilenameRule, JobReport, ReleaseCalendar,
    Result, StatusStore, SummaryShape, TokenEstimator,
};
use log::info;
use reqwest::blocking::Client;
use tempfile::NamedTempFile;

use crate::bok;

/// Per-variant configuration for the submission job.
pub struct PolicyVariant {
    /// Variant name, used in store keys and object keys.
    pub doc_type: &'static str,
    /// Model identifier for the batch requests.
    pub model: &'static str,
    /// Output token cap per request.
    pub max_completion_tokens: u32,
    /// Summary output shape.
    pub shape: SummaryShape,
    /// Token estimation method for bucket selection.
    pub estimator: TokenEstimator,
    /// Paragraph splitting strategy.
    pub segmentation: SegmentStrategy,
    /// How release-page filenames are matched to the target period.
    pub filename_rule: FilenameRule,
    /// Days between the publish date and PDF availability.
    pub lag_days: i64,
}

impl PolicyVariant {
    /// The policy decision report: one short document, summarized whole
    /// into a key-point list.
    pub fn decision() -> Self {
        Self {
            doc_type: "decision",
            model: "gpt-5.2",
            max_completion_tokens: 800,
            shape: SummaryShape::PointList,
            estimator: TokenEstimator::char_ratio(),
            segmentation: SegmentStrategy::Whole,
            filename_rule: FilenameRule::ShortCode,
            lag_days: 0,
        }
    }

    /// The policy issue report: department-sectioned, one single-text
    /// summary per section. The PDF appears a week after the meeting.
    pub fn issue() -> Self {
        Self {
            doc_type: "issue",
            model: "gpt-5.1",
            max_completion_tokens: 500,
            shape: SummaryShape::SingleText,
            estimator: TokenEstimator::Exact,
            segmentation: SegmentStrategy::departments(),
            filename_rule: FilenameRule::KoreanYearMonth,
            lag_days: 7,
        }
    }
}

/// Submission job for one document variant.
pub struct PolicySubmitJob {
    /// Variant configuration.
    pub variant: PolicyVariant,
    /// Release page URL.
    pub page_url: String,
}

impl PolicySubmitJob {
    /// Run the submission for `today`.
    pub fn run(
        &self,
        today: NaiveDate,
        http: &Client,
        status_store: &dyn StatusStore,
        inference: &dyn BatchInference,
    ) -> Result<JobReport> {
        let calendar = ReleaseCalendar::monetary_policy(self.variant.lag_days);
        let Some(month) = calendar.target_month(today) else {
            return Ok(JobReport::no_data("no report scheduled yet this year"));
        };
        let code = format!("{}-{:02}", today.year(), month);

        if status_store.exists(&code, self.variant.doc_type)? {
            return Ok(JobReport::no_data("already processed").with("code", code));
        }

        let links = bok::pdf_links(http, &self.page_url)?;
        let Some(link) = links
            .iter()
            .find(|l| self.variant.filename_rule.matches(&l.filename, today.year(), month))
        else {
            return Ok(JobReport::no_data("no pdf today").with("code", code));
        };
        info!("downloading {}", link.filename);

        let pdf = bok::download_pdf(http, &link.url)?;
        let raw_text = bok::extract_text(&pdf)?;

        let options =
            PipelineOptions::new().with_segmentation(self.variant.segmentation.clone());
        let paragraphs = Pipeline::new(options).paragraphs(&raw_text);
        if paragraphs.is_empty() {
            return Ok(JobReport::no_data("document yielded no paragraphs").with("code", code));
        }

        let builder = BatchRequestBuilder::new(self.variant.model)
            .with_max_completion_tokens(self.variant.max_completion_tokens)
            .with_shape(self.variant.shape)
            .with_estimator(self.variant.estimator);
        let requests = builder.build(&paragraphs);

        let mut scratch = NamedTempFile::new()?;
        builder.write_jsonl(&requests, &mut scratch)?;
        scratch.flush()?;

        let batch_id = inference.submit(scratch.path())?;
        status_store.put(&BatchRecord::pending(
            code.clone(),
            self.variant.doc_type,
            batch_id.clone(),
        ))?;
        info!("submitted batch {} for {}", batch_id, code);

        Ok(JobReport::success()
            .with("code", code)
            .with("batch_id", batch_id)
            .with("paragraphs", paragraphs.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_tables() {
        let decision = PolicyVariant::decision();
        assert_eq!(decision.doc_type, "decision");
        assert_eq!(decision.max_completion_tokens, 800);
        assert_eq!(decision.lag_days, 0);
        assert!(matches!(decision.segmentation, SegmentStrategy::Whole));

        let issue = PolicyVariant::issue();
        assert_eq!(issue.doc_type, "issue");
        assert_eq!(issue.max_completion_tokens, 500);
        assert_eq!(issue.lag_days, 7);
        assert!(matches!(
            issue.segmentation,
            SegmentStrategy::Departments(_)
        ));
    }
}
