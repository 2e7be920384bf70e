//! Batch result retrieval and publication.
//!
//! Consumes every pending batch for the current report period: reassociates
//! the provider's output lines, publishes the summary artifact and marks the
//! record completed. A batch the provider has not finished aborts the whole
//! invocation so the external trigger retries later; the record stays
//! pending.

use chrono::NaiveDate;
use econodoc::{
    object_key, reassociate, BatchInference, BatchStatus, Error, JobReport, ObjectStore,
    ReleaseCalendar, Result, StatusStore,
};
use log::info;

/// Retrieval job over all pending batches of the current period.
pub struct PolicyResultsJob;

impl PolicyResultsJob {
    /// Run the retrieval for `today`.
    pub fn run(
        &self,
        today: NaiveDate,
        store: &dyn ObjectStore,
        status_store: &dyn StatusStore,
        inference: &dyn BatchInference,
    ) -> Result<JobReport> {
        let calendar = ReleaseCalendar::monetary_policy(0);
        let Some(code) = calendar.period_code(today) else {
            return Ok(JobReport::no_data("no report month"));
        };

        let pending = status_store.pending_for(&code)?;
        if pending.is_empty() {
            return Ok(JobReport::no_data("no pending batch jobs").with("code", code));
        }

        let mut published = Vec::new();
        for record in pending {
            let status = inference.status(&record.batch_id)?;
            if status != "completed" {
                return Err(Error::BatchNotReady(format!(
                    "{} is {}",
                    record.batch_id, status
                )));
            }

            let output = inference.output(&record.batch_id)?;
            let results = reassociate(output.lines())?;

            let key = object_key(&record.code, &record.doc_type);
            store.put(&key, &serde_json::to_vec(&results)?)?;
            status_store.update_status(&record.key(), BatchStatus::Completed)?;
            info!("published {} ({} items)", key, results.len());
            published.push(key);
        }

        Ok(JobReport::success()
            .with("code", code)
            .with("processed", published.len())
            .with("keys", published))
    }
}
