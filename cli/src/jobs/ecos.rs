//! ECOS statistic ingestion job.
//!
//! Fetches a StatisticSearch series for the full default range, reshapes it
//! into the normalized monthly form and replaces the stored object.

use econodoc::series::{from_ecos_response, Cycle};
use econodoc::{Error, JobReport, ObjectStore, Result};
use log::info;
use reqwest::blocking::Client;

const BASE_URL: &str = "https://ecos.bok.or.kr/api/StatisticSearch";

/// One configured ECOS ingestion.
pub struct EcosJob {
    /// API authentication key.
    pub api_key: String,
    /// Statistic table code.
    pub stat_code: String,
    /// Observation cycle.
    pub cycle: Cycle,
    /// First-level item code.
    pub item_code: String,
    /// Optional second-level item code.
    pub item_code2: Option<String>,
    /// Object key the series is stored under.
    pub output_key: String,
}

impl EcosJob {
    fn api_url(&self, start: &str, end: &str) -> String {
        let mut url = format!(
            "{}/{}/json/kr/1/1000/{}/{}/{}/{}/{}",
            BASE_URL,
            self.api_key,
            self.stat_code,
            self.cycle.code(),
            start,
            end,
            self.item_code,
        );
        if let Some(item2) = &self.item_code2 {
            url.push('/');
            url.push_str(item2);
        }
        url
    }

    /// Fetch, reshape and store the series.
    pub fn run(&self, http: &Client, store: &dyn ObjectStore) -> Result<JobReport> {
        let today = chrono::Utc::now().date_naive();
        let url = self.api_url(self.cycle.default_start(), &self.cycle.end_for(today));

        let response = http
            .get(&url)
            .send()
            .map_err(|e| Error::Upstream(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::UpstreamStatus {
                status: response.status().as_u16(),
                url: format!("{}/***", BASE_URL),
            });
        }
        let data: serde_json::Value =
            response.json().map_err(|e| Error::Upstream(e.to_string()))?;

        let series = from_ecos_response(&data);
        if series.is_empty() {
            return Ok(JobReport::no_data("no rows in response").with("count", 0));
        }

        info!("ecos {} -> {} points", self.stat_code, series.len());
        store.put(&self.output_key, &serde_json::to_vec(&series)?)?;

        Ok(JobReport::success().with("count", series.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(item_code2: Option<&str>) -> EcosJob {
        EcosJob {
            api_key: "KEY".into(),
            stat_code: "722Y001".into(),
            cycle: Cycle::Monthly,
            item_code: "0101000".into(),
            item_code2: item_code2.map(str::to_string),
            output_key: "series/base-rate.json".into(),
        }
    }

    #[test]
    fn test_api_url_without_second_item() {
        let url = job(None).api_url("199601", "202508");
        assert_eq!(
            url,
            "https://ecos.bok.or.kr/api/StatisticSearch/KEY/json/kr/1/1000/722Y001/M/199601/202508/0101000"
        );
    }

    #[test]
    fn test_api_url_with_second_item() {
        let url = job(Some("AAA")).api_url("1996Q1", "2025Q3");
        assert!(url.ends_with("/0101000/AAA"));
    }
}
