//! REB (R-ONE) statistic ingestion job.
//!
//! Fetches one monthly statistics table and replaces the stored series.

use econodoc::series::from_reb_response;
use econodoc::{Error, JobReport, ObjectStore, Result};
use log::info;
use reqwest::blocking::Client;

const BASE_URL: &str = "https://www.reb.or.kr/r-one/openapi/SttsApiTblData.do";
const PAGE_SIZE: &str = "1000";

/// One configured REB ingestion.
pub struct RebJob {
    /// API authentication key.
    pub api_key: String,
    /// Statistics table identifier.
    pub statbl_id: String,
    /// Classification identifier.
    pub cls_id: String,
    /// Optional group identifier.
    pub grp_id: Option<String>,
    /// Optional item identifier.
    pub itm_id: Option<String>,
    /// Object key the series is stored under.
    pub output_key: String,
}

impl RebJob {
    fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![
            ("KEY", self.api_key.as_str()),
            ("Type", "json"),
            ("STATBL_ID", self.statbl_id.as_str()),
            ("DTACYCLE_CD", "MM"),
            ("CLS_ID", self.cls_id.as_str()),
            ("pSize", PAGE_SIZE),
        ];
        if let Some(grp_id) = &self.grp_id {
            params.push(("GRP_ID", grp_id.as_str()));
        }
        if let Some(itm_id) = &self.itm_id {
            params.push(("ITM_ID", itm_id.as_str()));
        }
        params
    }

    /// Fetch, reshape and store the series.
    pub fn run(&self, http: &Client, store: &dyn ObjectStore) -> Result<JobReport> {
        let response = http
            .get(BASE_URL)
            .query(&self.query_params())
            .send()
            .map_err(|e| Error::Upstream(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::UpstreamStatus {
                status: response.status().as_u16(),
                url: BASE_URL.to_string(),
            });
        }
        let data: serde_json::Value =
            response.json().map_err(|e| Error::Upstream(e.to_string()))?;

        let series = from_reb_response(&data);
        if series.is_empty() {
            return Ok(JobReport::no_data("no rows in response").with("count", 0));
        }

        info!("reb {} -> {} points", self.statbl_id, series.len());
        store.put(&self.output_key, &serde_json::to_vec(&series)?)?;

        Ok(JobReport::success().with("count", series.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_skip_absent_ids() {
        let job = RebJob {
            api_key: "KEY".into(),
            statbl_id: "T1".into(),
            cls_id: "500".into(),
            grp_id: None,
            itm_id: Some("I1".into()),
            output_key: "series/jeonse.json".into(),
        };
        let params = job.query_params();
        assert!(params.contains(&("DTACYCLE_CD", "MM")));
        assert!(params.contains(&("ITM_ID", "I1")));
        assert!(!params.iter().any(|(k, _)| *k == "GRP_ID"));
    }
}
