//! KRX index close-price ingestion job.
//!
//! Finds the last trading day of the previous month by scanning backwards
//! from month end, skipping weekends and days the API has no quote for, and
//! upserts that close price into the stored series.

use std::thread;
use std::time::Duration;

use chrono::{Datelike, Duration as ChronoDuration, NaiveDate, Utc};
use econodoc::series::{upsert, SeriesPoint};
use econodoc::{JobReport, ObjectStore, Result};
use log::{info, warn};
use reqwest::blocking::Client;
use serde_json::Value;

const BASE_URL: &str = "http://data-dbg.krx.co.kr/svc/apis/idx";
const RETRYABLE_STATUS: [u16; 3] = [401, 403, 429];
const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(3);

/// One configured KRX index ingestion.
pub struct KrxJob {
    /// API authentication key.
    pub api_key: String,
    /// Index endpoint name, e.g. "kospi_dd_trd".
    pub index_type: String,
    /// Object key of the existing stored series.
    pub output_key: String,
}

/// First day of the month before `today`.
pub fn previous_month(today: NaiveDate) -> NaiveDate {
    let (year, month) = if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always valid")
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.expect("first of month is always valid") - ChronoDuration::days(1)
}

impl KrxJob {
    /// Close price for `date`, or `None` when the market had no session.
    ///
    /// Auth/throttle statuses are retried a bounded number of times; any
    /// other failure means no quote for that day.
    fn close_price(&self, http: &Client, date: NaiveDate) -> Option<f64> {
        let url = format!("{}/{}", BASE_URL, self.index_type);
        let date_param = date.format("%Y%m%d").to_string();

        for attempt in 1..=MAX_ATTEMPTS {
            match http
                .get(&url)
                .header("AUTH_KEY", &self.api_key)
                .query(&[("basDd", date_param.as_str())])
                .send()
            {
                Ok(response) if response.status().is_success() => {
                    if let Ok(data) = response.json::<Value>() {
                        return extract_close_price(&data);
                    }
                    return None;
                }
                Ok(response) if !RETRYABLE_STATUS.contains(&response.status().as_u16()) => {
                    return None;
                }
                Ok(response) => {
                    warn!("krx returned {} for {}", response.status(), date_param);
                }
                Err(e) => warn!("krx request failed: {}", e),
            }

            if attempt < MAX_ATTEMPTS {
                thread::sleep(RETRY_DELAY);
            }
        }
        None
    }

    /// Scan backwards from month end for the last trading day with a quote.
    fn last_trading_close(
        &self,
        http: &Client,
        year: i32,
        month: u32,
    ) -> Option<(String, f64)> {
        let mut date = last_day_of_month(year, month);
        while date.month() == month {
            if date.weekday().num_days_from_monday() < 5 {
                if let Some(price) = self.close_price(http, date) {
                    return Some((date.format("%Y-%m").to_string(), price));
                }
            }
            date -= ChronoDuration::days(1);
        }
        None
    }

    /// Update the stored series with the previous month's closing level.
    pub fn run(&self, http: &Client, store: &dyn ObjectStore) -> Result<JobReport> {
        let existing = store.get(&self.output_key)?;
        let mut series: Vec<SeriesPoint> = serde_json::from_slice(&existing)?;

        let target = previous_month(Utc::now().date_naive());
        let Some((ym, price)) = self.last_trading_close(http, target.year(), target.month())
        else {
            return Ok(JobReport::no_data("no trading day found"));
        };

        info!("krx {} {} = {}", self.index_type, ym, price);
        let replaced = upsert(&mut series, SeriesPoint::new(ym.clone(), Some(price)));
        store.put(&self.output_key, &serde_json::to_vec(&series)?)?;

        Ok(JobReport::success()
            .with("ym", ym)
            .with("price", price)
            .with("updated", replaced))
    }
}

fn extract_close_price(data: &Value) -> Option<f64> {
    let rows = data.get("OutBlock_1").and_then(Value::as_array)?;
    for item in rows {
        let name = item.get("IDX_NM").and_then(Value::as_str);
        if matches!(name, Some("코스피") | Some("코스닥")) {
            return item
                .get("CLSPRC_IDX")
                .and_then(Value::as_str)
                .and_then(|s| s.replace(',', "").parse::<f64>().ok());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_previous_month() {
        assert_eq!(previous_month(date(2025, 8, 23)), date(2025, 7, 1));
        assert_eq!(previous_month(date(2025, 1, 5)), date(2024, 12, 1));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2025, 2), date(2025, 2, 28));
        assert_eq!(last_day_of_month(2024, 2), date(2024, 2, 29));
        assert_eq!(last_day_of_month(2025, 12), date(2025, 12, 31));
    }

    #[test]
    fn test_extract_close_price_matches_index_row() {
        let data = json!({
            "OutBlock_1": [
                { "IDX_NM": "코스피 200", "CLSPRC_IDX": "350.12" },
                { "IDX_NM": "코스피", "CLSPRC_IDX": "2,687.44" }
            ]
        });
        assert_eq!(extract_close_price(&data), Some(2687.44));
    }

    #[test]
    fn test_extract_close_price_no_match() {
        let data = json!({ "OutBlock_1": [ { "IDX_NM": "코스피 200", "CLSPRC_IDX": "1" } ] });
        assert_eq!(extract_close_price(&data), None);
        assert_eq!(extract_close_price(&json!({})), None);
    }
}
