//! Normalized `{x: period, y: value}` time series and the reshaping rules
//! for the statistics connectors.
//!
//! Quarterly sources land their value on the quarter-end month and pad the
//! two leading months with `y: null`, so every series shares one monthly
//! axis. Unparseable rows are skipped, never fatal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One observation of a monthly series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Period code, "YYYY-MM".
    pub x: String,
    /// Observation value; `None` for padded quarter-lead months.
    pub y: Option<f64>,
}

impl SeriesPoint {
    /// Create an observation.
    pub fn new(x: impl Into<String>, y: Option<f64>) -> Self {
        Self { x: x.into(), y }
    }
}

/// Observation cycle of an ECOS statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// Monthly ("M")
    Monthly,
    /// Quarterly ("Q")
    Quarterly,
}

impl Cycle {
    /// API code for the cycle.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Monthly => "M",
            Self::Quarterly => "Q",
        }
    }

    /// Default query start period for the cycle.
    pub fn default_start(&self) -> &'static str {
        match self {
            Self::Monthly => "199601",
            Self::Quarterly => "1996Q1",
        }
    }

    /// Query end period covering `today`.
    pub fn end_for(&self, today: NaiveDate) -> String {
        use chrono::Datelike;
        match self {
            Self::Monthly => format!("{}{:02}", today.year(), today.month()),
            Self::Quarterly => {
                let quarter = (today.month() - 1) / 3 + 1;
                format!("{}Q{}", today.year(), quarter)
            }
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn parse_value(item: &Value, key: &str) -> Option<f64> {
    match item.get(key) {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => Some(0.0),
    }
}

/// Reshape an ECOS `StatisticSearch` response into a monthly series.
///
/// Monthly rows ("202405") map directly; quarterly rows ("2003Q1") emit two
/// null-padded months followed by the quarter-end value.
pub fn from_ecos_response(data: &Value) -> Vec<SeriesPoint> {
    let rows = data
        .pointer("/StatisticSearch/row")
        .and_then(Value::as_array);

    let mut result = Vec::new();
    for item in rows.into_iter().flatten() {
        let time = item
            .get("TIME")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .replace([' '], "")
            .replace('년', "")
            .replace('월', "");

        if let Some(q_pos) = time.find('Q') {
            // Quarterly: "2003Q1". Slicing by byte range would panic on a
            // multibyte TIME, so take the year prefix boundary-checked.
            let Some(year_str) = time.get(..4) else {
                continue;
            };
            let (Ok(year), Ok(quarter)) = (
                year_str.parse::<i32>(),
                time[q_pos + 1..].parse::<u32>(),
            ) else {
                continue;
            };
            if !(1..=4).contains(&quarter) {
                continue;
            }
            let Some(value) = parse_value(item, "DATA_VALUE") else {
                continue;
            };
            let month_end = quarter * 3;
            for month in month_end - 2..month_end {
                result.push(SeriesPoint::new(format!("{}-{:02}", year, month), None));
            }
            result.push(SeriesPoint::new(
                format!("{}-{:02}", year, month_end),
                Some(round1(value)),
            ));
        } else {
            // Monthly: "202405"
            let Ok(date) = NaiveDate::parse_from_str(&format!("{}01", time), "%Y%m%d") else {
                continue;
            };
            let Some(value) = parse_value(item, "DATA_VALUE") else {
                continue;
            };
            result.push(SeriesPoint::new(
                date.format("%Y-%m").to_string(),
                Some(round1(value)),
            ));
        }
    }

    result.sort_by(|a, b| a.x.cmp(&b.x));
    result
}

/// Reshape a REB `SttsApiTblData` response into a monthly series.
pub fn from_reb_response(data: &Value) -> Vec<SeriesPoint> {
    let rows = data
        .get("SttsApiTblData")
        .and_then(Value::as_array)
        .and_then(|tables| tables.get(1))
        .and_then(|t| t.get("row"))
        .and_then(Value::as_array);

    let mut result = Vec::new();
    for item in rows.into_iter().flatten() {
        let time = item
            .get("WRTTIME_DESC")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .replace([' '], "")
            .replace('년', "-")
            .replace('월', "");

        let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", time), "%Y-%m-%d") else {
            continue;
        };
        let Some(value) = parse_value(item, "DTA_VAL") else {
            continue;
        };
        result.push(SeriesPoint::new(
            date.format("%Y-%m").to_string(),
            Some(round1(value)),
        ));
    }

    result.sort_by(|a, b| a.x.cmp(&b.x));
    result
}

/// Insert or replace the observation for `point.x`, keeping the series
/// sorted by period. Returns true when an existing point was replaced.
pub fn upsert(series: &mut Vec<SeriesPoint>, point: SeriesPoint) -> bool {
    let replaced = if let Some(existing) = series.iter_mut().find(|p| p.x == point.x) {
        existing.y = point.y;
        true
    } else {
        series.push(point);
        false
    };
    series.sort_by(|a, b| a.x.cmp(&b.x));
    replaced
}
