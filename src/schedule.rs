//! Release calendar for monetary-policy publications.
//!
//! Reports appear on fixed dates; a job invocation has to work out which
//! report month, if any, is available today. The availability lag between
//! the meeting date and the downloadable PDF differs per document variant
//! and is configuration, not a constant.

use chrono::{Datelike, Duration, NaiveDate};

/// Monetary Policy Board publication dates as (month, day).
pub const MPB_PUBLISH_DATES: [(u32, u32); 8] = [
    (1, 16),
    (2, 25),
    (4, 17),
    (5, 29),
    (7, 10),
    (8, 28),
    (10, 23),
    (11, 27),
];

/// A fixed-date release calendar with a per-variant availability lag.
#[derive(Debug, Clone)]
pub struct ReleaseCalendar {
    dates: Vec<(u32, u32)>,
    lag_days: i64,
}

impl ReleaseCalendar {
    /// Create a calendar from (month, day) publish dates.
    pub fn new(dates: Vec<(u32, u32)>, lag_days: i64) -> Self {
        Self { dates, lag_days }
    }

    /// The Monetary Policy Board calendar with the given lag.
    pub fn monetary_policy(lag_days: i64) -> Self {
        Self::new(MPB_PUBLISH_DATES.to_vec(), lag_days)
    }

    /// The latest report month whose release (plus lag) is not after
    /// `today`, or `None` before the first release of the year.
    pub fn target_month(&self, today: NaiveDate) -> Option<u32> {
        let mut releases: Vec<(u32, NaiveDate)> = self
            .dates
            .iter()
            .filter_map(|&(month, day)| {
                NaiveDate::from_ymd_opt(today.year(), month, day)
                    .map(|date| (month, date + Duration::days(self.lag_days)))
            })
            .collect();
        releases.sort_by_key(|&(_, available)| available);

        let mut target = None;
        for (month, available) in releases {
            if today >= available {
                target = Some(month);
            } else {
                break;
            }
        }
        target
    }

    /// Period code (`YYYY-MM`) for the target report month, if any.
    pub fn period_code(&self, today: NaiveDate) -> Option<String> {
        self.target_month(today)
            .map(|month| format!("{}-{:02}", today.year(), month))
    }
}

/// How a release-page filename is matched against the target period.
///
/// The two summarization variants drifted apart here; both strategies are
/// kept as per-variant configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameRule {
    /// Two-digit year + two-digit month, e.g. "2506".
    ShortCode,
    /// Literal Korean year-month substring, e.g. "(2025.6월".
    KoreanYearMonth,
}

impl FilenameRule {
    /// Whether `filename` refers to the (year, month) report.
    pub fn matches(&self, filename: &str, year: i32, month: u32) -> bool {
        match self {
            Self::ShortCode => {
                let code = format!("{:02}{:02}", year.rem_euclid(100), month);
                filename.contains(&code)
            }
            Self::KoreanYearMonth => {
                let needle = format!("({}.{}월", year, month);
                filename.contains(&needle)
            }
        }
    }
}
