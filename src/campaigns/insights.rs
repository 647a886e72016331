//! Performance metrics over a trailing date window.

use chrono::{Duration, Local, NaiveDate};

/// Inclusive date range for an insights query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateRange {
    /// Trailing window of `days` days ending today.
    pub fn lookback(days: u32) -> Self {
        let until = Local::now().date_naive();
        let since = until - Duration::days(i64::from(days));
        Self { since, until }
    }

    /// Start date in the `YYYY-MM-DD` form the API expects.
    pub fn since_str(&self) -> String {
        self.since.format("%Y-%m-%d").to_string()
    }

    /// End date in the `YYYY-MM-DD` form the API expects.
    pub fn until_str(&self) -> String {
        self.until.format("%Y-%m-%d").to_string()
    }
}

/// Aggregated performance metrics for one campaign over a date range.
///
/// A read-only snapshot fetched per run; `spend` is in major currency
/// units as the API reports it, `conversions` is the sum of conversion
/// action values over the window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightWindow {
    /// Total spend in major currency units
    pub spend: f64,

    /// Sum of conversion action values
    pub conversions: u64,

    /// Impression count
    pub impressions: u64,

    /// Click count
    pub clicks: u64,
}

impl InsightWindow {
    /// Cost per acquisition: spend divided by conversions.
    ///
    /// Undefined (`None`) when there are no conversions; callers report
    /// that distinctly rather than dividing by zero.
    pub fn cpa(&self) -> Option<f64> {
        if self.conversions == 0 {
            None
        } else {
            Some(self.spend / self.conversions as f64)
        }
    }
}
