use std::fmt;

use chrono::{Days, NaiveDate, Utc};

/// Inclusive calendar-day window sent to the provider as `from`/`to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day of the window.
    pub from: NaiveDate,
    /// Last day of the window (usually "today").
    pub to: NaiveDate,
}

impl DateRange {
    /// The window ending on `today` and starting `days` calendar days earlier.
    ///
    /// Subtracts calendar days, not `days * 24h`, so DST and leap days do not
    /// shift the start.
    pub fn lookback(days: u64, today: NaiveDate) -> Self {
        let from = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { from, to: today }
    }

    /// [`lookback`](Self::lookback) from the current UTC date.
    pub fn lookback_from_now(days: u64) -> Self {
        Self::lookback(days, Utc::now().date_naive())
    }

    /// `from` as `YYYY-MM-DD`.
    pub fn from_param(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    /// `to` as `YYYY-MM-DD`.
    pub fn to_param(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from_param(), self.to_param())
    }
}
