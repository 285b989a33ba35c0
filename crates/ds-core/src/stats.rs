//! Days-since and average-interval statistics.
//!
//! The average interval is normally the historical span (first to last
//! occurrence) divided by the number of occurrences. When the current gap
//! already exceeds that average the entry is overdue, and the still-open
//! period is folded in: the span runs up to today and counts one extra period.

use chrono::NaiveDate;

use crate::entry::Entry;

/// Display quantities for one entry on a given day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryStats {
    /// Days from the last occurrence to today. Negative if the last
    /// occurrence is in the future.
    pub days_since: i64,
    /// Average days per occurrence.
    pub average_interval: f64,
    /// Occurrence count used as the divisor, never zero.
    pub effective_count: u32,
    /// The stored target interval, passed through unchanged.
    pub target_days: i64,
    /// Whether the overdue rule replaced the historical average.
    pub trend_adjusted: bool,
}

impl EntryStats {
    /// Computes statistics for `entry` as of `now`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "day spans are far below 2^52"
    )]
    pub fn compute(entry: &Entry, now: NaiveDate) -> Self {
        let days_since = (now - entry.last_time).num_days();
        let effective_count = entry.num_times.max(1);

        let history = (entry.last_time - entry.start_date).num_days();
        let mut average_interval = history as f64 / f64::from(effective_count);

        let trend_adjusted = average_interval < days_since as f64;
        if trend_adjusted {
            let open_span = (now - entry.start_date).num_days();
            let periods = f64::from(entry.num_times) + 1.0;
            average_interval = open_span as f64 / periods;
        }

        Self {
            days_since,
            average_interval,
            effective_count,
            target_days: entry.interval_days,
            trend_adjusted,
        }
    }
}
