//! Tracked events and their occurrence history.

use chrono::NaiveDate;

/// Sentinel for [`Entry::interval_days`] on freshly added entries.
pub const NO_INTERVAL: i64 = -1;

/// One tracked recurring event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Position of this entry in its store. Not persisted.
    pub index: usize,
    /// Display name; lookups match it exactly.
    pub name: String,
    /// Day the event was first recorded.
    pub start_date: NaiveDate,
    /// Completed occurrences.
    pub num_times: u32,
    /// Target interval carried through from the data file.
    ///
    /// Not used by the statistics computation. [`NO_INTERVAL`] means unset.
    pub interval_days: i64,
    /// Day of the most recent occurrence.
    pub last_time: NaiveDate,
}

impl Entry {
    /// Creates an entry first done on `today`.
    pub fn new(index: usize, name: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            index,
            name: name.into(),
            start_date: today,
            num_times: 1,
            interval_days: NO_INTERVAL,
            last_time: today,
        }
    }

    /// Records another occurrence on `today`.
    pub fn record(&mut self, today: NaiveDate) {
        self.num_times = self.num_times.saturating_add(1);
        self.last_time = today;
    }
}
