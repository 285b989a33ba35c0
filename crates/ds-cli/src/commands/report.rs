//! Status report rendering.
//!
//! Every command that touches the store finishes by printing this report, so
//! the effect of a change is visible immediately. The human-readable form is a
//! fixed-width table; `--json` prints the same rows as a JSON array.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use ds_core::{Entry, EntryStats, Store};

/// Which figure fills the last table column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountColumn {
    /// Occurrences used as the average's divisor.
    #[default]
    Count,
    /// The stored target interval in days.
    Target,
}

impl CountColumn {
    const fn heading(self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::Target => "Target",
        }
    }

    fn value(self, stats: &EntryStats) -> i64 {
        match self {
            Self::Count => i64::from(stats.effective_count),
            Self::Target => stats.target_days,
        }
    }
}

/// How the report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStyle {
    pub json: bool,
    pub column: CountColumn,
}

impl ReportStyle {
    pub const fn from_flags(json: bool, target: bool) -> Self {
        let column = if target {
            CountColumn::Target
        } else {
            CountColumn::Count
        };
        Self { json, column }
    }
}

/// One report row for JSON output.
#[derive(Debug, Serialize)]
pub struct JsonEntry<'a> {
    pub index: usize,
    pub name: &'a str,
    pub start_date: NaiveDate,
    pub last_time: NaiveDate,
    pub num_times: u32,
    pub interval_days: i64,
    pub days_since: i64,
    pub average_interval: f64,
    pub effective_count: u32,
    pub trend_adjusted: bool,
}

impl<'a> JsonEntry<'a> {
    fn new(entry: &'a Entry, stats: EntryStats) -> Self {
        Self {
            index: entry.index,
            name: &entry.name,
            start_date: entry.start_date,
            last_time: entry.last_time,
            num_times: entry.num_times,
            interval_days: entry.interval_days,
            days_since: stats.days_since,
            average_interval: stats.average_interval,
            effective_count: stats.effective_count,
            trend_adjusted: stats.trend_adjusted,
        }
    }
}

/// Writes the report for `store` as of `today`.
pub fn write_report<W: Write>(
    writer: &mut W,
    store: &Store,
    today: NaiveDate,
    style: ReportStyle,
) -> Result<()> {
    if style.json {
        writeln!(writer, "{}", format_report_json(store, today)?)?;
    } else {
        write_table(writer, store, today, style.column)?;
    }
    Ok(())
}

/// Writes the fixed-width table, one row per entry.
pub fn write_table<W: Write>(
    writer: &mut W,
    store: &Store,
    today: NaiveDate,
    column: CountColumn,
) -> std::io::Result<()> {
    if store.is_empty() {
        writeln!(writer, "No entries tracked.")?;
        writeln!(writer, "Hint: Run 'ds add <name>' to start tracking something.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:>3} {:>20}: {:>10} {:>10} {:>10}",
        "#",
        "Name",
        "Days",
        "Avg",
        column.heading()
    )?;
    for entry in store {
        let stats = EntryStats::compute(entry, today);
        writeln!(
            writer,
            "{:>3} {:>20}: {:>10} {:>10.1} {:>10}",
            entry.index,
            entry.name,
            stats.days_since,
            stats.average_interval,
            column.value(&stats)
        )?;
    }
    Ok(())
}

/// Formats the report as a pretty-printed JSON array.
pub fn format_report_json(store: &Store, today: NaiveDate) -> Result<String> {
    let rows: Vec<JsonEntry<'_>> = store
        .iter()
        .map(|entry| JsonEntry::new(entry, EntryStats::compute(entry, today)))
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
