//! Add command for starting to track a new entry.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use ds_db::Database;

use super::report::ReportStyle;
use super::util::{load_store, report_and_save};

/// Adds an entry first done `today`, then reports and saves.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    name: &str,
    today: NaiveDate,
    style: ReportStyle,
) -> Result<()> {
    let mut store = load_store(db)?;
    let entry = store
        .add(name, today)
        .with_context(|| format!("failed to add {name:?}"))?;
    tracing::info!(index = entry.index, name = %entry.name, "added entry");
    if !style.json {
        writeln!(writer, "Added #{}: {}", entry.index, entry.name)?;
    }

    report_and_save(writer, db, &store, today, style)
}
