//! Reset command for recording that an entry was done today.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use ds_db::Database;

use super::report::ReportStyle;
use super::util::{load_store, report_and_save};

/// Records an occurrence of the entry named or numbered by `token`.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    token: &str,
    today: NaiveDate,
    style: ReportStyle,
) -> Result<()> {
    let mut store = load_store(db)?;
    let index = store
        .find_by_token(token)
        .with_context(|| format!("cannot reset {token:?}"))?;
    let entry = store.reset(index, today)?;
    tracing::info!(index, name = %entry.name, num_times = entry.num_times, "reset entry");
    if !style.json {
        writeln!(
            writer,
            "Reset #{index}: {} (done {} times)",
            entry.name, entry.num_times
        )?;
    }

    report_and_save(writer, db, &store, today, style)
}
