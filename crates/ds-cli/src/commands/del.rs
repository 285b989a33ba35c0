//! Del command for stopping tracking of an entry.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use ds_db::Database;

use super::report::ReportStyle;
use super::util::{load_store, report_and_save};

/// Deletes the entry named or numbered by `token`; later entries move up.
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
        .with_context(|| format!("cannot delete {token:?}"))?;
    let removed = store.delete(index)?;
    tracing::info!(index, name = %removed.name, "deleted entry");
    if !style.json {
        writeln!(writer, "Deleted #{index}: {}", removed.name)?;
    }

    report_and_save(writer, db, &store, today, style)
}
