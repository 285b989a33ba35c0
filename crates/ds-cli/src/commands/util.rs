//! Shared utilities for CLI commands.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use ds_core::Store;
use ds_db::Database;

use super::report::{self, ReportStyle};

/// Loads the store, naming the data file on failure.
pub fn load_store(db: &Database) -> Result<Store> {
    db.load()
        .with_context(|| format!("failed to load {}", db.path().display()))
}

/// Prints the report for a changed store, then backs up and rewrites the file.
pub fn report_and_save<W: Write>(
    writer: &mut W,
    db: &Database,
    store: &Store,
    today: NaiveDate,
    style: ReportStyle,
) -> Result<()> {
    report::write_report(writer, store, today, style)?;
    db.save(store)
        .with_context(|| format!("failed to save {}", db.path().display()))?;
    Ok(())
}
