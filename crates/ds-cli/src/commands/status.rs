//! Status command for showing days since each entry.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use ds_db::Database;

use super::report::{self, ReportStyle};
use super::util::load_store;

/// Prints the report without changing anything.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    today: NaiveDate,
    style: ReportStyle,
) -> Result<()> {
    let store = load_store(db)?;
    report::write_report(writer, &store, today, style)
}
