//! Init command for creating the data file.

use std::io::Write;

use anyhow::{Context, Result};

use ds_db::Database;

/// Creates an empty data file unless one already exists.
pub fn run<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let created = db
        .create()
        .with_context(|| format!("failed to create {}", db.path().display()))?;

    if created {
        writeln!(writer, "Created {}", db.path().display())?;
    } else {
        writeln!(writer, "Data file already exists: {}", db.path().display())?;
    }
    Ok(())
}
