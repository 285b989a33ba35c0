//! Storage layer for days-since.
//!
//! The whole store lives in one plain-text data file (format in
//! [`ds_core::codec`]). Every invocation reads it completely; an invocation
//! that changes anything rewrites it completely.
//!
//! # Backups
//!
//! Before a rewrite the current file is copied to `<path>.bak`, replacing the
//! previous backup. This gives one generation of rollback. It is not
//! transactional: a crash during the rewrite can leave a truncated data file,
//! and the backup has to be restored by hand.
//!
//! # Concurrency
//!
//! There is no locking. Two invocations writing the same file race and the
//! last writer wins.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use ds_core::{Store, StoreError};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The data file does not exist.
    #[error("data file {} not found (run 'ds init' to create it)", .path.display())]
    Missing { path: PathBuf },
    /// A filesystem operation failed.
    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The data file is malformed, or encoding it failed.
    #[error("failed to {action} entries in {}", .path.display())]
    Store {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: StoreError,
    },
}

/// Handle to the data file and its backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    path: PathBuf,
    backup_path: PathBuf,
}

impl Database {
    /// Binds to the data file at `path`. Nothing is opened yet.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup_path = backup_path_for(&path);
        Self { path, backup_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Reads the whole store.
    pub fn load(&self) -> Result<Store, DbError> {
        let file = File::open(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                DbError::Missing {
                    path: self.path.clone(),
                }
            } else {
                self.io_error("open", source)
            }
        })?;
        tracing::debug!(path = %self.path.display(), "loading data file");

        Store::load(BufReader::new(file)).map_err(|source| self.store_error("read", source))
    }

    /// Backs up the current file, then rewrites it with `store`.
    pub fn save(&self, store: &Store) -> Result<(), DbError> {
        self.backup()?;

        let file = File::create(&self.path).map_err(|source| self.io_error("create", source))?;
        store
            .save(BufWriter::new(file))
            .map_err(|source| self.store_error("write", source))?;
        tracing::debug!(path = %self.path.display(), entries = store.len(), "saved data file");
        Ok(())
    }

    /// Creates an empty data file, and its parent directory, if none exists.
    ///
    /// Returns whether a file was created. An existing file is left as is.
    pub fn create(&self) -> Result<bool, DbError> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| DbError::Io {
                action: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.save(&Store::new())?;
        tracing::info!(path = %self.path.display(), "created data file");
        Ok(true)
    }

    /// Copies the current file over the backup. No-op if there is no file yet.
    fn backup(&self) -> Result<(), DbError> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::copy(&self.path, &self.backup_path).map_err(|source| DbError::Io {
            action: "back up to",
            path: self.backup_path.clone(),
            source,
        })?;
        tracing::debug!(backup = %self.backup_path.display(), "backed up data file");
        Ok(())
    }

    fn io_error(&self, action: &'static str, source: io::Error) -> DbError {
        DbError::Io {
            action,
            path: self.path.clone(),
            source,
        }
    }

    fn store_error(&self, action: &'static str, source: StoreError) -> DbError {
        DbError::Store {
            action,
            path: self.path.clone(),
            source,
        }
    }
}

/// `days-since.dat` becomes `days-since.dat.bak`.
fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(OsString::new, ToOwned::to_owned);
    name.push(".bak");
    path.with_file_name(name)
}
