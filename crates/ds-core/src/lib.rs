//! Core domain logic for days-since.
//!
//! This crate contains:
//! - Entries: tracked events with their occurrence history
//! - The line-oriented text codec of the data file
//! - The ordered entry store and its index-stable mutations
//! - Days-since and average-interval statistics

pub mod codec;
mod entry;
mod lookup;
mod stats;
mod store;

pub use codec::{CodecError, DATE_FORMAT};
pub use entry::{Entry, NO_INTERVAL};
pub use lookup::resolve_token;
pub use stats::EntryStats;
pub use store::{Store, StoreError};
