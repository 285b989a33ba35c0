//! CLI subcommand implementations.

pub mod add;
pub mod del;
pub mod init;
pub mod report;
pub mod reset;
pub mod status;
mod util;
