//! Days-since CLI library.
//!
//! This crate provides the CLI interface for days-since.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
