//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Days since you last did things.
///
/// Tracks a small list of recurring events and reports, for each, how many
/// days have passed since it was last done and the average interval between
/// occurrences. Without a command, prints the report.
#[derive(Debug, Parser)]
#[command(name = "ds", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Show each entry's stored target interval instead of its count.
    #[arg(long, global = true)]
    pub target: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show days since each entry.
    Status,

    /// Start tracking a new entry, first done today.
    Add {
        /// Name of the entry.
        name: String,
    },

    /// Record that an entry was done today.
    Reset {
        /// Entry name, or its index in the report.
        entry: String,
    },

    /// Stop tracking an entry.
    Del {
        /// Entry name, or its index in the report.
        entry: String,
    },

    /// Create an empty data file if none exists.
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_parses() {
        let cli = Cli::try_parse_from(["ds"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["ds", "reset", "3", "--json", "--target"]).unwrap();
        assert!(cli.json);
        assert!(cli.target);
        assert!(matches!(cli.command, Some(Commands::Reset { entry }) if entry == "3"));
    }

    #[test]
    fn test_add_requires_name() {
        let err = Cli::try_parse_from(["ds", "add"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        let err = Cli::try_parse_from(["ds", "frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_short_help_is_a_help_request() {
        let err = Cli::try_parse_from(["ds", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
