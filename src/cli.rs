//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Field name reported to the lookup service when none is given.
pub const DEFAULT_FIELD: &str = "dc.contributor.author";

/// Look up author identities in the ORCID public registry.
///
/// Names use the form "Lastname, Firstname(s)".
#[derive(Parser, Debug)]
#[command(name = "orcid-lookup")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (defaults to $XDG_CONFIG_HOME/orcid-lookup/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Search endpoint base URL
    #[arg(long, value_name = "URL", global = true)]
    pub search_url: Option<String>,

    /// Reverse lookup endpoint base URL (enables remote label resolution)
    #[arg(long, value_name = "URL", global = true)]
    pub reverse_url: Option<String>,

    /// Connection timeout in seconds (1-3600)
    #[arg(long, value_name = "SECS", global = true, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Lookup operations.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List every candidate matching a name
    Matches {
        /// Name in "Lastname, Firstname(s)" form
        name: String,

        /// Index of the first candidate to return
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Maximum candidates to return (0 for no limit)
        #[arg(long, default_value_t = 0)]
        limit: usize,

        /// Metadata field being matched
        #[arg(long, default_value = DEFAULT_FIELD)]
        field: String,
    },

    /// Show the single best candidate for a name
    Best {
        /// Name in "Lastname, Firstname(s)" form
        name: String,

        /// Metadata field being matched
        #[arg(long, default_value = DEFAULT_FIELD)]
        field: String,
    },

    /// Resolve an authority key to its display label
    Label {
        /// Authority key (ORCID iD)
        key: String,

        /// Metadata field being matched
        #[arg(long, default_value = DEFAULT_FIELD)]
        field: String,
    },
}
