//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

/// docsearch - a keyboard-driven search overlay for documentation sites
#[derive(Parser, Debug)]
#[command(name = "docsearch")]
#[command(version)]
#[command(about = "A keyboard-driven search overlay for documentation sites", long_about = None)]
pub struct Args {
    /// Search endpoint receiving `{query, limit, filters}` as JSON
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Base URL that relative result links are opened under
    #[arg(long)]
    pub site_url: Option<String>,

    /// Scope matches to this page (sent as `page:<NAME>`)
    #[arg(long, value_name = "NAME")]
    pub page: Option<String>,

    /// Scope matches to this library (sent as `library:<NAME>`)
    #[arg(long, value_name = "NAME")]
    pub library: Option<String>,

    /// Quiet period in milliseconds before a query is sent
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Maximum number of results per query
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub limit: Option<u16>,

    /// Read settings from this file instead of the config directory
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}
