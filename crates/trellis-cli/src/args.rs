//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select which catalog diagrams to render, the
//! output root, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Trellis diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Catalog diagrams to render (all when omitted)
    #[arg(value_name = "DIAGRAM")]
    pub diagrams: Vec<String>,

    /// Output root directory; images go to `<OUTPUT_DIR>/diagrams/`
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the catalog diagram names and exit
    #[arg(long)]
    pub list: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
