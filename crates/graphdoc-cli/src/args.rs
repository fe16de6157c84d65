//! Command-line argument definitions for the graphdoc CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the subcommand, configuration file, and
//! logging verbosity; path options override the configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the graphdoc documentation tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// The operations the tool offers.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Regenerate documentation for all scripts and packages
    Docs {
        /// Root of the source tree (overrides the configuration)
        #[arg(long)]
        source_root: Option<PathBuf>,

        /// Root of the documentation tree (overrides the configuration)
        #[arg(long)]
        doc_root: Option<PathBuf>,
    },

    /// Report identity inconsistencies without changing any file
    Check {
        /// Root of the source tree (overrides the configuration)
        #[arg(long)]
        source_root: Option<PathBuf>,
    },
}
