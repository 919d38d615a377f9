//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Skipbin - a recycle bin for the command line.
#[derive(Debug, Parser)]
#[command(name = "skipbin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Trash root directory (overrides the config file)
    #[arg(short, long, global = true, env = "SKIPBIN_BASE")]
    pub base: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Move files into the bin
    Trash {
        /// Files or directories to trash
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Restore files from the bin to their original paths
    Restore {
        /// Original paths to restore
        paths: Vec<PathBuf>,

        /// Restore everything in the bin
        #[arg(long, conflicts_with = "paths")]
        all: bool,
    },

    /// Permanently delete files (tracked or not)
    Delete {
        /// Original paths to delete
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List the contents of the bin, newest first
    List,

    /// Permanently delete everything in the bin
    Empty,

    /// Apply the retention policy now
    Cleanup,

    /// Show bin utilization against the configured limits
    Capacity,
}
