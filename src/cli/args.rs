//! Command-line argument parsing for adkit
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// adkit - Campaign tooling for the Meta Marketing API
#[derive(Parser, Debug)]
#[command(name = "adkit")]
#[command(version)]
#[command(about = "List, create, and budget-adjust Meta ad campaigns", long_about = None)]
pub struct Args {
    /// Configuration file path (default: ~/.adkit/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (summary and errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List campaigns with optional performance insights
    List {
        /// Ad account id (bare numeric or act_-prefixed, any case)
        #[arg(long)]
        account_id: String,

        /// Maximum number of campaigns to retrieve (default from config: 100)
        #[arg(long)]
        limit: Option<usize>,

        /// CSV export path (default from config: campaigns.csv)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Include spend/impressions/clicks over the lookback window
        #[arg(long)]
        show_insights: bool,

        /// Days of performance data for --show-insights (default from config: 7)
        #[arg(long)]
        lookback: Option<u32>,
    },

    /// Create campaigns from a JSON configuration file
    Create {
        /// Ad account id (bare numeric or act_-prefixed, any case)
        #[arg(long)]
        account_id: String,

        /// Path to a JSON array of campaign definitions
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Adjust daily budgets of active campaigns by a fixed percentage
    Adjust {
        /// Ad account id (bare numeric or act_-prefixed, any case)
        #[arg(long)]
        account_id: String,

        /// Budget adjustment percentage; negative values decrease budgets
        /// (default from config: 10)
        #[arg(long, allow_hyphen_values = true)]
        adjustment: Option<i32>,

        /// Days of performance data to analyze (default from config: 7)
        #[arg(long)]
        lookback: Option<u32>,
    },

    /// Display the effective configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose > 0 {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

impl Verbosity {
    /// Check if per-campaign detail should be printed
    pub fn show_detail(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if progress indicators should be shown
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
