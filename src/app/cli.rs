//! Command-Line Interface

use crate::workflow::Exercise;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rep Analyzer - Count squat and bench press reps and check their form
#[derive(Parser, Debug)]
#[command(name = "rep-analyzer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count and validate reps in a pose sequence
    Analyze {
        /// Exercise performed in the sequence
        #[arg(short, long, value_enum)]
        exercise: Exercise,

        /// Pose sequence JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize a rep report
    Feedback {
        /// Exercise the report was produced for
        #[arg(short, long, value_enum)]
        exercise: Exercise,

        /// Rep report JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Print the coaching prompt instead of the summary
        #[arg(long)]
        prompt: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "squat.movement_threshold", "smoothing.window")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
