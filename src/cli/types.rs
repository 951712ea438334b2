//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::init::InitArgs;
use crate::infrastructure::config::DEFAULT_CONFIG_FILE;

const LONG_ABOUT: &str = concat!(
    "Crawls SGA! Configure with a .sgacrawl.yaml file!\n\n\tExample of file:\n\n",
    include_str!("example.yaml"),
    "\n\n# You can copy the text above to a text editor and save it to have a config file up and running."
);

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "sgacrawl")]
#[command(about = "Saves all classes and career plans in a structured JSON file")]
#[command(long_about = LONG_ABOUT)]
#[command(version)]
pub struct Cli {
    /// Command to run; `check` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file. Should be in working directory
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, Default)]
pub enum Commands {
    /// Validate the configuration and print it in canonical form (default)
    #[default]
    Check,

    /// Print an example configuration file
    Example,

    /// Write the example configuration file
    Init(InitArgs),
}
