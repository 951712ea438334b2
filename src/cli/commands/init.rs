//! Implementation of the `sgacrawl init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::cli::EXAMPLE_CONFIG;
use crate::infrastructure::config::DEFAULT_CONFIG_FILE;

/// Arguments of `sgacrawl init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// Result of `sgacrawl init`.
#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    /// Whether the file was written
    pub success: bool,
    /// What happened
    pub message: String,
    /// Target file
    pub config_file: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        format!("{}\n  {}", self.message, self.config_file.display())
    }
}

/// Write the example configuration file.
pub fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let output_data = write_example(&args)?;
    output(&output_data, json_mode);
    Ok(())
}

fn write_example(args: &InitArgs) -> Result<InitOutput> {
    let config_file = args.path.join(DEFAULT_CONFIG_FILE);

    if config_file.exists() && !args.force {
        return Ok(InitOutput {
            success: false,
            message: "Config file already exists. Use --force to overwrite.".to_string(),
            config_file,
        });
    }

    fs::create_dir_all(&args.path)
        .with_context(|| format!("Failed to create {}", args.path.display()))?;
    let existed = config_file.exists();
    fs::write(&config_file, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_file.display()))?;

    Ok(InitOutput {
        success: true,
        message: if existed {
            "Config file overwritten with the example configuration.".to_string()
        } else {
            "Config file created from the example configuration.".to_string()
        },
        config_file,
    })
}
