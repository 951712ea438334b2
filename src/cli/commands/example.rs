//! Implementation of the `sgacrawl example` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::EXAMPLE_CONFIG;
use crate::infrastructure::config::DEFAULT_CONFIG_FILE;

/// Result of `sgacrawl example`.
#[derive(Debug, Serialize)]
pub struct ExampleOutput {
    /// Name the file is expected under
    pub file_name: &'static str,
    /// Example YAML
    pub content: &'static str,
}

impl CommandOutput for ExampleOutput {
    fn to_human(&self) -> String {
        self.content.trim_end().to_string()
    }
}

/// Print the example configuration.
pub fn execute(json_mode: bool) -> Result<()> {
    output(
        &ExampleOutput {
            file_name: DEFAULT_CONFIG_FILE,
            content: EXAMPLE_CONFIG,
        },
        json_mode,
    );
    Ok(())
}
