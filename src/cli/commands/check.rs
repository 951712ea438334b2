//! Implementation of the `sgacrawl check` command.

use anyhow::Result;
use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::application::prepare;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::CrawlConfig;
use crate::services::config_gate::ConfigWarning;

/// Result of `sgacrawl check`.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    /// Always true; failures exit through the error path
    pub success: bool,
    /// Config file read, if any
    pub config_file: Option<PathBuf>,
    /// Repairs made by the gate
    pub warnings: Vec<ConfigWarning>,
    /// Canonical configuration
    pub config: CrawlConfig,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![match &self.config_file {
            Some(path) => format!("Using config file: {}", path.display()),
            None => "No config file found, using environment only".to_string(),
        }];

        for warning in &self.warnings {
            lines.push(format!("{} {warning}", style("[warn]").yellow()));
        }

        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Key").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ]);
        for (key, value) in self.config.entries() {
            table.add_row(vec![Cell::new(key), Cell::new(value)]);
        }
        lines.push(table.to_string());
        lines.push("Configuration OK".to_string());

        lines.join("\n")
    }
}

/// Validate the configuration and print it.
pub fn execute(config_path: &Path, json_mode: bool) -> Result<()> {
    let session = prepare(config_path)?;

    let output_data = CheckOutput {
        success: true,
        config_file: session.source.clone(),
        warnings: session.warnings().to_vec(),
        config: session.config().clone(),
    };

    output(&output_data, json_mode);
    Ok(())
}
