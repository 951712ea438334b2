//! Human and JSON rendering of command results.

use serde::Serialize;

/// A command result printable for people or as JSON.
pub trait CommandOutput: Serialize {
    /// Plain-text rendering
    fn to_human(&self) -> String;

    /// JSON rendering
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print a command result on stdout in the requested mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    let rendered = if json_mode {
        serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
    } else {
        result.to_human()
    };
    println!("{rendered}");
}
