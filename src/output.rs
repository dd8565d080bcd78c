//! Output formatting and persistence for fetched data.
//!
//! Supports JSON on stdout and JSON written to a file.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use tracing::info;

/// Renders a value as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes a value as pretty-printed JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = to_json(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

/// Writes a value as pretty-printed JSON to `path`, replacing any previous
/// contents.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let json = to_json(value)?;
    fs::write(path, json).with_context(|| format!("failed to write '{path}'"))?;
    info!(path, "JSON written");
    Ok(())
}

/// Sends a value to `path` when one is given, otherwise to stdout.
pub fn emit<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    match path {
        Some(path) => write_json(path, value),
        None => print_json(value),
    }
}
