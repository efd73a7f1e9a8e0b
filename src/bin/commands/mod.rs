use std::fs::File;
use std::io::{self as stdio, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;

pub mod convert;
pub mod info;
pub mod interface;
pub mod rank;

/// Wraps long-running operations with a spinner rendered to stderr. The
/// spinner is suppressed when stderr is not a terminal (logs and pipes stay
/// clean).
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    if !stdio::stderr().is_terminal() {
        return work();
    }

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}

/// Serializes a value as pretty JSON to the given path, or to stdout when no
/// path is configured.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
            writer.write_all(b"\n").context("Failed to finish output")?;
            writer.flush().context("Failed to flush output writer")?;
        }
        None => {
            let stdout = stdio::stdout();
            let handle = stdout.lock();
            let mut writer = BufWriter::new(handle);
            serde_json::to_writer_pretty(&mut writer, value)
                .context("Failed to write JSON to stdout")?;
            writer.write_all(b"\n").context("Failed to finish output")?;
            writer.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
