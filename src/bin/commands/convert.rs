use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dock_forge::archive::builder::DEFAULT_CONTACT_PROGRAM;
use dock_forge::archive::{BuildOptions, RunLayout, build_system};

use crate::commands::write_json;

/// Runs the full extraction-and-normalization pipeline over a run directory
/// and emits the normalized system as JSON.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Docking run directory.
    pub rundir: PathBuf,
    /// Output file; stdout when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// External contact-detection executable.
    #[arg(long, default_value = DEFAULT_CONTACT_PROGRAM)]
    pub contact_tool: PathBuf,
}

pub fn run(args: &ConvertArgs) -> Result<()> {
    let layout = RunLayout::new(&args.rundir);
    let options = BuildOptions {
        contact_tool: args.contact_tool.clone(),
    };

    let system = build_system(&layout, &options)
        .with_context(|| format!("Failed to convert run {}", args.rundir.display()))?;

    write_json(&system, args.output.as_deref())
}
