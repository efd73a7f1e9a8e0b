use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use dock_forge::io::read_structure_path;

use crate::commands::run_with_spinner;

/// Report-only command that inspects one coordinate file.
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Coordinate file to inspect.
    pub input: PathBuf,
}

/// Prints per-chain statistics and one-letter sequences under stable numbering.
pub fn run(args: &InfoArgs) -> Result<()> {
    let structure = run_with_spinner("Reading coordinate file", || {
        read_structure_path(&args.input)
            .with_context(|| format!("Failed to parse {}", args.input.display()))
    })?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Chain", "Residues", "Atoms", "Sequence"]);
    for chain in structure.iter_chains() {
        table.add_row(row![
            chain.id,
            chain.residue_count(),
            chain.iter_atoms().count(),
            wrap_sequence(&chain.sequence(), 60)
        ]);
    }
    table.printstd();

    Ok(())
}

fn wrap_sequence(sequence: &str, width: usize) -> String {
    sequence
        .as_bytes()
        .chunks(width)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}
