use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use dock_forge::archive::builder::DEFAULT_CONTACT_PROGRAM;
use dock_forge::io::{DEFAULT_CONTACT_CUTOFF, read_structure_path};
use dock_forge::ops::{ContactTool, detect_interface, to_ranges};

/// Detects and prints the inter-chain interface of one coordinate file.
#[derive(Debug, Args)]
pub struct InterfaceArgs {
    /// Coordinate file to analyze.
    pub input: PathBuf,
    /// Contact distance cutoff in ångströms.
    #[arg(long, default_value_t = DEFAULT_CONTACT_CUTOFF)]
    pub cutoff: f64,
    /// External contact-detection executable.
    #[arg(long, default_value = DEFAULT_CONTACT_PROGRAM)]
    pub contact_tool: PathBuf,
}

pub fn run(args: &InterfaceArgs) -> Result<()> {
    let structure = read_structure_path(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let tool = ContactTool::new(&args.contact_tool);
    let contacts = tool
        .run(&args.input, args.cutoff)
        .context("Contact detection failed")?;
    let interface = detect_interface(&structure, &contacts)
        .context("Failed to back-map contacts to stable numbering")?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Chain", "Interface Residues", "Ranges"]);
    for (chain, residues) in interface.iter() {
        let ranges = to_ranges(residues)
            .iter()
            .map(|(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{start}-{end}")
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(row![chain, residues.len(), ranges]);
    }
    table.printstd();

    Ok(())
}
