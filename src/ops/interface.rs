//! Inter-chain interface detection through the external contact tool.
//!
//! Contact geometry is delegated to a subprocess; this module owns the command
//! boundary (typed request: coordinate file path and cutoff; typed response:
//! contact-pair records) and the translation of the tool's coordinate-file
//! numbering back into the pipeline's stable numbering. All parsing of the
//! tool's text output is isolated in [`parse_contacts`] so the tool could be
//! replaced by an in-process routine without touching callers.

use crate::model::structure::Structure;
use crate::ops::error::Error;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One inter-chain atom contact as reported by the external tool, in the
/// coordinate file's own residue numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub res_a: i32,
    pub chain_a: String,
    pub res_b: i32,
    pub chain_b: String,
}

/// Handle for the external contact-detection executable.
#[derive(Debug, Clone)]
pub struct ContactTool {
    program: PathBuf,
}

impl ContactTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Runs the tool as `<program> <coordinate_file> <cutoff>` and parses its
    /// standard output. A non-zero exit, non-UTF-8 output, or a malformed
    /// record is fatal; there are no retries.
    pub fn run(&self, coordinate_file: &Path, cutoff: f64) -> Result<Vec<Contact>, Error> {
        log::debug!(
            "running {} {} {}",
            self.program.display(),
            coordinate_file.display(),
            cutoff
        );
        let output = Command::new(&self.program)
            .arg(coordinate_file)
            .arg(cutoff.to_string())
            .output()
            .map_err(|e| Error::ContactToolLaunch {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(Error::ContactToolFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| Error::contact_output("output is not valid UTF-8"))?;

        parse_contacts(&stdout)
    }
}

/// Parses the contact tool's standard output: one record per line, 7
/// whitespace-separated fields `res_a chain_a _ res_b chain_b _ _`. Blank
/// lines are skipped; anything else malformed is fatal.
pub fn parse_contacts(stdout: &str) -> Result<Vec<Contact>, Error> {
    let mut contacts = Vec::new();

    for line in stdout.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 7 {
            return Err(Error::contact_output(format!(
                "expected 7 fields, found {} in '{}'",
                fields.len(),
                line
            )));
        }

        let res_a = fields[0]
            .parse::<i32>()
            .map_err(|_| Error::contact_output(format!("invalid residue number '{}'", fields[0])))?;
        let res_b = fields[3]
            .parse::<i32>()
            .map_err(|_| Error::contact_output(format!("invalid residue number '{}'", fields[3])))?;

        contacts.push(Contact {
            res_a,
            chain_a: fields[1].to_string(),
            res_b,
            chain_b: fields[4].to_string(),
        });
    }

    Ok(contacts)
}

/// Per-chain deduplicated interface residues, in order of first discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceSet {
    chains: Vec<(String, Vec<usize>)>,
}

impl InterfaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interface residues (stable indices) of one chain, if any were found.
    pub fn chain(&self, id: &str) -> Option<&[usize]> {
        self.chains
            .iter()
            .find(|(chain, _)| chain == id)
            .map(|(_, residues)| residues.as_slice())
    }

    /// Iterates chains in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.chains
            .iter()
            .map(|(chain, residues)| (chain.as_str(), residues.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    fn entry(&mut self, id: &str) -> &mut Vec<usize> {
        if let Some(index) = self.chains.iter().position(|(chain, _)| chain == id) {
            &mut self.chains[index].1
        } else {
            self.chains.push((id.to_string(), Vec::new()));
            &mut self
                .chains
                .last_mut()
                .unwrap_or_else(|| unreachable!("entry was just pushed"))
                .1
        }
    }

    fn insert(&mut self, id: &str, seq_id: usize) {
        let residues = self.entry(id);
        if !residues.contains(&seq_id) {
            residues.push(seq_id);
        }
    }
}

/// Back-maps contact records into an [`InterfaceSet`] keyed by stable indices.
///
/// Both chains of every contact get an interface entry (created empty on first
/// reference); each residue is mapped through the chain's stable-numbering map
/// and inserted once. A contact naming a chain or residue absent from the
/// structure is a fatal consistency error, never silently dropped.
pub fn detect_interface(
    structure: &Structure,
    contacts: &[Contact],
) -> Result<InterfaceSet, Error> {
    let mut interface = InterfaceSet::new();

    for contact in contacts {
        interface.entry(&contact.chain_a);
        interface.entry(&contact.chain_b);

        let seq_a = backmap(structure, &contact.chain_a, contact.res_a)?;
        interface.insert(&contact.chain_a, seq_a);

        let seq_b = backmap(structure, &contact.chain_b, contact.res_b)?;
        interface.insert(&contact.chain_b, seq_b);
    }

    Ok(interface)
}

fn backmap(structure: &Structure, chain_id: &str, source_number: i32) -> Result<usize, Error> {
    let chain = structure.chain(chain_id).ok_or_else(|| Error::UnknownChain {
        chain: chain_id.to_string(),
    })?;
    chain
        .seq_of_source(source_number)
        .ok_or_else(|| Error::UnmappedContact {
            chain: chain_id.to_string(),
            residue: source_number,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::residue::Residue;

    fn two_chain_structure() -> Structure {
        let mut structure = Structure::new();
        let chain_a = structure.chain_or_insert("A");
        chain_a.add_residue(Residue::new(1, 10, "ALA"));
        chain_a.add_residue(Residue::new(2, 14, "GLY"));
        let chain_b = structure.chain_or_insert("B");
        chain_b.add_residue(Residue::new(1, 3, "LYS"));
        structure
    }

    #[test]
    fn parse_contacts_reads_seven_field_records() {
        let stdout = "10 A CA 3 B CB 4.52\n14 A N 3 B O 3.80\n";
        let contacts = parse_contacts(stdout).unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(
            contacts[0],
            Contact {
                res_a: 10,
                chain_a: "A".to_string(),
                res_b: 3,
                chain_b: "B".to_string(),
            }
        );
    }

    #[test]
    fn parse_contacts_skips_blank_lines() {
        let stdout = "\n10 A CA 3 B CB 4.52\n\n";
        let contacts = parse_contacts(stdout).unwrap();
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn parse_contacts_rejects_wrong_field_count() {
        let result = parse_contacts("10 A CA 3 B\n");
        assert!(matches!(result, Err(Error::ContactOutput { .. })));
    }

    #[test]
    fn parse_contacts_rejects_non_numeric_residues() {
        let result = parse_contacts("xx A CA 3 B CB 4.52\n");
        assert!(matches!(result, Err(Error::ContactOutput { .. })));
    }

    #[test]
    fn detect_interface_backmaps_and_deduplicates() {
        let structure = two_chain_structure();
        // Two atom-level contacts between the same residue pair, plus one more.
        let stdout = "10 A CA 3 B CB 4.52\n10 A N 3 B O 4.90\n14 A CA 3 B CB 4.10\n";
        let contacts = parse_contacts(stdout).unwrap();
        let interface = detect_interface(&structure, &contacts).unwrap();

        assert_eq!(interface.chain("A"), Some(&[1, 2][..]));
        assert_eq!(interface.chain("B"), Some(&[1][..]));
    }

    #[test]
    fn detect_interface_preserves_discovery_order() {
        let structure = two_chain_structure();
        let stdout = "14 A CA 3 B CB 4.10\n10 A CA 3 B CB 4.52\n";
        let contacts = parse_contacts(stdout).unwrap();
        let interface = detect_interface(&structure, &contacts).unwrap();

        assert_eq!(interface.chain("A"), Some(&[2, 1][..]));
    }

    #[test]
    fn detect_interface_rejects_unmapped_residue() {
        let structure = two_chain_structure();
        let contacts = parse_contacts("99 A CA 3 B CB 4.52\n").unwrap();
        let result = detect_interface(&structure, &contacts);

        assert!(matches!(
            result,
            Err(Error::UnmappedContact { residue: 99, .. })
        ));
    }

    #[test]
    fn detect_interface_rejects_unknown_chain() {
        let structure = two_chain_structure();
        let contacts = parse_contacts("10 A CA 5 Z CB 4.52\n").unwrap();
        let result = detect_interface(&structure, &contacts);

        assert!(matches!(result, Err(Error::UnknownChain { .. })));
    }
}
