use super::atom::Atom;
use super::types::{AminoAcid, FALLBACK_ONE_LETTER};
use smol_str::SmolStr;
use std::fmt;

/// A residue under the pipeline's stable numbering.
///
/// `seq_id` is the 1-based position assigned in file order of first appearance
/// within the owning chain; `source_number` is the residue number literally
/// written in the coordinate file. A residue is created the first time its
/// `(chain, source_number)` pair is seen and only accumulates atoms afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub seq_id: usize,
    pub source_number: i32,
    /// Raw three-letter residue name from the coordinate file.
    pub name: SmolStr,
    /// Standard amino-acid identity, when the name is in the table.
    pub amino_acid: Option<AminoAcid>,
    atoms: Vec<Atom>,
}

impl Residue {
    pub fn new(seq_id: usize, source_number: i32, name: &str) -> Self {
        Self {
            seq_id,
            source_number,
            name: SmolStr::new(name),
            amino_acid: AminoAcid::from_three_letter(name),
            atoms: Vec::new(),
        }
    }

    /// One-letter code; names outside the standard table fall back to
    /// [`FALLBACK_ONE_LETTER`] rather than failing.
    pub fn one_letter(&self) -> char {
        self.amino_acid
            .map(|aa| aa.one_letter())
            .unwrap_or(FALLBACK_ONE_LETTER)
    }

    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn iter_atoms(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Residue {{ seq_id: {}, source: {}, name: \"{}\", atoms: {} }}",
            self.seq_id,
            self.source_number,
            self.name,
            self.atom_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residue_standard_name_maps_to_one_letter() {
        let residue = Residue::new(1, 42, "LYS");
        assert_eq!(residue.amino_acid, Some(AminoAcid::LYS));
        assert_eq!(residue.one_letter(), 'K');
    }

    #[test]
    fn residue_unknown_name_falls_back() {
        let residue = Residue::new(1, 42, "HEM");
        assert_eq!(residue.amino_acid, None);
        assert_eq!(residue.one_letter(), FALLBACK_ONE_LETTER);
    }
}
