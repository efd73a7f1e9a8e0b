use super::residue::Residue;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// An ordered run of residues sharing one chain identifier, together with the
/// bidirectional correspondence between stable indices and source numbers.
///
/// The stable index sequence is `1..=N`, strictly increasing with no gaps,
/// independent of the (possibly sparse or restarting) source numbering. The
/// external contact tool speaks source numbers; everything else in the
/// pipeline speaks stable indices, so both directions are kept.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chain {
    pub id: String,
    residues: Vec<Residue>,
    seq_to_source: BTreeMap<usize, i32>,
    source_to_seq: HashMap<i32, usize>,
}

impl Chain {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
            seq_to_source: BTreeMap::new(),
            source_to_seq: HashMap::new(),
        }
    }

    /// Appends a residue and records its stable↔source mapping.
    pub fn add_residue(&mut self, residue: Residue) {
        debug_assert_eq!(
            residue.seq_id,
            self.residues.len() + 1,
            "stable indices must be assigned contiguously in chain '{}'",
            self.id
        );
        debug_assert!(
            !self.source_to_seq.contains_key(&residue.source_number),
            "duplicate source number '{}' in chain '{}'",
            residue.source_number,
            self.id
        );
        self.seq_to_source
            .insert(residue.seq_id, residue.source_number);
        self.source_to_seq
            .insert(residue.source_number, residue.seq_id);
        self.residues.push(residue);
    }

    pub fn residue(&self, seq_id: usize) -> Option<&Residue> {
        self.residues.get(seq_id.checked_sub(1)?)
    }

    pub fn residue_by_source_mut(&mut self, source_number: i32) -> Option<&mut Residue> {
        let seq_id = *self.source_to_seq.get(&source_number)?;
        self.residues.get_mut(seq_id - 1)
    }

    /// Back-maps a source number to its stable index.
    pub fn seq_of_source(&self, source_number: i32) -> Option<usize> {
        self.source_to_seq.get(&source_number).copied()
    }

    /// The stable-index → source-number map, in stable order.
    pub fn auth_seq_map(&self) -> &BTreeMap<usize, i32> {
        &self.seq_to_source
    }

    /// One-letter sequence in stable-index order.
    pub fn sequence(&self) -> String {
        self.residues.iter().map(|r| r.one_letter()).collect()
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn iter_residues(&self) -> std::slice::Iter<'_, Residue> {
        self.residues.iter()
    }

    pub fn iter_atoms(&self) -> impl Iterator<Item = &super::atom::Atom> {
        self.residues.iter().flat_map(|r| r.iter_atoms())
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chain {{ id: \"{}\", residues: {} }}",
            self.id,
            self.residue_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_add_residue_records_both_map_directions() {
        let mut chain = Chain::new("A");
        chain.add_residue(Residue::new(1, 17, "ALA"));
        chain.add_residue(Residue::new(2, 25, "GLY"));

        assert_eq!(chain.seq_of_source(17), Some(1));
        assert_eq!(chain.seq_of_source(25), Some(2));
        assert_eq!(chain.auth_seq_map().get(&1), Some(&17));
        assert_eq!(chain.auth_seq_map().get(&2), Some(&25));
    }

    #[test]
    fn chain_seq_of_source_returns_none_for_unmapped() {
        let mut chain = Chain::new("A");
        chain.add_residue(Residue::new(1, 17, "ALA"));

        assert_eq!(chain.seq_of_source(99), None);
    }

    #[test]
    fn chain_sequence_walks_stable_order() {
        let mut chain = Chain::new("B");
        chain.add_residue(Residue::new(1, 5, "LYS"));
        chain.add_residue(Residue::new(2, 9, "TRP"));
        chain.add_residue(Residue::new(3, 10, "XXX"));

        assert_eq!(chain.sequence(), "KWA");
    }

    #[test]
    fn chain_residue_lookup_by_stable_index() {
        let mut chain = Chain::new("A");
        chain.add_residue(Residue::new(1, 100, "SER"));

        assert_eq!(chain.residue(1).map(|r| r.source_number), Some(100));
        assert!(chain.residue(0).is_none());
        assert!(chain.residue(2).is_none());
    }
}
