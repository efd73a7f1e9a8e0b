use super::atom::AtomRecord;
use super::chain::Chain;
use std::fmt;

/// A parsed coordinate model: chains in file-discovery order.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    chains: Vec<Chain>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chain(&mut self, chain: Chain) {
        debug_assert!(
            self.chain(&chain.id).is_none(),
            "Attempted to add a duplicate chain ID '{}'",
            chain.id
        );
        self.chains.push(chain);
    }

    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    pub fn chain_mut(&mut self, id: &str) -> Option<&mut Chain> {
        self.chains.iter_mut().find(|c| c.id == id)
    }

    /// Returns the chain with the given id, creating it if unseen so far.
    pub fn chain_or_insert(&mut self, id: &str) -> &mut Chain {
        if let Some(index) = self.chains.iter().position(|c| c.id == id) {
            &mut self.chains[index]
        } else {
            self.chains.push(Chain::new(id));
            self.chains
                .last_mut()
                .unwrap_or_else(|| unreachable!("chain was just pushed"))
        }
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(|c| c.residue_count()).sum()
    }

    pub fn atom_count(&self) -> usize {
        self.chains.iter().map(|c| c.iter_atoms().count()).sum()
    }

    pub fn iter_chains(&self) -> std::slice::Iter<'_, Chain> {
        self.chains.iter()
    }

    /// Flattened atom list tagged with chain and stable residue index, in
    /// chain/stable order.
    pub fn atom_records(&self) -> Vec<AtomRecord> {
        let mut records = Vec::new();
        for chain in &self.chains {
            for residue in chain.iter_residues() {
                for atom in residue.iter_atoms() {
                    records.push(AtomRecord {
                        chain: chain.id.as_str().into(),
                        seq_id: residue.seq_id,
                        element: atom.element,
                        name: atom.name.clone(),
                        x: atom.pos.x,
                        y: atom.pos.y,
                        z: atom.pos.z,
                    });
                }
            }
        }
        records
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Structure {{ chains: {}, residues: {}, atoms: {} }}",
            self.chain_count(),
            self.residue_count(),
            self.atom_count()
        )
    }
}
