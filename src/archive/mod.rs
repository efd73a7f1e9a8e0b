//! Normalized description of a docked assembly, ready for a generic
//! structural-archive writer.
//!
//! These types are the handoff boundary: entities and asymmetric units derived
//! from the reference complex, ranked model groups with rigid/flexible
//! representation segments, and the two restraint collections. Serialization
//! to an archive format is a downstream concern; everything here is plain data
//! (serde-serializable for inspection dumps).

pub mod builder;

use crate::model::atom::AtomRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub use builder::{BuildOptions, Error, RunLayout, build_system};

/// Fixed upper distance bound applied to every ambiguous restraint.
pub const AMBIG_UPPER_BOUND: f64 = 2.0;

/// One polymeric entity, derived from one chain of the reference complex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub description: String,
    /// One-letter sequence in stable-index order.
    pub sequence: String,
}

/// One asymmetric unit: a chain instance with its stable→source numbering map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsymUnit {
    pub chain: String,
    pub details: String,
    pub sequence: String,
    /// Stable index → source residue number.
    pub auth_seq_map: BTreeMap<usize, i32>,
}

/// A representation segment of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// The whole chain treated as a rigid body.
    Rigid { chain: String },
    /// One contiguous run of interface residues, flexible during refinement.
    Flexible {
        chain: String,
        start: usize,
        end: usize,
    },
}

/// One atom position, tagged with its chain and stable residue index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomSite {
    pub chain: String,
    pub seq_id: usize,
    pub type_symbol: String,
    pub atom_id: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<AtomRecord> for AtomSite {
    fn from(record: AtomRecord) -> Self {
        Self {
            chain: record.chain.to_string(),
            seq_id: record.seq_id,
            type_symbol: record.element.symbol().to_string(),
            atom_id: record.name.to_string(),
            x: record.x,
            y: record.y,
            z: record.z,
        }
    }
}

/// One docked model within a cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    pub id: u32,
    pub name: String,
    pub source: PathBuf,
    pub representation: Vec<Segment>,
    pub atoms: Vec<AtomSite>,
}

/// All models of one cluster, named by rank and original cluster id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelGroup {
    pub name: String,
    pub rank: usize,
    pub cluster: u32,
    pub models: Vec<Model>,
}

/// A labeled set of residue ranges participating in a restraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub label: String,
    pub residues: Vec<ResidueSpan>,
}

/// An inclusive residue range on one chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidueSpan {
    pub chain: String,
    pub start: usize,
    pub end: usize,
}

/// Distance bound semantics of a restraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistanceBound {
    Upper { limit: f64 },
    LowerUpper { lower: f64, upper: f64 },
}

/// A derived distance restraint between two residue features, with dataset
/// provenance and a probability weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceRestraint {
    pub dataset: PathBuf,
    pub feature_a: Feature,
    pub feature_b: Feature,
    pub bound: DistanceBound,
    pub probability: f64,
}

/// The complete normalized system handed to an archive writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct System {
    pub entities: Vec<Entity>,
    pub asym_units: Vec<AsymUnit>,
    pub model_groups: Vec<ModelGroup>,
    pub ambiguous_restraints: Vec<DistanceRestraint>,
    pub unambiguous_restraints: Vec<DistanceRestraint>,
}
