//! # dock-forge
//!
//! **dock-forge** converts the output of a molecular-docking run — fixed-column coordinate
//! files, distance-restraint tables, clustering results, and run parameters — into a
//! normalized, typed description of the docked assembly, ready for handoff to a generic
//! structural-archive writer. The crate favors deterministic batch processing, strong
//! typing, and clean error surfaces so every parsed value can be traced back to its file
//! and line.
//!
//! ## Features
//!
//! - **Stable numbering** – Every chain gets a contiguous 1-based residue numbering in
//!   file-discovery order, with a bidirectional map back to the file's own residue numbers.
//! - **Interface detection** – An external contact tool is driven as a typed command
//!   boundary; its output is back-mapped and deduplicated into per-chain interface sets.
//! - **Typed restraints** – Both the unambiguous (list-form) and ambiguous
//!   (active/passive) restraint-table dialects parse into explicit record types.
//! - **Deterministic ranking** – Clusters are ranked by the mean score of their
//!   best-scoring members with stable tie-breaking.
//! - **Archive handoff** – Entities, asymmetric units, ranked model groups with
//!   rigid/flexible representations, and restraint collections assemble into one
//!   serializable [`archive::System`].

pub mod archive;
pub mod io;
pub mod model;
pub mod ops;

pub use model::atom::{Atom, AtomRecord};
pub use model::chain::Chain;
pub use model::residue::Residue;
pub use model::structure::Structure;
pub use model::types::{AminoAcid, Element, FALLBACK_ONE_LETTER, Point};
