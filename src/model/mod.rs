//! Core data structures modeling a docked macromolecular assembly.
//!
//! This module defines the types for representing atoms, residues, chains, and whole
//! coordinate models under the pipeline's stable per-chain numbering. These types are
//! produced by the I/O parsers and consumed by the interface detector and the archive
//! builder.

pub mod atom;
pub mod chain;
pub mod residue;
pub mod structure;
pub mod types;
