//! Fundamental atom representation comprising name, chemical element, and Cartesian position.
//!
//! Atoms are instantiated by the coordinate reader and are immutable once parsed. The
//! flattened [`AtomRecord`] view carries the chain and stable-residue tags required by the
//! archive handoff, so downstream consumers never need to walk the residue hierarchy.

use super::types::{Element, Point};
use smol_str::SmolStr;
use std::fmt;

/// Labeled atom with element identity and Cartesian position.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom name as it appears in the coordinate file (e.g., `CA`).
    pub name: SmolStr,
    /// Chemical element derived from the record's element column.
    pub element: Element,
    /// Cartesian coordinates measured in ångströms.
    pub pos: Point,
}

impl Atom {
    pub fn new(name: &str, element: Element, pos: Point) -> Self {
        Self {
            name: SmolStr::new(name),
            element,
            pos,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ name: \"{}\", element: {}, pos: ({:.3}, {:.3}, {:.3}) }}",
            self.name, self.element, self.pos.x, self.pos.y, self.pos.z
        )
    }
}

/// One atom tagged with its chain and stable residue index, the unit handed to
/// the archive builder.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub chain: SmolStr,
    /// 1-based stable residue index within the chain.
    pub seq_id: usize,
    pub element: Element,
    pub name: SmolStr,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
