//! Typed records for the two restraint-table dialects.
//!
//! Both dialects are line-oriented `assign … resid N … segid S …` directives. The
//! unambiguous dialect carries two residue references plus three trailing distance
//! values per line; the ambiguous dialect groups passive continuation lines under
//! the most recently opened active directive.

pub mod reader;

use smol_str::SmolStr;

/// A `(resid, segid)` reference as written in a restraint table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueRef {
    pub resid: i32,
    pub segid: SmolStr,
}

impl ResidueRef {
    pub fn new(resid: i32, segid: &str) -> Self {
        Self {
            resid,
            segid: SmolStr::new(segid),
        }
    }
}

/// One unambiguous restraint: a residue pair with a target distance and
/// asymmetric lower/upper deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct UnambiguousRestraint {
    pub res_i: ResidueRef,
    pub res_j: ResidueRef,
    pub distance: f64,
    pub lower_delta: f64,
    pub upper_delta: f64,
}

impl UnambiguousRestraint {
    /// Lower and upper distance bounds:
    /// `(distance - lower_delta, distance + upper_delta)`.
    pub fn bounds(&self) -> (f64, f64) {
        (
            self.distance - self.lower_delta,
            self.distance + self.upper_delta,
        )
    }
}

/// One ambiguous restraint group: an active anchor residue and the ordered
/// passive residues that may satisfy the restraint as a group.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbiguousRestraint {
    pub active: ResidueRef,
    pub passive: Vec<ResidueRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unambiguous_bounds_are_asymmetric() {
        let restraint = UnambiguousRestraint {
            res_i: ResidueRef::new(1, "A"),
            res_j: ResidueRef::new(2, "B"),
            distance: 5.0,
            lower_delta: 1.0,
            upper_delta: 2.0,
        };

        assert_eq!(restraint.bounds(), (4.0, 7.0));
    }
}
