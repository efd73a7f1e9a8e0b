mod error;

pub mod cluster;
pub mod params;
pub mod pdb;
pub mod tbl;

pub use pdb::reader::{read as read_structure, read_path as read_structure_path};

pub use tbl::reader::{
    read_ambiguous, read_ambiguous_path, read_unambiguous, read_unambiguous_path,
};
pub use tbl::{AmbiguousRestraint, ResidueRef, UnambiguousRestraint};

pub use cluster::{ClusterMembers, read_clusters, read_clusters_path, read_scores,
    read_scores_path};

pub use params::{
    CorrectionFactor, DEFAULT_CONTACT_CUTOFF, Provenance, RunParameters,
    read as read_run_parameters, read_path as read_run_parameters_path,
};

pub use error::Error;
