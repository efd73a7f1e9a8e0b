//! Operations layered on parsed docking output: interface detection through the
//! external contact tool, cluster ranking, and contiguous-range compression.

pub mod error;
pub mod interface;
pub mod rank;
pub mod ranges;

pub use error::Error;
pub use interface::{Contact, ContactTool, InterfaceSet, detect_interface, parse_contacts};
pub use rank::{RankedCluster, TOP_N, rank_clusters};
pub use ranges::to_ranges;
