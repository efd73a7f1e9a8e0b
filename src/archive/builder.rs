//! Assembles the normalized [`System`] from a docking run directory.
//!
//! The builder wires the pipeline together: run parameters and the reference
//! complex are read first, clusters are ranked, and every ranked cluster's
//! member models are loaded, interface-annotated through the external contact
//! tool, and packed into model groups alongside the two restraint collections.
//! Processing is strictly sequential; any failure aborts the build before a
//! system is produced.

use crate::archive::{
    AMBIG_UPPER_BOUND, AsymUnit, AtomSite, DistanceBound, DistanceRestraint, Entity, Feature,
    Model, ModelGroup, ResidueSpan, Segment, System,
};
use crate::io::tbl::ResidueRef;
use crate::io::{
    read_ambiguous_path, read_clusters_path, read_run_parameters_path, read_scores_path,
    read_structure_path, read_unambiguous_path,
};
use crate::model::structure::Structure;
use crate::ops::{ContactTool, detect_interface, rank_clusters, to_ranges};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error as ThisError;

/// Default name of the external contact-detection executable, resolved through
/// `PATH` unless an explicit path is configured.
pub const DEFAULT_CONTACT_PROGRAM: &str = "contact-chainID";

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] crate::io::Error),

    #[error(transparent)]
    Op(#[from] crate::ops::Error),

    #[error("I/O error for directory '{path}': {source}")]
    Dir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("restraint references segment '{segid}' with no matching chain in the reference complex")]
    UnknownSegment { segid: String },

    #[error("restraint residue id {resid} is not a valid sequence position")]
    RestraintOutOfRange { resid: i32 },

    #[error("restraint correction is enabled but the partition count is missing or zero")]
    CorrectionUnavailable,

    #[error("no final model files found for ranked cluster {cluster}")]
    MissingClusterModels { cluster: u32 },

    #[error("model file '{path}' does not match the cluster naming pattern")]
    MalformedModelName { path: PathBuf },
}

/// Fixed layout of a docking run directory.
#[derive(Debug, Clone)]
pub struct RunLayout {
    root: PathBuf,
}

impl RunLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The free-form run-parameter file.
    pub fn parameters_file(&self) -> PathBuf {
        self.root.join("run.cns")
    }

    /// The processed reference complex carrying every chain; entities and
    /// asymmetric units are defined from this file.
    pub fn reference_complex(&self) -> PathBuf {
        self.root.join("begin").join("complex_1.pdb")
    }

    fn refined_dir(&self) -> PathBuf {
        self.root
            .join("structures")
            .join("it1")
            .join("water")
    }

    /// Per-model score list, one line per model.
    pub fn score_list(&self) -> PathBuf {
        self.refined_dir().join("file.list")
    }

    /// Cluster-membership listing.
    pub fn cluster_listing(&self) -> PathBuf {
        self.refined_dir().join("analysis").join("cluster.out")
    }

    fn distances_dir(&self) -> PathBuf {
        self.root.join("data").join("distances")
    }

    pub fn ambiguous_table(&self) -> PathBuf {
        self.distances_dir().join("ambig.tbl")
    }

    pub fn unambiguous_table(&self) -> PathBuf {
        self.distances_dir().join("unambig.tbl")
    }

    /// Directory holding the final clustered model files.
    pub fn model_dir(&self) -> &Path {
        &self.root
    }
}

/// Knobs for the build; currently just the contact-tool executable.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub contact_tool: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            contact_tool: PathBuf::from(DEFAULT_CONTACT_PROGRAM),
        }
    }
}

fn model_file_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^cluster(\d+)_(\d+)\.pdb$").expect("valid pattern"))
}

/// Scans a directory for final model files (`cluster<N>_<M>.pdb`), grouping
/// them by cluster id in lexicographic filename order.
pub fn discover_models(dir: &Path) -> Result<BTreeMap<u32, Vec<PathBuf>>, Error> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::Dir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::Dir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        paths.push(entry.path());
    }
    paths.sort();

    let mut grouped: BTreeMap<u32, Vec<PathBuf>> = BTreeMap::new();
    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(caps) = model_file_regex().captures(name) {
            let cluster = caps[1]
                .parse::<u32>()
                .map_err(|_| Error::MalformedModelName { path: path.clone() })?;
            grouped.entry(cluster).or_default().push(path);
        }
    }

    Ok(grouped)
}

/// Extracts the model id (`<M>`) from a `cluster<N>_<M>.pdb` filename.
pub fn model_id(path: &Path) -> Result<u32, Error> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|name| model_file_regex().captures(name))
        .and_then(|caps| caps[2].parse::<u32>().ok())
        .ok_or_else(|| Error::MalformedModelName {
            path: path.to_path_buf(),
        })
}

/// Runs the full extraction-and-normalization pipeline over a run directory.
pub fn build_system(layout: &RunLayout, options: &BuildOptions) -> Result<System, Error> {
    log::info!("Input run directory: {}", layout.root().display());

    let parameters_file = layout.parameters_file();
    log::info!("Reading run parameters from {}", parameters_file.display());
    let params = read_run_parameters_path(&parameters_file)?;

    let reference_file = layout.reference_complex();
    log::info!("Reading reference complex {}", reference_file.display());
    let reference = read_structure_path(&reference_file)?;

    let mut entities = Vec::new();
    let mut asym_units = Vec::new();
    for chain in reference.iter_chains() {
        log::info!("Creating entity based on chain {}", chain.id);
        let sequence = chain.sequence();
        entities.push(Entity {
            description: format!("Chain {}", chain.id),
            sequence: sequence.clone(),
        });
        asym_units.push(AsymUnit {
            chain: chain.id.clone(),
            details: format!("Subunit {}", chain.id),
            sequence,
            auth_seq_map: chain.auth_seq_map().clone(),
        });
    }

    log::info!(
        "Ranking clusters from {} based on {}",
        layout.cluster_listing().display(),
        layout.score_list().display()
    );
    let scores = read_scores_path(&layout.score_list())?;
    let clusters = read_clusters_path(&layout.cluster_listing())?;
    let ranking = rank_clusters(&scores, &clusters)?;

    let discovered = discover_models(layout.model_dir())?;
    let tool = ContactTool::new(&options.contact_tool);

    let mut model_groups = Vec::new();
    for ranked in &ranking {
        let paths = discovered
            .get(&ranked.cluster)
            .ok_or(Error::MissingClusterModels {
                cluster: ranked.cluster,
            })?;

        let mut models = Vec::new();
        for path in paths {
            log::info!("Processing {}", path.display());
            models.push(build_model(path, &tool, params.cutoff)?);
        }

        log::info!(
            "Finalizing group cluster rank: {} number: {}",
            ranked.rank,
            ranked.cluster
        );
        model_groups.push(ModelGroup {
            name: format!("Cluster {} (#{})", ranked.rank, ranked.cluster),
            rank: ranked.rank,
            cluster: ranked.cluster,
            models,
        });
    }

    let probability = params
        .correction
        .probability()
        .ok_or(Error::CorrectionUnavailable)?;

    let ambig_table = layout.ambiguous_table();
    log::info!("Reading ambiguous restraints from {}", ambig_table.display());
    let ambiguous = read_ambiguous_path(&ambig_table)?;
    let mut ambiguous_restraints = Vec::new();
    for (i, group) in ambiguous.iter().enumerate() {
        let feature_a = Feature {
            label: format!("Ambig AIR {} Active", i + 1),
            residues: vec![span(&reference, &group.active)?],
        };
        let passive = group
            .passive
            .iter()
            .map(|r| span(&reference, r))
            .collect::<Result<Vec<_>, _>>()?;
        let feature_b = Feature {
            label: format!("Ambig AIR {} Passive", i + 1),
            residues: passive,
        };
        ambiguous_restraints.push(DistanceRestraint {
            dataset: ambig_table.clone(),
            feature_a,
            feature_b,
            bound: DistanceBound::Upper {
                limit: AMBIG_UPPER_BOUND,
            },
            probability,
        });
    }

    let unambig_table = layout.unambiguous_table();
    log::info!(
        "Reading unambiguous restraints from {}",
        unambig_table.display()
    );
    let unambiguous = read_unambiguous_path(&unambig_table)?;
    let mut unambiguous_restraints = Vec::new();
    for (i, restraint) in unambiguous.iter().enumerate() {
        let (lower, upper) = restraint.bounds();
        unambiguous_restraints.push(DistanceRestraint {
            dataset: unambig_table.clone(),
            feature_a: Feature {
                label: format!("Unambig AIR {}_i", i + 1),
                residues: vec![span(&reference, &restraint.res_i)?],
            },
            feature_b: Feature {
                label: format!("Unambig AIR {}_j", i + 1),
                residues: vec![span(&reference, &restraint.res_j)?],
            },
            bound: DistanceBound::LowerUpper { lower, upper },
            probability,
        });
    }

    Ok(System {
        entities,
        asym_units,
        model_groups,
        ambiguous_restraints,
        unambiguous_restraints,
    })
}

/// Loads one model file, detects its interface, and derives the two-level
/// representation: one rigid whole-chain segment per interface chain plus one
/// flexible segment per contiguous interface range.
fn build_model(path: &Path, tool: &ContactTool, cutoff: f64) -> Result<Model, Error> {
    let structure = read_structure_path(path)?;
    let contacts = tool.run(path, cutoff)?;
    let interface = detect_interface(&structure, &contacts)?;

    let mut representation = Vec::new();
    for (chain, residues) in interface.iter() {
        representation.push(Segment::Rigid {
            chain: chain.to_string(),
        });
        for (start, end) in to_ranges(residues) {
            representation.push(Segment::Flexible {
                chain: chain.to_string(),
                start,
                end,
            });
        }
    }

    let id = model_id(path)?;
    let atoms: Vec<AtomSite> = structure
        .atom_records()
        .into_iter()
        .map(AtomSite::from)
        .collect();

    Ok(Model {
        id,
        name: format!("model {id}"),
        source: path.to_path_buf(),
        representation,
        atoms,
    })
}

fn span(reference: &Structure, residue: &ResidueRef) -> Result<ResidueSpan, Error> {
    if reference.chain(residue.segid.as_str()).is_none() {
        return Err(Error::UnknownSegment {
            segid: residue.segid.to_string(),
        });
    }
    let position = usize::try_from(residue.resid).map_err(|_| Error::RestraintOutOfRange {
        resid: residue.resid,
    })?;
    Ok(ResidueSpan {
        chain: residue.segid.to_string(),
        start: position,
        end: position,
    })
}
