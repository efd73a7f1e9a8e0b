//! Reader for the free-form run-parameter file (`run.cns`).
//!
//! Two independent signals are extracted: the restraint-correction factor
//! (driven by the `noecv` flag and the `ncvpart` partition count) and the
//! contact-detection distance cutoff (`flcut`). Values are embedded in
//! `{===>} key=value;` tokens; the scan never stops early, so the last
//! occurrence of a numeric key wins. Every default is an explicit named
//! constant and every extracted value carries a provided/defaulted indicator.

use crate::io::error::Error;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

const FORMAT: &str = "run parameters";

/// Contact-detection cutoff used when the parameter file does not provide one.
pub const DEFAULT_CONTACT_CUTOFF: f64 = 5.0;

const CORRECTION_FLAG_KEY: &str = "noecv";
const PARTITION_COUNT_KEY: &str = "ncvpart";
const CUTOFF_KEY: &str = "flcut";

fn param_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{===>\}\s(\w+)=(\d.*);").expect("valid pattern"))
}

/// Whether a parameter was read from the file or filled from a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Provided,
    Defaulted,
}

/// Restraint-correction factor derived from the `noecv`/`ncvpart` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrectionFactor {
    /// Correction flag absent: factor is exactly 1.
    Uncorrected,
    /// Correction enabled with a positive partition count: factor is `1/parts`.
    Partitioned { parts: f64 },
    /// Correction enabled but the partition count is missing or zero. Callers
    /// must treat this as "no correction available", never divide.
    Unavailable,
}

impl CorrectionFactor {
    /// The probability weight, when one is defined.
    pub fn probability(&self) -> Option<f64> {
        match self {
            CorrectionFactor::Uncorrected => Some(1.0),
            CorrectionFactor::Partitioned { parts } => Some(1.0 / parts),
            CorrectionFactor::Unavailable => None,
        }
    }
}

/// Scalar configuration extracted from a run-parameter file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    pub cutoff: f64,
    pub cutoff_provenance: Provenance,
    pub correction: CorrectionFactor,
}

/// Scans a parameter file line by line for the cutoff and correction signals.
pub fn read<R: BufRead>(reader: R) -> Result<RunParameters, Error> {
    let mut correction_enabled = false;
    let mut partition_count = 0.0;
    let mut cutoff = None;
    let mut line_num = 0;

    for line in reader.lines() {
        line_num += 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        if line.contains(CORRECTION_FLAG_KEY) && line.contains("true") {
            correction_enabled = true;
        }
        if line.contains(PARTITION_COUNT_KEY) {
            if let Some(value) = extract_value(&line, line_num)? {
                partition_count = value;
            }
        }
        if line.contains(CUTOFF_KEY) {
            if let Some(value) = extract_value(&line, line_num)? {
                cutoff = Some(value);
            }
        }
    }

    let correction = if !correction_enabled {
        CorrectionFactor::Uncorrected
    } else if partition_count == 0.0 {
        CorrectionFactor::Unavailable
    } else {
        CorrectionFactor::Partitioned {
            parts: partition_count,
        }
    };

    let (cutoff, cutoff_provenance) = match cutoff {
        Some(value) => (value, Provenance::Provided),
        None => (DEFAULT_CONTACT_CUTOFF, Provenance::Defaulted),
    };

    Ok(RunParameters {
        cutoff,
        cutoff_provenance,
        correction,
    })
}

pub fn read_path(path: &Path) -> Result<RunParameters, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read(BufReader::new(file)).map_err(|e| e.with_path(path))
}

fn extract_value(line: &str, line_num: usize) -> Result<Option<f64>, Error> {
    match param_regex().captures(line) {
        Some(caps) => {
            let value = caps[2].parse::<f64>().map_err(|_| {
                Error::parse(
                    FORMAT,
                    None,
                    line_num,
                    format!("invalid numeric value '{}'", &caps[2]),
                )
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}
