use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to launch contact tool '{program}': {source}")]
    ContactToolLaunch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("contact tool '{program}' exited with {status}: {stderr}")]
    ContactToolFailed {
        program: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("unparsable contact tool output: {details}")]
    ContactOutput { details: String },

    #[error(
        "contact references residue {residue} of chain '{chain}' which is absent from the \
         stable-numbering map (coordinate file mismatch)"
    )]
    UnmappedContact { chain: String, residue: i32 },

    #[error("contact references unknown chain '{chain}'")]
    UnknownChain { chain: String },

    #[error("cluster {cluster} lists model {model} which has no score entry")]
    MissingScore { cluster: u32, model: usize },

    #[error("cluster {cluster} declares no members")]
    EmptyCluster { cluster: u32 },
}

impl Error {
    pub fn contact_output(details: impl Into<String>) -> Self {
        Self::ContactOutput {
            details: details.into(),
        }
    }
}
