use cannon_core::ParseTaskError;
use std::path::PathBuf;

/// Errors raised while configuring or persisting a session.
#[derive(Debug, thiserror::Error)]
pub enum ExperimentError {
    #[error(transparent)]
    UnknownTask(#[from] ParseTaskError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("invalid trial table: {0}")]
    TrialTable(#[from] serde_json::Error),

    #[error("trial table has no record for trial {0}")]
    MissingTrial(usize),

    #[error("trial {trial}: {reason}")]
    InvalidTrial { trial: usize, reason: String },

    #[error("trial table is empty")]
    EmptyTable,

    #[error("{owner} needs asset {key:?}, which was not preloaded")]
    MissingAsset { owner: &'static str, key: String },

    #[error("subject record was never initialised")]
    SubjectNotInitialised,
}
