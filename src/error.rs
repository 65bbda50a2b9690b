use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the extraction pipeline. All of these are fatal: the
/// output is consumed as ground truth for ABI compatibility decisions, so a
/// subtly wrong partial result is worse than a crash.
#[derive(Error, Debug)]
pub enum AbiError {
    #[error("source root {0:?} does not exist or is not a directory")]
    InvalidSourceRoot(PathBuf),

    #[error("unexpected manifest path layout {path:?}: {reason}")]
    PathShape { path: PathBuf, reason: String },

    #[error("manifest path {0:?} is not valid UTF-8")]
    NonUtf8Path(PathBuf),

    #[error("manifest {0:?} is not ASCII text")]
    NonAsciiManifest(PathBuf),

    #[error("malformed record in {path:?}: {fields:?}")]
    MalformedRecord { path: PathBuf, fields: Vec<String> },

    #[error("unhandled symbol type in {path:?}: {fields:?}")]
    UnhandledSymbolType { path: PathBuf, fields: Vec<String> },

    #[error("unknown target {0}")]
    UnknownTarget(String),

    #[error("duplicate target {0} in configuration table")]
    DuplicateTarget(String),

    #[error("duplicate library {library} for target {target}: {first:?} and {second:?}")]
    DuplicateLibrary {
        target: String,
        library: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AbiError {
    pub fn path_shape(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::PathShape {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
