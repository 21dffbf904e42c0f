//! Errors.
//!
//! Only configuration loading fails with an error. Missing uploads, failed
//! writes and failed cleanups are part of the normal flow and are reported
//! as values (`Option`, `PersistOutcome`, `bool`) instead.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown path alias '{0}'")]
    UnknownAlias(String),

    #[error("failed to read store settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid store settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("persist method name must not be empty")]
    EmptyPersistMethod,
}
