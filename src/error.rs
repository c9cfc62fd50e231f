use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rewriting a rule tree.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Input directory does not exist: {0}")]
    MissingInput(PathBuf),

    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("Failed to serialize rules for '{path}': {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("Invalid mapping config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("Failed to walk rule directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl TransformError {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
