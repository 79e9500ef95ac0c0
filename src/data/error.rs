use std::path::PathBuf;

use thiserror::Error;

/// Why the dataset bundle could not be loaded. Always names the offending file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is missing column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{}, record {record}: {reason}", path.display())]
    InvalidRecord {
        path: PathBuf,
        /// 1-based position of the record in its file.
        record: usize,
        reason: String,
    },

    #[error("{}: duplicate identifier '{id}'", path.display())]
    DuplicateId { path: PathBuf, id: String },
}

impl LoadError {
    /// The file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Csv { path, .. }
            | LoadError::Json { path, .. }
            | LoadError::MissingColumn { path, .. }
            | LoadError::InvalidRecord { path, .. }
            | LoadError::DuplicateId { path, .. } => path,
        }
    }
}

/// An invalid selection or aggregate request coming from a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot aggregate an empty {what} collection")]
    EmptyInput { what: &'static str },

    #[error("a histogram needs at least one bucket")]
    ZeroBuckets,
}
