//! Failure modes of the outer layers (document loading, replay input, configuration).
//!
//! Selection itself never fails: anomalous visibility input degrades to "no active section".

use std::io;
use std::path::PathBuf;

/// Errors surfaced while loading documents, configuration or replay streams.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The grammar could not be loaded or the document produced no syntax tree.
    #[error("failed to parse {}: {reason}", .path.display())]
    Parse {
        /// Document being parsed.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// A format's tree-sitter query did not compile.
    #[error("invalid section query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    /// A replay record was not valid JSON of the expected shape.
    #[error("replay line {line}: {source}")]
    Replay {
        /// 1-based line number in the replay stream.
        line: usize,
        /// Underlying decoding error.
        source: serde_json::Error,
    },
    /// Serialising output failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The configuration file could not be understood.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
