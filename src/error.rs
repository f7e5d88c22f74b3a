//! Error types shared by the alignment, tree and aligner modules.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MsaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed alignment or tree text, with a 1-based line number
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("sequence '{id}' has length {found}, expected {expected}")]
    LengthMismatch {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("alignment contains no sequences")]
    EmptyAlignment,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Byte offset of the first unmatched parenthesis
    #[error("unbalanced parenthesis in Newick text at position {position}")]
    UnbalancedNewick { position: usize },

    #[error("{tool} exited with an error: {stderr}")]
    ToolFailed { tool: String, stderr: String },

    #[error("could not launch {tool}: {source}")]
    ToolNotFound {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("expected output file was not created: {0:?}")]
    MissingOutput(PathBuf),
}

pub type Result<T> = std::result::Result<T, MsaError>;
