//! Error taxonomy for input sources
//!
//! A missing source is the only fatal ingestion failure class; malformed
//! rows inside a present source are dropped by the lenient parsers and
//! never surface here.

use std::fmt;

/// Fatal input-source errors
///
/// Note: `Display`/`Error` are implemented by hand rather than derived with
/// `thiserror` because the `MissingColumn` variant carries a descriptive
/// `source: String` field (a human-readable source/file name, not an error
/// cause). `thiserror` unconditionally treats any field literally named
/// `source` as the `std::error::Error` source, which requires that field to
/// implement `Error` — it does not. The hand-written impls below reproduce the
/// exact messages and source semantics the derive would otherwise provide.
#[derive(Debug)]
pub enum SourceError {
    NoInputFile { marker: String, dir: String },

    OrderLogMissing { path: String },

    MissingColumn { column: String, source: String },

    Io(std::io::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NoInputFile { marker, dir } => {
                write!(f, "no return-request file matching '*{marker}*' in {dir}")
            }
            SourceError::OrderLogMissing { path } => {
                write!(f, "order log not found: {path}")
            }
            SourceError::MissingColumn { column, source } => {
                write!(f, "required column '{column}' missing from {source}")
            }
            SourceError::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err)
    }
}
