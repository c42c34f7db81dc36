//! Errors that are not parse errors.
//!
//! Malformed markup never produces one of these; the parser always recovers.
//! They cover the plumbing around a parse, such as reading the document.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while preparing a document for parsing.
#[derive(Debug, Error)]
pub enum WeftError {
    /// The document file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Neither a file nor an inline document was supplied.
    #[error("no input given: pass a file path or --html <STRING>")]
    MissingInput,
}
