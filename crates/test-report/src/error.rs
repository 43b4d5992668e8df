//! Error types for report generation.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures that stop a report from being written.
///
/// No variant leaves a partial report behind: inputs are fully parsed before
/// the output file is touched, and the output is replaced by rename.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// One or both input documents do not exist.
    #[error("Missing report files. Run the test suite first.")]
    MissingInputs {
        /// Inputs that were not found, relative to the root.
        missing: Vec<Utf8PathBuf>,
    },

    /// The root directory could not be opened or resolved.
    #[error("failed to open report root '{path}': {message}")]
    Root {
        /// Root directory as given.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// An input document exists but could not be read.
    #[error("failed to read '{path}': {message}")]
    Read {
        /// Path of the input.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// An input document is not valid JSON of the expected shape.
    #[error("invalid JSON in '{path}': {message}")]
    Parse {
        /// Path of the input.
        path: Utf8PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// The report could not be serialised.
    #[error("failed to serialise report: {message}")]
    Serialise {
        /// Description of the serialisation error.
        message: String,
    },

    /// The report could not be written.
    #[error("failed to write report file at '{path}': {message}")]
    Write {
        /// Path being written.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
