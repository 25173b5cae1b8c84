//! Error types for the wait-event-gen crate.

use std::path::PathBuf;

/// Errors that can occur while reading a catalog or generating artifacts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read the catalog file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a generated artifact.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A catalog line did not match any known line shape.
    #[error("unable to parse catalog line {line_number} ({reason}): {line}")]
    Parse {
        line_number: usize,
        line: String,
        reason: &'static str,
    },

    /// A data line appeared before the first section header.
    #[error("catalog line {line_number} has no enclosing section header: {line}")]
    DataBeforeSection { line_number: usize, line: String },

    /// Two data lines define the same wait event key.
    #[error("wait event '{key}' defined twice (lines {first_line} and {second_line})")]
    DuplicateEvent {
        key: String,
        first_line: usize,
        second_line: usize,
    },

    /// Two keys of one class collapse to the same display label.
    #[error(
        "wait events on lines {first_line} and {second_line} both display as '{label}' in {class}"
    )]
    DuplicateLabel {
        class: String,
        label: String,
        first_line: usize,
        second_line: usize,
    },

    /// Failed to serialize the JSON manifest.
    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
