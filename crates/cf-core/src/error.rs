//! Unified error type for clipforge.
//!
//! Every crate funnels its failures into [`Error`]. Engine failures carry the
//! tool's stderr so callers never receive a path to a file that was not
//! produced.

use std::path::{Path, PathBuf};

/// Unified error type covering all failure modes in clipforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path cannot be turned into an output path.
    #[error("Invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The offending input path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// An external tool (ffmpeg, ffprobe) could not run or returned an error.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description, including stderr when available.
        message: String,
    },

    /// The probe tool's output could not be turned into a [`crate::MediaInfo`].
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Request data or configuration failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// Failures while interpreting ffprobe output.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The output was not valid JSON of the expected shape.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// No stream of the requested type exists.
    #[error("no {codec_type} stream found")]
    NoStream {
        /// The codec type that was searched for (e.g. "video").
        codec_type: String,
    },

    /// A required field is absent.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A field is present but cannot be interpreted.
    #[error("invalid value {value:?} for field `{field}`")]
    InvalidField {
        /// Dotted path of the field.
        field: String,
        /// The raw value as reported by the tool.
        value: String,
    },
}

impl Error {
    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::InvalidPath`].
    pub fn invalid_path(path: &Path, reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
