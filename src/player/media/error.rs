//! Source loading errors.

use std::path::PathBuf;

/// Errors that can occur while resolving or probing an audio source.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Invalid audio source '{source_url}': {message}")]
    InvalidSource { source_url: String, message: String },

    #[error("Unsupported source scheme '{0}' (expected http, https or file)")]
    UnsupportedScheme(String),

    #[error("Failed to fetch {url}: {message}")]
    FetchFailed { url: String, message: String },

    #[error("Failed to open {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unrecognized audio format: {0}")]
    UnrecognizedFormat(String),

    #[error("No audio track found")]
    NoAudioTrack,

    #[error("Track duration is unknown")]
    UnknownDuration,
}
