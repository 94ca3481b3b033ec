//! Error types for ingestion

use thiserror::Error;

/// Errors that can occur while ingesting a file
///
/// Unlike the playback crates, ingestion does fail loudly: a consumer
/// expecting a content hash has no sensible degraded value when the
/// source cannot be read at all.
#[derive(Debug, Error)]
pub enum IngestError {
    /// IO error reading the source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte source could not be opened
    #[error("Source error: {0}")]
    Source(String),

    /// Tag parsing failed (triggers the hash-only fallback)
    #[error("Tag parse error: {0}")]
    Parse(String),
}

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;
