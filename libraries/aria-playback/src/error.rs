//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Queue and player operations never return these for expected runtime
/// conditions (missing ids, empty queue, playback glitches); those are
/// `None`/no-op plus the event channel. The error type exists for the
/// backend boundary, where voice construction can genuinely fail.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The backend could not construct a voice for the request
    #[error("Voice creation failed: {0}")]
    VoiceCreation(String),

    /// The backend itself is unavailable on this platform
    #[error("Playback backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
