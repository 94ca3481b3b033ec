//! Playback backend abstraction
//!
//! The player never talks to a platform audio API directly. It asks a
//! [`PlaybackBackend`] for one [`Voice`] per track and drives its state
//! machine from the [`VoiceEvent`]s the voice reports. This keeps the
//! retry/recovery logic unit-testable without a real media stack.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Best-guess audio container/codec for a source URL
///
/// Hint only; backends are free to sniff the stream themselves when no
/// hint can be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioFormat {
    /// MPEG layer 3
    Mp3,
    /// MPEG-4 audio (M4A container)
    M4a,
    /// Raw AAC
    Aac,
    /// Ogg container (Vorbis)
    Ogg,
    /// Opus
    Opus,
    /// RIFF/WAVE
    Wav,
    /// WebM audio
    Webm,
    /// FLAC
    Flac,
}

impl AudioFormat {
    /// Derive a format from a MIME type
    pub fn from_mime(mime: &str) -> Option<Self> {
        // Parameters like `;codecs=` are not significant here
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        match essence {
            "audio/mpeg" | "audio/mp3" => Some(AudioFormat::Mp3),
            "audio/mp4" | "audio/x-m4a" => Some(AudioFormat::M4a),
            "audio/aac" => Some(AudioFormat::Aac),
            "audio/ogg" | "application/ogg" => Some(AudioFormat::Ogg),
            "audio/opus" => Some(AudioFormat::Opus),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(AudioFormat::Wav),
            "audio/webm" => Some(AudioFormat::Webm),
            "audio/flac" | "audio/x-flac" => Some(AudioFormat::Flac),
            _ => None,
        }
    }

    /// Derive a format from a URL's file extension
    pub fn from_url(url: &str) -> Option<Self> {
        // Ignore query/fragment; extension is whatever follows the last dot
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let extension = path.rsplit('.').next()?;
        match extension.to_ascii_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "m4a" | "mp4" => Some(AudioFormat::M4a),
            "aac" => Some(AudioFormat::Aac),
            "ogg" | "oga" => Some(AudioFormat::Ogg),
            "opus" => Some(AudioFormat::Opus),
            "wav" => Some(AudioFormat::Wav),
            "webm" => Some(AudioFormat::Webm),
            "flac" => Some(AudioFormat::Flac),
            _ => None,
        }
    }

    /// Canonical file extension for the format
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::Aac => "aac",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Opus => "opus",
            AudioFormat::Wav => "wav",
            AudioFormat::Webm => "webm",
            AudioFormat::Flac => "flac",
        }
    }
}

/// MIME lookup, then URL extension, then auto-detect
pub fn detect_format(mime_type: Option<&str>, url: &str) -> Option<AudioFormat> {
    mime_type
        .and_then(AudioFormat::from_mime)
        .or_else(|| AudioFormat::from_url(url))
}

/// Everything a backend needs to construct one voice
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceRequest {
    /// Resolved source URL (cached copy preferred over the logical one)
    pub url: String,

    /// Format hint; `None` means auto-detect
    pub format: Option<AudioFormat>,
}

/// Platform audio-context activation state
///
/// Browsers keep the context suspended until a user gesture; starting a
/// voice from a suspended context trips the autoplay policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Audio output is available
    Running,
    /// Activation granted before, currently suspended
    Suspended,
    /// No user gesture observed yet
    Uninitialized,
}

/// Lifecycle notifications a voice reports to the player
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceEvent {
    /// Source finished loading and is seekable
    Loaded {
        /// Total duration as the backend measured it
        duration: Option<Duration>,
    },

    /// Playback audibly started (fires again after resume)
    PlayStarted,

    /// Playback paused
    Paused,

    /// Track played to its end
    Ended,

    /// The source could not be loaded
    LoadFailed {
        /// Backend failure description
        message: String,
    },

    /// Playback could not be started
    PlayFailed {
        /// Backend failure description; autoplay-policy rejections are
        /// recognized by their message text
        message: String,
    },
}

/// One loaded instance of a track inside the backend
///
/// The player owns at most one voice at a time and tears it down on
/// every track swap. Voices report lifecycle through [`Voice::poll`],
/// which the player drains synchronously after each transport call and
/// on every tick.
pub trait Voice {
    /// Request playback to start (asynchronous; confirmed by
    /// [`VoiceEvent::PlayStarted`])
    fn begin_playback(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Seek to a position (only reliable once loaded)
    fn seek(&mut self, position: Duration);

    /// Current playback position
    fn position(&self) -> Duration;

    /// Duration, once known
    fn duration(&self) -> Option<Duration>;

    /// Whether the source has finished loading
    fn is_loaded(&self) -> bool;

    /// Apply a volume gain in `[0.0, 1.0]`
    fn set_volume(&mut self, volume: f32);

    /// Apply mute state
    fn set_muted(&mut self, muted: bool);

    /// Stop and release the underlying source
    fn unload(&mut self);

    /// Drain the next pending lifecycle event, if any
    fn poll(&mut self) -> Option<VoiceEvent>;
}

/// Factory and shared audio-context owner
pub trait PlaybackBackend {
    /// Construct a fresh voice for the request
    fn create_voice(&mut self, request: &VoiceRequest) -> Result<Box<dyn Voice>>;

    /// Current activation state of the shared audio context
    fn context_state(&self) -> ContextState;

    /// Ask the platform to resume a suspended context
    fn resume_context(&mut self);
}
