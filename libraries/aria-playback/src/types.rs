//! Core types for playback management

use aria_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the queue ends
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// Next mode in the Off -> All -> One -> Off cycle
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Player state snapshot
///
/// Handed to event subscribers on every emission; a fresh copy each
/// time, so the UI can never observe a half-applied transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Track the player currently owns a voice for (or remembers)
    pub current_track: Option<Track>,

    /// Whether audio is audibly playing
    pub is_playing: bool,

    /// Playback position; reports a pending seek target while the
    /// voice is still loading so the UI never flashes back to 0:00
    pub position: Duration,

    /// Track duration, from the voice once loaded, else from metadata
    pub duration: Option<Duration>,

    /// Global volume in `[0.0, 1.0]` (applies to every future voice)
    pub volume: f32,

    /// Global mute state
    pub is_muted: bool,

    /// Whether a voice is created but not yet ready
    pub is_loading: bool,
}

/// Configuration for the audio player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Initial mute state (default: false)
    pub muted: bool,

    /// Suppress load errors that match the hot-reload stale-voice
    /// pattern (no current track, voice never played). Only sensible
    /// in development builds; default: false
    pub hot_reload_guard: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
            hot_reload_guard: false,
        }
    }
}
