//! Playback events
//!
//! Event-based communication for UI synchronization during playback.
//! Every emission carries a fresh [`PlayerState`](crate::PlayerState)
//! snapshot and is delivered synchronously, in the order the causing
//! transitions happened.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Events emitted by the audio player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playback started (the voice confirmed it, not just requested)
    Play,

    /// Playback paused (also emitted on stop)
    Pause,

    /// Current track finished playing naturally
    End,

    /// A track finished loading, or a deferred prime recorded intent
    Load,

    /// Position changed: an explicit seek, or the periodic tick while
    /// playing (so time displays update without polling the voice)
    Seek {
        /// Current playback position
        position: Duration,
    },

    /// Volume or mute changed
    Volume {
        /// New volume (0.0-1.0)
        volume: f32,
        /// New mute state
        muted: bool,
    },

    /// Playback failed; emitted even when an automatic retry follows
    Error {
        /// Failure description from the backend
        message: String,
    },
}

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
