//! Outbound now-playing surface
//!
//! Translates player state into the metadata/status/position triple the
//! OS media session expects. The OS side is behind [`MediaSessionSink`]
//! so platforms (and tests) supply the actual integration; a platform
//! without media-session support plugs in [`NoopSink`] and everything
//! else keeps working.

use aria_core::Track;
use aria_playback::PlayerState;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metadata for the OS "now playing" display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowPlayingInfo {
    /// Track title
    pub title: String,
    /// Artist name
    pub artist: Option<String>,
    /// Album name
    pub album: Option<String>,
    /// Cover image locator
    pub cover_url: Option<String>,
    /// Track duration
    pub duration: Option<Duration>,
}

impl From<&Track> for NowPlayingInfo {
    fn from(track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            cover_url: track.cover_url.clone(),
            duration: track.duration,
        }
    }
}

/// Playback state as the OS models it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPlaybackStatus {
    /// Audio is playing
    Playing,
    /// A track is loaded but paused
    Paused,
    /// Nothing loaded
    None,
}

impl SessionPlaybackStatus {
    /// Derive the OS status from a player snapshot
    pub fn from_player(state: &PlayerState) -> Self {
        if state.current_track.is_none() {
            SessionPlaybackStatus::None
        } else if state.is_playing {
            SessionPlaybackStatus::Playing
        } else {
            SessionPlaybackStatus::Paused
        }
    }
}

/// Position tuple for the OS seek bar
///
/// Seconds as floats because that is what the OS API takes; the values
/// are validated before ever reaching the sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionState {
    /// Current position in seconds
    pub position: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Playback rate (1.0 for normal speed)
    pub playback_rate: f64,
}

impl PositionState {
    /// Whether the OS position API would accept this tuple
    ///
    /// A non-finite or non-positive duration, or a non-finite position,
    /// is rejected.
    pub fn is_valid(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0 && self.position.is_finite()
    }
}

/// OS media-session surface the host implements
#[cfg_attr(test, mockall::automock)]
pub trait MediaSessionSink {
    /// Update the now-playing metadata
    fn set_now_playing(&mut self, info: &NowPlayingInfo);

    /// Update the playback status
    fn set_playback_status(&mut self, status: SessionPlaybackStatus);

    /// Update the seek-bar position tuple
    fn set_position_state(&mut self, state: &PositionState);

    /// Clear the now-playing display entirely
    fn clear(&mut self);
}

/// Sink for platforms without media-session support
///
/// Lack of support is benign; it is mentioned once at debug level and
/// every update becomes a no-op.
#[derive(Debug, Default)]
pub struct NoopSink {
    announced: bool,
}

impl MediaSessionSink for NoopSink {
    fn set_now_playing(&mut self, _info: &NowPlayingInfo) {
        self.announce();
    }

    fn set_playback_status(&mut self, _status: SessionPlaybackStatus) {
        self.announce();
    }

    fn set_position_state(&mut self, _state: &PositionState) {
        self.announce();
    }

    fn clear(&mut self) {
        self.announce();
    }
}

impl NoopSink {
    fn announce(&mut self) {
        if !self.announced {
            self.announced = true;
            tracing::debug!("media session not supported on this platform; updates dropped");
        }
    }
}

/// Thin adapter between the player and the OS media session
pub struct MediaSessionBridge<S: MediaSessionSink> {
    sink: S,
}

impl<S: MediaSessionSink> MediaSessionBridge<S> {
    /// Create a bridge over the given sink
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Push a full player snapshot to the OS
    ///
    /// Metadata, status, and (when the values pass validation) the
    /// position tuple. Call on every player event; the sink only ever
    /// sees consistent triples.
    pub fn publish(&mut self, state: &PlayerState) {
        match &state.current_track {
            Some(track) => self.sink.set_now_playing(&NowPlayingInfo::from(track)),
            None => self.sink.clear(),
        }
        self.sink
            .set_playback_status(SessionPlaybackStatus::from_player(state));

        let duration = state
            .duration
            .map_or(f64::NAN, |d| d.as_secs_f64());
        self.update_position_state(state.position.as_secs_f64(), duration, 1.0);
    }

    /// Push a position tuple, skipping values the OS would reject
    ///
    /// Invalid input (non-finite or non-positive duration, non-finite
    /// position) is silently dropped; it is not an error.
    pub fn update_position_state(&mut self, position: f64, duration: f64, playback_rate: f64) {
        let state = PositionState {
            position,
            duration,
            playback_rate,
        };
        if !state.is_valid() {
            tracing::debug!(
                position,
                duration,
                "skipping position update the OS would reject"
            );
            return;
        }
        self.sink.set_position_state(&state);
    }

    /// Access the sink (for hosts that own extra platform state there)
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
