//! Aria - Media Session Bridge
//!
//! Thin adapter between the playback core and the OS "now playing"
//! surface (lock screen, hardware transport keys, headset buttons).
//!
//! Outbound, [`MediaSessionBridge`] turns [`PlayerState`] snapshots
//! into metadata/status/position updates on a host-supplied
//! [`MediaSessionSink`], validating position tuples the OS would
//! reject. Inbound, [`route_command`] forwards [`TransportCommand`]s
//! from hardware keys into the player/queue pair.
//!
//! Missing media-session support is benign: plug in [`NoopSink`].
//!
//! [`PlayerState`]: aria_playback::PlayerState

#![forbid(unsafe_code)]

mod session;
mod transport;

// Public exports
pub use session::{
    MediaSessionBridge, MediaSessionSink, NoopSink, NowPlayingInfo, PositionState,
    SessionPlaybackStatus,
};
pub use transport::{route_command, TransportCommand, DEFAULT_SEEK_OFFSET_SECS};
