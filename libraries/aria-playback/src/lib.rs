//! Aria - Playback Management
//!
//! Platform-agnostic play queue and audio player for Aria.
//!
//! This crate provides:
//! - Play queue with shuffle (Fisher-Yates, current-track preserving)
//!   and repeat modes (Off, All, One)
//! - Single-voice audio player state machine with pending seeks and a
//!   one-shot failure recovery protocol
//! - Event channel with fresh state snapshots per emission
//! - A [`PlaybackBackend`] trait so platforms (and tests) supply the
//!   actual audio primitive
//!
//! # Architecture
//!
//! `aria-playback` owns no I/O and no platform audio API. The host
//! constructs a backend, hands tracks to the queue, drives the player
//! from its event loop (`tick` at ~100 ms while playing), and renders
//! the snapshots the event channel delivers.
//!
//! # Example: Queue Navigation
//!
//! ```rust
//! use aria_core::Track;
//! use aria_playback::{PlayQueue, RepeatMode};
//!
//! let mut queue = PlayQueue::new();
//! queue.set_queue(
//!     vec![
//!         Track::new("a", "First", "/api/songs/a/stream"),
//!         Track::new("b", "Second", "/api/songs/b/stream"),
//!     ],
//!     0,
//! );
//!
//! queue.set_repeat_mode(RepeatMode::All);
//! assert_eq!(queue.next().unwrap().id, "b");
//! assert_eq!(queue.next().unwrap().id, "a"); // wrapped
//! ```
//!
//! # Example: Player over a Backend
//!
//! ```rust,no_run
//! use aria_playback::{AudioPlayer, PlayerConfig, PlaybackBackend};
//!
//! fn run(backend: impl PlaybackBackend) {
//!     let mut player = AudioPlayer::new(backend, PlayerConfig::default());
//!     player.subscribe(|event, state| {
//!         println!("{:?} at {:?}", event, state.position);
//!     });
//!     // player.play(track);
//! }
//! ```

#![forbid(unsafe_code)]

mod backend;
mod error;
mod events;
mod player;
mod queue;
mod shuffle;
pub mod types;

// Public exports
pub use backend::{
    detect_format, AudioFormat, ContextState, PlaybackBackend, Voice, VoiceEvent, VoiceRequest,
};
pub use error::{PlaybackError, Result};
pub use events::{PlayerEvent, SubscriptionId};
pub use player::{AudioPlayer, TICK_INTERVAL};
pub use queue::{PlayQueue, QueueSnapshot};
pub use shuffle::{shuffle_tracks, shuffle_tracks_with};
pub use types::{PlayerConfig, PlayerState, RepeatMode};
