//! Aria Core
//!
//! Platform-agnostic domain types shared by the Aria playback libraries.
//!
//! The core crate defines the [`Track`] value type that the host
//! application constructs from library/ingestion data and hands to the
//! play queue and audio player. The core never fetches tracks itself;
//! it only describes them.
//!
//! # Example
//!
//! ```rust
//! use aria_core::Track;
//!
//! let track = Track::new("t-1", "My Favorite Song", "/api/songs/t-1/stream");
//! assert_eq!(track.playback_url(), "/api/songs/t-1/stream");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod track;

pub use track::Track;
