/// Track domain type
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playable audio item
///
/// Immutable once constructed; the queue and player store copies but
/// never mutate identity fields. Two tracks describe the same logical
/// song iff their `id` matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Stable track identifier from the host library
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Cover image locator (served by the host)
    pub cover_url: Option<String>,

    /// Track duration, if known up front
    pub duration: Option<Duration>,

    /// Logical stream locator (e.g. `/api/songs/{id}/stream`)
    pub audio_url: String,

    /// MIME type reported at upload time
    pub mime_type: Option<String>,

    /// Locally-cached or pre-resolved playable URL, overriding `audio_url`
    pub resolved_url: Option<String>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: impl Into<String>, title: impl Into<String>, audio_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
            album: None,
            cover_url: None,
            duration: None,
            audio_url: audio_url.into(),
            mime_type: None,
            resolved_url: None,
        }
    }

    /// The URL playback should actually use
    ///
    /// Prefers `resolved_url` (a locally cached blob) when present.
    pub fn playback_url(&self) -> &str {
        self.resolved_url.as_deref().unwrap_or(&self.audio_url)
    }

    /// Whether two tracks describe the same logical song
    pub fn same_song_as(&self, other: &Track) -> bool {
        self.id == other.id
    }
}
