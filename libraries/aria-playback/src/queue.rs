//! Play queue with shuffle and repeat policy
//!
//! Maintains the ordered list of tracks to play next and the
//! currently-playing position. Navigation applies the repeat policy;
//! shuffle permutes the working order while `original_order` retains
//! the user's ordering so shuffle can be toggled off losslessly.
//!
//! All operations are synchronous and side-effect-free on invalid
//! input (unknown ids, out-of-range indices): the contract is
//! "return `None` / no-op", never a panic or an error.

use crate::shuffle::{self, position_of};
use crate::types::RepeatMode;
use aria_core::Track;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Defensive copy of the queue state
///
/// Callers cannot mutate the queue's internal lists through a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Current (possibly shuffled) play order
    pub tracks: Vec<Track>,

    /// Unshuffled order as the user arranged it
    pub original_order: Vec<Track>,

    /// Index of the current track in `tracks`; `None` iff empty
    pub current_index: Option<usize>,

    /// Whether shuffle is active
    pub shuffle_enabled: bool,

    /// Active repeat mode
    pub repeat_mode: RepeatMode,
}

/// Ordered track list with a current-position pointer
///
/// Invariants held by every operation:
/// - `tracks` and `original_order` contain the same multiset of ids
/// - `current_index` is `None` iff the queue is empty, otherwise in range
#[derive(Debug, Clone)]
pub struct PlayQueue {
    /// Current play order (shuffled while shuffle is on)
    tracks: Vec<Track>,

    /// Order before shuffle (for restoring)
    original_order: Vec<Track>,

    /// Position of the current track in `tracks`
    current_index: Option<usize>,

    /// Whether `tracks` is currently a shuffled permutation
    shuffle_enabled: bool,

    /// Repeat policy applied by `next`/`previous`
    repeat_mode: RepeatMode,
}

impl PlayQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            original_order: Vec::new(),
            current_index: None,
            shuffle_enabled: false,
            repeat_mode: RepeatMode::Off,
        }
    }

    // ===== Queue contents =====

    /// Replace the queue wholesale
    ///
    /// Both orders are replaced by a copy of `tracks` and the current
    /// position is set to `start_index`. Callers must supply a valid
    /// index for a non-empty list; out-of-range values are pulled back
    /// to the last track rather than left dangling. If shuffle is
    /// already on, a fresh shuffle order is generated over the new
    /// list, keeping the track at `start_index` current.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        self.original_order = tracks.clone();
        self.tracks = tracks;
        self.current_index = if self.tracks.is_empty() {
            None
        } else {
            Some(start_index.min(self.tracks.len() - 1))
        };

        if self.shuffle_enabled {
            self.reshuffle_preserving_current(&mut rand::thread_rng());
        }
    }

    /// Insert a track (at the end if `position` is omitted)
    ///
    /// The insertion lands in both orders. With shuffle active the
    /// whole list is reshuffled; prior shuffle positions are not
    /// preserved. The currently playing track stays current.
    pub fn add_track(&mut self, track: Track, position: Option<usize>) {
        let at = position
            .unwrap_or(self.original_order.len())
            .min(self.original_order.len());
        self.original_order.insert(at, track.clone());

        if self.shuffle_enabled {
            self.reshuffle_preserving_current(&mut rand::thread_rng());
        } else {
            let at = at.min(self.tracks.len());
            self.tracks.insert(at, track);
            if let Some(current) = self.current_index {
                if at <= current {
                    self.current_index = Some(current + 1);
                }
            }
        }

        if self.current_index.is_none() {
            self.current_index = Some(0);
        }
    }

    /// Remove the first track with a matching id from both orders
    ///
    /// Returns the removed track, or `None` (and changes nothing) if
    /// the id is not present. The current position follows the track
    /// it pointed at: it is decremented when an earlier track is
    /// removed, and clamped to the last index when the removed track
    /// was the current one at the end of the list.
    pub fn remove_track(&mut self, id: &str) -> Option<Track> {
        let index = position_of(&self.tracks, id)?;
        let removed = self.tracks.remove(index);
        if let Some(original_pos) = position_of(&self.original_order, id) {
            self.original_order.remove(original_pos);
        }

        if let Some(current) = self.current_index {
            if self.tracks.is_empty() {
                self.current_index = None;
            } else if index < current {
                self.current_index = Some(current - 1);
            } else if current >= self.tracks.len() {
                self.current_index = Some(self.tracks.len() - 1);
            }
        }

        Some(removed)
    }

    /// Empty the queue entirely
    ///
    /// Shuffle and repeat settings persist across a clear.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.original_order.clear();
        self.current_index = None;
    }

    // ===== Read-only lookups =====

    /// The current track, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }

    /// What `next()` would land on, without advancing
    pub fn next_track(&self) -> Option<&Track> {
        let current = self.current_index?;
        match self.repeat_mode {
            RepeatMode::One => self.tracks.get(current),
            RepeatMode::All => self.tracks.get((current + 1) % self.tracks.len()),
            RepeatMode::Off => self.tracks.get(current + 1),
        }
    }

    /// What `previous()` would land on, without moving
    pub fn previous_track(&self) -> Option<&Track> {
        let current = self.current_index?;
        match self.repeat_mode {
            RepeatMode::All => {
                let prev = if current == 0 {
                    self.tracks.len() - 1
                } else {
                    current - 1
                };
                self.tracks.get(prev)
            }
            // repeat-one has no special case going backwards
            RepeatMode::Off | RepeatMode::One => self.tracks.get(current.saturating_sub(1)),
        }
    }

    // ===== Navigation =====

    /// Advance to the next track per the repeat policy
    ///
    /// - `Off`: `None` at the end, index unchanged
    /// - `All`: wraps to the first track
    /// - `One`: always returns the current track, index unchanged
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Track> {
        let current = self.current_index?;
        match self.repeat_mode {
            RepeatMode::One => Some(self.tracks[current].clone()),
            RepeatMode::All => {
                let next = (current + 1) % self.tracks.len();
                self.current_index = Some(next);
                Some(self.tracks[next].clone())
            }
            RepeatMode::Off => {
                if current + 1 >= self.tracks.len() {
                    None
                } else {
                    self.current_index = Some(current + 1);
                    Some(self.tracks[current + 1].clone())
                }
            }
        }
    }

    /// Step back to the previous track
    ///
    /// At the start of the queue this returns the current track with
    /// the index unchanged, except under `RepeatMode::All` where it
    /// wraps to the last track. Repeat-one is ignored going backwards.
    pub fn previous(&mut self) -> Option<Track> {
        let current = self.current_index?;
        match self.repeat_mode {
            RepeatMode::All => {
                let prev = if current == 0 {
                    self.tracks.len() - 1
                } else {
                    current - 1
                };
                self.current_index = Some(prev);
                Some(self.tracks[prev].clone())
            }
            RepeatMode::Off | RepeatMode::One => {
                if current == 0 {
                    Some(self.tracks[0].clone())
                } else {
                    self.current_index = Some(current - 1);
                    Some(self.tracks[current - 1].clone())
                }
            }
        }
    }

    /// Jump directly to the track with a matching id
    ///
    /// Returns `None` and leaves the queue untouched if not found.
    pub fn jump_to(&mut self, id: &str) -> Option<Track> {
        let index = position_of(&self.tracks, id)?;
        self.current_index = Some(index);
        Some(self.tracks[index].clone())
    }

    // ===== Shuffle & repeat =====

    /// Flip shuffle on or off
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle_enabled);
    }

    /// Enable or disable shuffle
    ///
    /// Enabling generates a fresh Fisher-Yates permutation of
    /// `original_order`; disabling restores `original_order`. Either
    /// way the current track is relocated by id afterwards, so the
    /// playing song never appears to change.
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.set_shuffle_with(enabled, &mut rand::thread_rng());
    }

    /// `set_shuffle` with an injected random source
    ///
    /// Lets hosts and tests drive the permutation deterministically.
    pub fn set_shuffle_with<R: Rng>(&mut self, enabled: bool, rng: &mut R) {
        if self.shuffle_enabled == enabled {
            return;
        }
        self.shuffle_enabled = enabled;
        if self.tracks.is_empty() {
            return;
        }

        if enabled {
            self.reshuffle_preserving_current(rng);
        } else {
            let current_id = self.current_id();
            self.tracks = self.original_order.clone();
            self.relocate_current(current_id.as_deref());
        }
    }

    /// Set the repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    /// Cycle Off -> All -> One -> Off
    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.repeat_mode = self.repeat_mode.cycled();
        self.repeat_mode
    }

    // ===== State queries =====

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the queue holds no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the current track, if any
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Whether shuffle is active
    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    /// Active repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Defensive copy of the full queue state
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            tracks: self.tracks.clone(),
            original_order: self.original_order.clone(),
            current_index: self.current_index,
            shuffle_enabled: self.shuffle_enabled,
            repeat_mode: self.repeat_mode,
        }
    }

    // ===== Internal =====

    fn current_id(&self) -> Option<String> {
        self.current_track().map(|t| t.id.clone())
    }

    /// Build a fresh shuffle order over `original_order`, then
    /// re-identify the current track by id (never by index)
    fn reshuffle_preserving_current<R: Rng>(&mut self, rng: &mut R) {
        let current_id = self.current_id();
        self.tracks = self.original_order.clone();
        shuffle::shuffle_tracks_with(&mut self.tracks, rng);
        self.relocate_current(current_id.as_deref());
    }

    fn relocate_current(&mut self, previous_id: Option<&str>) {
        if self.tracks.is_empty() {
            self.current_index = None;
            return;
        }
        self.current_index = previous_id
            .and_then(|id| position_of(&self.tracks, id))
            .or_else(|| self.current_index.map(|i| i.min(self.tracks.len() - 1)));
    }
}

impl Default for PlayQueue {
    fn default() -> Self {
        Self::new()
    }
}
