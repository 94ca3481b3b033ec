//! Audio player - single-voice state machine
//!
//! Owns exactly one backend voice at a time, exposes transport
//! controls, and survives transient failures (decode errors, autoplay
//! policy rejections) without leaving subscribers in an inconsistent
//! state. The voice is torn down and recreated on every track swap so
//! event wiring is always fresh.

use crate::backend::{detect_format, ContextState, PlaybackBackend, Voice, VoiceEvent, VoiceRequest};
use crate::events::{PlayerEvent, SubscriptionId};
use crate::types::{PlayerConfig, PlayerState};
use aria_core::Track;
use std::time::Duration;

/// Cadence hosts should call [`AudioPlayer::tick`] at while playing, so
/// time displays update smoothly without polling the voice themselves
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Message fragments browsers use when rejecting an unprimed `play()`
///
/// An autoplay rejection is expected and user-driven; it must not be
/// logged or surfaced like a genuine decode failure.
const AUTOPLAY_REJECTION_MARKERS: [&str; 2] =
    ["user didn't interact", "not within a user interaction"];

fn is_autoplay_rejection(message: &str) -> bool {
    AUTOPLAY_REJECTION_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

type Listener = Box<dyn FnMut(&PlayerEvent, &PlayerState)>;

/// Stateful wrapper around one playback voice
///
/// Constructed explicitly with an injected backend; the application's
/// composition root owns its lifecycle and keeps exactly one instance
/// per playback voice.
pub struct AudioPlayer<B: PlaybackBackend> {
    backend: B,
    config: PlayerConfig,

    voice: Option<Box<dyn Voice>>,
    current_track: Option<Track>,

    /// Seek target recorded before the voice is ready; applied as soon
    /// as it reaches a loaded or playing state
    pending_seek: Option<Duration>,

    /// Set while a one-shot automatic retry is in flight
    recovering: bool,

    /// Whether the current voice was ever observed playing
    voice_ever_played: bool,

    /// A prime was requested before the audio context was activated
    prime_deferred: bool,

    volume: f32,
    muted: bool,
    is_playing: bool,
    is_loading: bool,

    listeners: Vec<(u64, Listener)>,
    next_subscription: u64,
}

impl<B: PlaybackBackend> AudioPlayer<B> {
    /// Create a player over the given backend
    pub fn new(backend: B, config: PlayerConfig) -> Self {
        let volume = config.volume.clamp(0.0, 1.0);
        let muted = config.muted;
        Self {
            backend,
            config,
            voice: None,
            current_track: None,
            pending_seek: None,
            recovering: false,
            voice_ever_played: false,
            prime_deferred: false,
            volume,
            muted,
            is_playing: false,
            is_loading: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // ===== Subscriptions =====

    /// Register an event listener
    ///
    /// Every emission carries the event and a fresh state snapshot.
    /// Listeners must not call back into the player.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PlayerEvent, &PlayerState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id.0, Box::new(listener)));
        id
    }

    /// Remove a previously registered listener
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id.0);
    }

    // ===== Transport =====

    /// Start playing a track
    ///
    /// Any existing voice is torn down unconditionally, even for the
    /// same track, then a fresh voice is constructed and playback
    /// requested. Returns once playback has been requested; the start
    /// is confirmed asynchronously by a [`PlayerEvent::Play`].
    pub fn play(&mut self, track: Track) {
        self.recovering = false;
        self.start_playback(track, true);
    }

    /// Load a track without starting playback
    ///
    /// Used to prepare the next track while the previous one is still
    /// showing. If the audio context has not been activated by a user
    /// gesture yet, constructing a voice would trip the autoplay
    /// policy, so the intent is recorded and a `Load` notification
    /// emitted without touching the backend; a later [`resume`] turns
    /// the deferred prime into a real `play`.
    ///
    /// [`resume`]: AudioPlayer::resume
    pub fn prime(&mut self, track: Track) {
        self.recovering = false;
        if self.backend.context_state() != ContextState::Running {
            tracing::debug!(track = %track.id, "audio context not running; deferring prime");
            self.teardown_voice();
            self.current_track = Some(track);
            self.pending_seek = None;
            self.is_playing = false;
            self.is_loading = false;
            self.prime_deferred = true;
            self.emit(PlayerEvent::Load);
            return;
        }
        self.start_playback(track, false);
    }

    /// Pause playback; no-op without a voice
    pub fn pause(&mut self) {
        if let Some(voice) = self.voice.as_mut() {
            voice.pause();
            self.pump();
        }
    }

    /// Resume playback
    ///
    /// With a live voice this requests playback on it; with no voice
    /// but a remembered current track (deferred prime, or a voice torn
    /// down by recovery) it re-invokes `play`. No-op otherwise.
    pub fn resume(&mut self) {
        match self.voice.as_mut() {
            Some(voice) => {
                voice.begin_playback();
                self.pump();
            }
            None => {
                if let Some(track) = self.current_track.clone() {
                    self.play(track);
                }
            }
        }
    }

    /// Tear down the voice and clear the current track
    pub fn stop(&mut self) {
        self.teardown_voice();
        self.current_track = None;
        self.pending_seek = None;
        self.prime_deferred = false;
        let was_playing = self.is_playing;
        self.is_playing = false;
        self.is_loading = false;
        if was_playing {
            self.emit(PlayerEvent::Pause);
        }
    }

    /// Seek to a position in the current track
    ///
    /// Seeking an unloaded source is unreliable, so until the voice is
    /// loaded the target is recorded as a pending seek and applied the
    /// moment the voice reaches a loaded or playing state.
    pub fn seek(&mut self, position: Duration) {
        match self.voice.as_mut() {
            Some(voice) if voice.is_loaded() => {
                voice.seek(position);
                self.emit(PlayerEvent::Seek { position });
            }
            _ => {
                if self.current_track.is_none() {
                    return;
                }
                self.pending_seek = Some(position);
                self.emit(PlayerEvent::Seek { position });
            }
        }
    }

    // ===== Volume =====

    /// Set the global volume, clamped to `[0.0, 1.0]`
    ///
    /// Applies to the live voice and to every future one.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(voice) = self.voice.as_mut() {
            voice.set_volume(self.volume);
        }
        self.emit(PlayerEvent::Volume {
            volume: self.volume,
            muted: self.muted,
        });
    }

    /// Set the global mute state
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(voice) = self.voice.as_mut() {
            voice.set_muted(muted);
        }
        self.emit(PlayerEvent::Volume {
            volume: self.volume,
            muted,
        });
    }

    // ===== State =====

    /// Fresh snapshot of the player state
    ///
    /// While the voice is not loaded the position reports the pending
    /// seek target (or zero) instead of a stale voice time, so time
    /// displays never flash back to 0:00 mid-seek.
    pub fn state(&self) -> PlayerState {
        let position = match self.voice.as_ref() {
            Some(voice) if voice.is_loaded() => voice.position(),
            _ => self.pending_seek.unwrap_or(Duration::ZERO),
        };
        let duration = self
            .voice
            .as_ref()
            .and_then(|voice| voice.duration())
            .or_else(|| self.current_track.as_ref().and_then(|t| t.duration));

        PlayerState {
            current_track: self.current_track.clone(),
            is_playing: self.is_playing,
            position,
            duration,
            volume: self.volume,
            is_muted: self.muted,
            is_loading: self.is_loading,
        }
    }

    /// The track the player currently owns or remembers
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Whether playback is audibly running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether a prime is waiting for audio-context activation
    pub fn prime_deferred(&self) -> bool {
        self.prime_deferred
    }

    /// Drive the player forward
    ///
    /// Hosts call this at roughly [`TICK_INTERVAL`]. Voice events are
    /// drained through the state machine first, then, while playing, a
    /// `Seek` event is re-emitted so time displays stay smooth. The
    /// event for a transition always fires before the tick's `Seek`.
    pub fn tick(&mut self) {
        self.pump();
        if self.is_playing {
            let position = self.state().position;
            self.emit(PlayerEvent::Seek { position });
        }
    }

    // ===== Internal =====

    fn start_playback(&mut self, track: Track, autostart: bool) {
        self.teardown_voice();
        // A pending seek survives voice recreation for the same track
        // (retry, resume of a deferred prime); switching tracks drops it
        let same_track = self
            .current_track
            .as_ref()
            .is_some_and(|current| current.id == track.id);
        if !same_track {
            self.pending_seek = None;
        }
        self.prime_deferred = false;
        self.voice_ever_played = false;
        self.current_track = Some(track.clone());
        self.is_playing = false;
        self.is_loading = true;

        let url = track.playback_url().to_string();
        let request = VoiceRequest {
            format: detect_format(track.mime_type.as_deref(), &url),
            url,
        };

        match self.backend.create_voice(&request) {
            Ok(mut voice) => {
                voice.set_volume(self.volume);
                voice.set_muted(self.muted);
                if autostart {
                    voice.begin_playback();
                }
                self.voice = Some(voice);
                self.pump();
            }
            Err(e) => {
                self.is_loading = false;
                self.handle_play_failure(e.to_string());
            }
        }
    }

    fn teardown_voice(&mut self) {
        if let Some(mut voice) = self.voice.take() {
            voice.unload();
        }
    }

    /// Drain voice events through the state machine
    fn pump(&mut self) {
        loop {
            let event = match self.voice.as_mut() {
                Some(voice) => voice.poll(),
                None => None,
            };
            match event {
                Some(event) => self.handle_voice_event(event),
                None => break,
            }
        }
    }

    fn handle_voice_event(&mut self, event: VoiceEvent) {
        match event {
            VoiceEvent::Loaded { .. } => {
                self.is_loading = false;
                self.apply_pending_seek();
                self.emit(PlayerEvent::Load);
            }
            VoiceEvent::PlayStarted => {
                self.is_playing = true;
                self.is_loading = false;
                self.recovering = false;
                self.voice_ever_played = true;
                self.apply_pending_seek();
                self.emit(PlayerEvent::Play);
            }
            VoiceEvent::Paused => {
                self.is_playing = false;
                self.emit(PlayerEvent::Pause);
            }
            VoiceEvent::Ended => {
                self.is_playing = false;
                self.emit(PlayerEvent::End);
            }
            VoiceEvent::PlayFailed { message } => self.handle_play_failure(message),
            VoiceEvent::LoadFailed { message } => self.handle_load_failure(message),
        }
    }

    fn apply_pending_seek(&mut self) {
        if let Some(position) = self.pending_seek.take() {
            if let Some(voice) = self.voice.as_mut() {
                voice.seek(position);
            }
        }
    }

    /// Playback-start failure recovery
    ///
    /// Autoplay rejections are expected and logged quietly; anything
    /// else is a real failure. Either way: resume a suspended context,
    /// tear the voice down, retry the same track exactly once, and
    /// always tell subscribers.
    fn handle_play_failure(&mut self, message: String) {
        if is_autoplay_rejection(&message) {
            tracing::info!("playback blocked by autoplay policy: {message}");
        } else {
            tracing::warn!("playback start failed: {message}");
        }

        if self.backend.context_state() == ContextState::Suspended {
            self.backend.resume_context();
        }

        self.teardown_voice();
        self.is_playing = false;
        self.is_loading = false;

        if !self.recovering {
            self.recovering = true;
            if let Some(track) = self.current_track.clone() {
                tracing::debug!(track = %track.id, "retrying playback once");
                self.start_playback(track, true);
            }
        } else {
            tracing::error!("playback retry failed, giving up: {message}");
        }

        self.emit(PlayerEvent::Error { message });
    }

    /// Load failures are not retried
    ///
    /// Under a hot-reload toolchain a stale voice can report a load
    /// error after its track is long gone; that narrow case is
    /// suppressed, everything else surfaces like a play error.
    fn handle_load_failure(&mut self, message: String) {
        let stale_dev_voice = self.config.hot_reload_guard
            && self.current_track.is_none()
            && !self.voice_ever_played;

        self.teardown_voice();
        self.is_playing = false;
        self.is_loading = false;

        if stale_dev_voice {
            tracing::debug!("suppressing load error from stale dev voice: {message}");
            return;
        }

        tracing::warn!("failed to load source: {message}");
        self.emit(PlayerEvent::Error { message });
    }

    fn emit(&mut self, event: PlayerEvent) {
        let snapshot = self.state();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event, &snapshot);
        }
    }
}
