//! Inbound hardware transport keys
//!
//! The OS delivers transport commands (lock screen buttons, headset
//! keys) as [`TransportCommand`]s; [`route_command`] forwards them to
//! the player/queue pair. Offsets arrive as float seconds because the
//! OS may omit them or send garbage; missing offsets default to 10
//! seconds and invalid ones drop the command.

use aria_playback::{AudioPlayer, PlayQueue, PlaybackBackend};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Seek offset applied when the OS does not supply one
pub const DEFAULT_SEEK_OFFSET_SECS: f64 = 10.0;

/// Hardware/OS transport command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransportCommand {
    /// Play/resume key
    Play,
    /// Pause key
    Pause,
    /// Next-track key
    Next,
    /// Previous-track key
    Previous,
    /// Absolute seek, in seconds
    SeekTo(f64),
    /// Relative seek backwards; `None` when the OS sends no offset
    SeekBackward(Option<f64>),
    /// Relative seek forwards; `None` when the OS sends no offset
    SeekForward(Option<f64>),
}

/// Forward a transport command into the player and queue
pub fn route_command<B: PlaybackBackend>(
    command: TransportCommand,
    player: &mut AudioPlayer<B>,
    queue: &mut PlayQueue,
) {
    match command {
        TransportCommand::Play => player.resume(),
        TransportCommand::Pause => player.pause(),
        TransportCommand::Next => {
            if let Some(track) = queue.next() {
                player.play(track);
            }
        }
        TransportCommand::Previous => {
            if let Some(track) = queue.previous() {
                player.play(track);
            }
        }
        TransportCommand::SeekTo(seconds) => {
            if seconds.is_finite() && seconds >= 0.0 {
                player.seek(Duration::from_secs_f64(seconds));
            } else {
                tracing::debug!(seconds, "ignoring seek-to with invalid position");
            }
        }
        TransportCommand::SeekBackward(offset) => {
            if let Some(offset) = resolve_offset(offset) {
                let target = player.state().position.saturating_sub(offset);
                player.seek(target);
            }
        }
        TransportCommand::SeekForward(offset) => {
            if let Some(offset) = resolve_offset(offset) {
                let state = player.state();
                let mut target = state.position + offset;
                if let Some(duration) = state.duration {
                    target = target.min(duration);
                }
                player.seek(target);
            }
        }
    }
}

/// Missing offsets default; non-finite or non-positive ones are ignored
fn resolve_offset(offset: Option<f64>) -> Option<Duration> {
    match offset {
        None => Some(Duration::from_secs_f64(DEFAULT_SEEK_OFFSET_SECS)),
        Some(seconds) if seconds.is_finite() && seconds > 0.0 => {
            Some(Duration::from_secs_f64(seconds))
        }
        Some(seconds) => {
            tracing::debug!(seconds, "ignoring transport seek with invalid offset");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_core::Track;
    use aria_playback::{
        ContextState, PlayerConfig, Result as PlaybackResult, Voice, VoiceEvent, VoiceRequest,
    };
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    // ===== Minimal instant backend =====

    #[derive(Default)]
    struct VoiceLog {
        seeks: Vec<Duration>,
        position: Duration,
    }

    struct InstantVoice {
        log: Rc<RefCell<VoiceLog>>,
        queued: VecDeque<VoiceEvent>,
        duration: Duration,
    }

    impl Voice for InstantVoice {
        fn begin_playback(&mut self) {
            self.queued.push_back(VoiceEvent::PlayStarted);
        }

        fn pause(&mut self) {
            self.queued.push_back(VoiceEvent::Paused);
        }

        fn seek(&mut self, position: Duration) {
            let mut log = self.log.borrow_mut();
            log.position = position;
            log.seeks.push(position);
        }

        fn position(&self) -> Duration {
            self.log.borrow().position
        }

        fn duration(&self) -> Option<Duration> {
            Some(self.duration)
        }

        fn is_loaded(&self) -> bool {
            true
        }

        fn set_volume(&mut self, _volume: f32) {}

        fn set_muted(&mut self, _muted: bool) {}

        fn unload(&mut self) {}

        fn poll(&mut self) -> Option<VoiceEvent> {
            self.queued.pop_front()
        }
    }

    struct InstantBackend {
        log: Rc<RefCell<VoiceLog>>,
        duration: Duration,
    }

    impl InstantBackend {
        fn new(duration: Duration) -> (Self, Rc<RefCell<VoiceLog>>) {
            let log = Rc::new(RefCell::new(VoiceLog::default()));
            (
                Self {
                    log: Rc::clone(&log),
                    duration,
                },
                log,
            )
        }
    }

    impl aria_playback::PlaybackBackend for InstantBackend {
        fn create_voice(&mut self, _request: &VoiceRequest) -> PlaybackResult<Box<dyn Voice>> {
            // Fresh position per voice, shared seek log for assertions
            self.log.borrow_mut().position = Duration::ZERO;
            Ok(Box::new(InstantVoice {
                log: Rc::clone(&self.log),
                queued: VecDeque::from([VoiceEvent::Loaded {
                    duration: Some(self.duration),
                }]),
                duration: self.duration,
            }))
        }

        fn context_state(&self) -> ContextState {
            ContextState::Running
        }

        fn resume_context(&mut self) {}
    }

    fn setup(
        track_ids: &[&str],
    ) -> (AudioPlayer<InstantBackend>, PlayQueue, Rc<RefCell<VoiceLog>>) {
        let (backend, log) = InstantBackend::new(Duration::from_secs(60));
        let mut player = AudioPlayer::new(backend, PlayerConfig::default());
        let mut queue = PlayQueue::new();
        queue.set_queue(
            track_ids
                .iter()
                .map(|id| Track::new(*id, format!("Track {}", id), format!("/s/{}", id)))
                .collect(),
            0,
        );
        if let Some(track) = queue.current_track().cloned() {
            player.play(track);
        }
        (player, queue, log)
    }

    #[test]
    fn next_command_advances_queue_and_player() {
        let (mut player, mut queue, _log) = setup(&["a", "b", "c"]);

        route_command(TransportCommand::Next, &mut player, &mut queue);

        assert_eq!(queue.current_track().unwrap().id, "b");
        assert_eq!(player.current_track().unwrap().id, "b");
        assert!(player.is_playing());
    }

    #[test]
    fn next_at_queue_end_does_nothing() {
        let (mut player, mut queue, _log) = setup(&["a"]);

        route_command(TransportCommand::Next, &mut player, &mut queue);

        // Repeat Off at the end: queue returns None, player untouched
        assert_eq!(player.current_track().unwrap().id, "a");
    }

    #[test]
    fn previous_command_steps_back() {
        let (mut player, mut queue, _log) = setup(&["a", "b", "c"]);
        route_command(TransportCommand::Next, &mut player, &mut queue);

        route_command(TransportCommand::Previous, &mut player, &mut queue);

        assert_eq!(player.current_track().unwrap().id, "a");
    }

    #[test]
    fn pause_and_play_round_trip() {
        let (mut player, mut queue, _log) = setup(&["a"]);
        assert!(player.is_playing());

        route_command(TransportCommand::Pause, &mut player, &mut queue);
        assert!(!player.is_playing());

        route_command(TransportCommand::Play, &mut player, &mut queue);
        assert!(player.is_playing());
    }

    #[test]
    fn seek_to_goes_through() {
        let (mut player, mut queue, log) = setup(&["a"]);

        route_command(TransportCommand::SeekTo(30.0), &mut player, &mut queue);

        assert_eq!(log.borrow().seeks, vec![Duration::from_secs(30)]);
    }

    #[test]
    fn seek_to_invalid_position_is_ignored() {
        let (mut player, mut queue, log) = setup(&["a"]);

        route_command(TransportCommand::SeekTo(f64::NAN), &mut player, &mut queue);
        route_command(TransportCommand::SeekTo(-4.0), &mut player, &mut queue);

        assert!(log.borrow().seeks.is_empty());
    }

    #[test]
    fn seek_backward_defaults_to_ten_seconds() {
        let (mut player, mut queue, log) = setup(&["a"]);
        route_command(TransportCommand::SeekTo(30.0), &mut player, &mut queue);

        route_command(TransportCommand::SeekBackward(None), &mut player, &mut queue);

        assert_eq!(log.borrow().seeks.last(), Some(&Duration::from_secs(20)));
    }

    #[test]
    fn seek_backward_saturates_at_zero() {
        let (mut player, mut queue, log) = setup(&["a"]);
        route_command(TransportCommand::SeekTo(3.0), &mut player, &mut queue);

        route_command(TransportCommand::SeekBackward(None), &mut player, &mut queue);

        assert_eq!(log.borrow().seeks.last(), Some(&Duration::ZERO));
    }

    #[test]
    fn seek_forward_clamps_to_duration() {
        let (mut player, mut queue, log) = setup(&["a"]);
        route_command(TransportCommand::SeekTo(55.0), &mut player, &mut queue);

        route_command(TransportCommand::SeekForward(None), &mut player, &mut queue);

        // Voice duration is 60s; 55 + 10 clamps to 60
        assert_eq!(log.borrow().seeks.last(), Some(&Duration::from_secs(60)));
    }

    #[test]
    fn invalid_offsets_drop_the_command() {
        let (mut player, mut queue, log) = setup(&["a"]);
        route_command(TransportCommand::SeekTo(30.0), &mut player, &mut queue);
        let seeks_before = log.borrow().seeks.len();

        route_command(
            TransportCommand::SeekBackward(Some(f64::NAN)),
            &mut player,
            &mut queue,
        );
        route_command(
            TransportCommand::SeekForward(Some(0.0)),
            &mut player,
            &mut queue,
        );
        route_command(
            TransportCommand::SeekForward(Some(-2.5)),
            &mut player,
            &mut queue,
        );

        assert_eq!(log.borrow().seeks.len(), seeks_before);
    }

    #[test]
    fn explicit_offset_is_used() {
        let (mut player, mut queue, log) = setup(&["a"]);
        route_command(TransportCommand::SeekTo(30.0), &mut player, &mut queue);

        route_command(
            TransportCommand::SeekForward(Some(5.0)),
            &mut player,
            &mut queue,
        );

        assert_eq!(log.borrow().seeks.last(), Some(&Duration::from_secs(35)));
    }
}
