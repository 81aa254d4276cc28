//! Activity state machine.
//!
//! The monitor turns continuously polled editor signals into discrete
//! transition events. It owns the only mutable tracking state
//! ([`ActivityState`]) and compares it against what the host reports on each
//! tick:
//!
//! ```text
//!   tick(observation)
//!        │
//!        ├─ focus changed? ──────────────▶ editor-focus / editor-blur
//!        ├─ playing? ────────────────────▶ last_interaction = now
//!        └─ now - last_interaction
//!              > threshold, not AFK ─────▶ user-afk
//!              ≤ threshold, AFK ─────────▶ user-interaction
//! ```
//!
//! Detection is polling based: `is_afk` may be stale between ticks but is
//! always consistent with the threshold right after one. Play-mode and pause
//! transitions are edge-triggered by host callbacks and bypass the
//! comparison entirely.
//!
//! Play mode counts as interaction on every tick, so an unattended play
//! session never reads as AFK.

use super::event::TrackerEvent;
use super::host::{Host, PauseState, PlayModeChange};
use serde::{Deserialize, Serialize};

/// Tracking state carried between ticks.
///
/// Serializable so a host can persist it across reloads and hand it back to
/// [`ActivityMonitor::from_state`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityState {
    /// Focus flag observed on the previous tick.
    pub focused: bool,
    /// Session time, in seconds, of the most recent interaction.
    pub last_interaction: f64,
    /// Whether the user was away as of the previous tick.
    pub is_afk: bool,
}

impl ActivityState {
    pub fn new(focused: bool) -> Self {
        ActivityState {
            focused,
            last_interaction: 0.0,
            is_afk: false,
        }
    }
}

/// Host signals sampled at a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub focused: bool,
    pub playing: bool,
    /// Session time in seconds.
    pub now: f64,
}

impl Observation {
    pub fn from_host(host: &dyn Host) -> Self {
        Observation {
            focused: host.is_focused(),
            playing: host.is_playing(),
            now: host.session_elapsed(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityMonitor {
    state: ActivityState,
}

impl ActivityMonitor {
    /// Starts tracking with the host's current focus and no recorded interaction.
    pub fn new(focused: bool) -> Self {
        Self::from_state(ActivityState::new(focused))
    }

    pub fn from_state(state: ActivityState) -> Self {
        ActivityMonitor { state }
    }

    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Advances the machine by one tick and returns the transitions it detected,
    /// focus changes first.
    pub fn tick(&mut self, observation: Observation, afk_threshold: f64) -> Vec<TrackerEvent> {
        let mut events = Vec::new();

        if observation.focused != self.state.focused {
            events.push(if observation.focused {
                TrackerEvent::EditorFocus
            } else {
                TrackerEvent::EditorBlur
            });
            self.state.focused = observation.focused;
        }

        if observation.playing {
            self.state.last_interaction = observation.now;
        }

        let afk = observation.now - self.state.last_interaction > afk_threshold;
        if afk != self.state.is_afk {
            events.push(if afk {
                TrackerEvent::UserAfk
            } else {
                TrackerEvent::UserInteraction
            });
            self.state.is_afk = afk;
        }

        events
    }

    /// Records raw user input. Never emits an event by itself; a pending
    /// `user-interaction` is reported on the next tick.
    pub fn user_input(&mut self, now: f64) {
        self.state.last_interaction = now;
    }

    /// Maps a play-mode callback to its event. Edit-mode transitions are not logged.
    pub fn play_mode_changed(change: PlayModeChange) -> Option<TrackerEvent> {
        match change {
            PlayModeChange::EnteredPlayMode => Some(TrackerEvent::PlaymodeEnter),
            PlayModeChange::ExitingPlayMode => Some(TrackerEvent::PlaymodeExit),
            PlayModeChange::EnteredEditMode | PlayModeChange::ExitingEditMode => None,
        }
    }

    pub fn pause_changed(state: PauseState) -> TrackerEvent {
        match state {
            PauseState::Paused => TrackerEvent::PlaymodePause,
            PauseState::Unpaused => TrackerEvent::PlaymodeUnpause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(now: f64) -> Observation {
        Observation {
            focused: true,
            playing: false,
            now,
        }
    }

    #[test]
    fn afk_declared_once_after_threshold() {
        let mut monitor = ActivityMonitor::new(true);

        assert!(monitor.tick(at(59.0), 60.0).is_empty());
        assert!(!monitor.state().is_afk);

        assert_eq!(monitor.tick(at(61.0), 60.0), vec![TrackerEvent::UserAfk]);
        assert!(monitor.state().is_afk);

        assert!(monitor.tick(at(62.0), 60.0).is_empty());
        assert!(monitor.tick(at(500.0), 60.0).is_empty());
    }

    #[test]
    fn exactly_threshold_is_not_afk() {
        let mut monitor = ActivityMonitor::new(true);
        assert!(monitor.tick(at(60.0), 60.0).is_empty());
        assert!(!monitor.state().is_afk);
    }

    #[test]
    fn input_returns_user_on_next_tick() {
        let mut monitor = ActivityMonitor::new(true);
        monitor.tick(at(61.0), 60.0);

        monitor.user_input(70.0);
        assert!(monitor.state().is_afk, "input alone must not clear AFK");

        assert_eq!(monitor.tick(at(71.0), 60.0), vec![TrackerEvent::UserInteraction]);
        assert!(!monitor.state().is_afk);
    }

    #[test]
    fn focus_flips_emit_one_event_each() {
        let mut monitor = ActivityMonitor::new(true);
        let blurred = Observation { focused: false, ..at(1.0) };

        assert_eq!(monitor.tick(blurred, 60.0), vec![TrackerEvent::EditorBlur]);
        assert!(monitor.tick(blurred, 60.0).is_empty());
        assert_eq!(monitor.tick(at(2.0), 60.0), vec![TrackerEvent::EditorFocus]);
        assert!(monitor.tick(at(3.0), 60.0).is_empty());
    }

    #[test]
    fn focus_event_precedes_afk_event() {
        let mut monitor = ActivityMonitor::new(true);
        let blurred = Observation { focused: false, ..at(90.0) };
        assert_eq!(
            monitor.tick(blurred, 60.0),
            vec![TrackerEvent::EditorBlur, TrackerEvent::UserAfk]
        );
    }

    #[test]
    fn play_mode_suppresses_afk() {
        let mut monitor = ActivityMonitor::new(true);
        for second in 0..600 {
            let observation = Observation {
                playing: true,
                ..at(f64::from(second))
            };
            assert!(monitor.tick(observation, 30.0).is_empty());
            assert!(!monitor.state().is_afk);
        }
        assert_eq!(monitor.state().last_interaction, 599.0);
    }

    #[test]
    fn play_mode_clears_existing_afk() {
        let mut monitor = ActivityMonitor::new(true);
        monitor.tick(at(100.0), 60.0);
        let playing = Observation { playing: true, ..at(101.0) };
        assert_eq!(monitor.tick(playing, 60.0), vec![TrackerEvent::UserInteraction]);
    }

    #[test]
    fn resumed_state_is_continued() {
        let state = ActivityState {
            focused: false,
            last_interaction: 40.0,
            is_afk: true,
        };
        let mut monitor = ActivityMonitor::from_state(state);
        let observation = Observation { focused: false, ..at(120.0) };
        assert!(monitor.tick(observation, 60.0).is_empty());
    }

    #[test]
    fn play_mode_callbacks() {
        assert_eq!(
            ActivityMonitor::play_mode_changed(PlayModeChange::EnteredPlayMode),
            Some(TrackerEvent::PlaymodeEnter)
        );
        assert_eq!(
            ActivityMonitor::play_mode_changed(PlayModeChange::ExitingPlayMode),
            Some(TrackerEvent::PlaymodeExit)
        );
        assert_eq!(ActivityMonitor::play_mode_changed(PlayModeChange::EnteredEditMode), None);
        assert_eq!(ActivityMonitor::pause_changed(PauseState::Paused), TrackerEvent::PlaymodePause);
        assert_eq!(ActivityMonitor::pause_changed(PauseState::Unpaused), TrackerEvent::PlaymodeUnpause);
    }
}
