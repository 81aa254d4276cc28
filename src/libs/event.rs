//! Discrete tracker events written to the activity log.
//!
//! Every record in the log corresponds to exactly one [`TrackerEvent`]. Events
//! carry no payload; everything else on a log line (dates, project name,
//! process id) is filled in by the value providers at render time.
//!
//! ## Event Families
//!
//! - **Lifecycle**: `editor-start`, `tracker-started`, `editor-close`, `tracker-destroyed`
//! - **Play mode**: `playmode-enter`, `playmode-exit`, `playmode-pause`, `playmode-unpause`
//! - **Attention**: `editor-focus`, `editor-blur`, `user-afk`, `user-interaction`

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// A discrete occurrence recorded by the tracker.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[value(rename_all = "kebab-case")]
pub enum TrackerEvent {
    TrackerStarted,
    TrackerDestroyed,
    EditorStart,
    EditorClose,
    PlaymodeEnter,
    PlaymodeExit,
    PlaymodePause,
    PlaymodeUnpause,
    EditorFocus,
    EditorBlur,
    UserAfk,
    UserInteraction,
}

impl TrackerEvent {
    /// Every event variant, in declaration order.
    pub const ALL: [TrackerEvent; 12] = [
        TrackerEvent::TrackerStarted,
        TrackerEvent::TrackerDestroyed,
        TrackerEvent::EditorStart,
        TrackerEvent::EditorClose,
        TrackerEvent::PlaymodeEnter,
        TrackerEvent::PlaymodeExit,
        TrackerEvent::PlaymodePause,
        TrackerEvent::PlaymodeUnpause,
        TrackerEvent::EditorFocus,
        TrackerEvent::EditorBlur,
        TrackerEvent::UserAfk,
        TrackerEvent::UserInteraction,
    ];

    /// The textual name written by the `%event%` placeholder.
    pub fn name(self) -> &'static str {
        match self {
            TrackerEvent::TrackerStarted => "tracker-started",
            TrackerEvent::TrackerDestroyed => "tracker-destroyed",
            TrackerEvent::EditorStart => "editor-start",
            TrackerEvent::EditorClose => "editor-close",
            TrackerEvent::PlaymodeEnter => "playmode-enter",
            TrackerEvent::PlaymodeExit => "playmode-exit",
            TrackerEvent::PlaymodePause => "playmode-pause",
            TrackerEvent::PlaymodeUnpause => "playmode-unpause",
            TrackerEvent::EditorFocus => "editor-focus",
            TrackerEvent::EditorBlur => "editor-blur",
            TrackerEvent::UserAfk => "user-afk",
            TrackerEvent::UserInteraction => "user-interaction",
        }
    }
}

impl fmt::Display for TrackerEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackerEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackerEvent::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| format!("unknown event '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = TrackerEvent::ALL.iter().map(|e| e.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TrackerEvent::ALL.len());
    }

    #[test]
    fn clap_value_names_match_display_names() {
        for event in TrackerEvent::ALL {
            let value = event.to_possible_value().unwrap();
            assert_eq!(value.get_name(), event.name());
        }
    }

    #[test]
    fn parse_from_name() {
        assert_eq!("user-afk".parse::<TrackerEvent>(), Ok(TrackerEvent::UserAfk));
        assert_eq!("editor-blur".parse::<TrackerEvent>(), Ok(TrackerEvent::EditorBlur));
        assert!("EditorBlur".parse::<TrackerEvent>().is_err());
    }
}
