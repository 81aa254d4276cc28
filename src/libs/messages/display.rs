//! Display implementation for tracker messages.
//!
//! All message text is defined here so that wording stays consistent between
//! the library's diagnostics and the command-line interface.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigReset => "Configuration reset to defaults".to_string(),
            Message::ConfigModuleTracker => "Time tracker settings".to_string(),
            Message::PreferencesReadFailed(path, error) => {
                format!("Failed to read preferences from \"{}\", using defaults: {}", path, error)
            }
            Message::PreferencesWriteFailed(path) => format!("Failed to write preferences to \"{}\"", path),
            Message::InvalidAfkThreshold(value) => {
                format!("AFK threshold must be a positive number of seconds, got {}", value)
            }
            Message::InvalidLogFilePath(path) => {
                format!("Log file path \"{}\" is not valid UTF-8", path)
            }
            Message::AfkThresholdClamped(requested, applied) => {
                format!("AFK threshold {}s is outside the allowed range, using {}s", requested, applied)
            }
            Message::PromptLogFilePath => "Log file path".to_string(),
            Message::PromptLogLine => "Log line".to_string(),
            Message::PromptAfkThreshold => "AFK threshold (seconds, 30-1800)".to_string(),

            // === LOG FILE MESSAGES ===
            Message::LogWriteFailed { path, error } => {
                format!("Failed to write log to file \"{}\": {}", path, error)
            }
            Message::EventLogged(event) => format!("Logged {}", event),
            Message::PlaceholderUnresolved(token, error) => {
                format!("Placeholder {} left unresolved: {}", token, error)
            }

            // === PREVIEW MESSAGES ===
            Message::PreviewHeader => "Log line preview".to_string(),
            Message::PreviewProvidersHeader => "Log line arguments".to_string(),
            Message::PreviewLogFile(path) => format!("Log file: {}", path),
            Message::OldLogsUnchanged => "Old logs won't change when changing these settings".to_string(),

            // === TRACKER MESSAGES ===
            Message::TrackerStateChanged(event) => format!("Tracker emitted {}", event),
            Message::TrackerResumed => "Tracker resumed from saved state".to_string(),

            // === WATCH MESSAGES ===
            Message::WatchStarted { interval, afk_threshold } => format!(
                "Watching editor activity with tick interval {}ms and AFK threshold {}s",
                interval, afk_threshold
            ),
            Message::WatchHelp => {
                "Type to register activity; commands: play, stop, pause, resume, focus, blur, quit".to_string()
            }
            Message::WatchUnknownCommand(command) => format!("Unknown command '{}', counted as activity", command),
            Message::WatchInputClosed => "Input closed, stopping watcher".to_string(),
            Message::WatchShuttingDown => "Shutting down watcher...".to_string(),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),
        };

        write!(f, "{}", text)
    }
}
