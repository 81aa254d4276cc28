//! Every user-facing and diagnostic message the tracker can emit.
//!
//! Text lives in [`display`](super::display); this module only names the
//! messages and the values they interpolate.

#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigReset,
    ConfigModuleTracker,
    PreferencesReadFailed(String, String), // path, error
    PreferencesWriteFailed(String),        // path
    InvalidAfkThreshold(f64),
    InvalidLogFilePath(String), // path
    AfkThresholdClamped(f64, f64), // requested, applied
    PromptLogFilePath,
    PromptLogLine,
    PromptAfkThreshold,

    // === LOG FILE MESSAGES ===
    LogWriteFailed {
        path: String,
        error: String,
    },
    EventLogged(String), // event name
    PlaceholderUnresolved(String, String), // token, error

    // === PREVIEW MESSAGES ===
    PreviewHeader,
    PreviewProvidersHeader,
    PreviewLogFile(String), // path
    OldLogsUnchanged,

    // === TRACKER MESSAGES ===
    TrackerStateChanged(String), // event name
    TrackerResumed,

    // === WATCH MESSAGES ===
    WatchStarted {
        interval: u64,
        afk_threshold: f64,
    },
    WatchHelp,
    WatchUnknownCommand(String),
    WatchInputClosed,
    WatchShuttingDown,
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String), // error
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,
}
