//! The time tracker: lifecycle binding between host, monitor and logger.
//!
//! [`TimeTracker`] owns an [`ActivityMonitor`] and an [`EventLogger`] and
//! wires them to the host's lifecycle callbacks:
//!
//! | host hook              | tracker reaction                                  |
//! |------------------------|---------------------------------------------------|
//! | tick                   | sample host, log focus/AFK transitions            |
//! | user input             | refresh last interaction, no event                |
//! | play mode change       | `playmode-enter` / `playmode-exit`                |
//! | pause change           | `playmode-pause` / `playmode-unpause`             |
//! | quit                   | `editor-close`, `tracker-destroyed`               |
//!
//! Starting a tracker logs `editor-start` then `tracker-started`; tearing it
//! down logs `editor-close` then `tracker-destroyed`. Each boundary fires
//! exactly once, whether teardown comes from the quit hook, an explicit
//! [`TimeTracker::shutdown`], or the last handle being dropped.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use time_tracker::libs::config::Settings;
//! use time_tracker::libs::host::{Host, ManualDispatcher};
//! use time_tracker::libs::logger::EventLogger;
//! use time_tracker::libs::providers::ValueProviders;
//! use time_tracker::libs::tracker::TimeTracker;
//!
//! # fn run(host: Arc<dyn Host>) -> anyhow::Result<()> {
//! let providers = Arc::new(ValueProviders::with_builtins(host.clone()));
//! let logger = EventLogger::new(Settings::open()?, providers);
//!
//! let tracker = TimeTracker::start(host, logger);
//! let mut dispatcher = ManualDispatcher::new();
//! tracker.subscribe(&mut dispatcher);
//!
//! dispatcher.tick();
//! dispatcher.quit();
//! # Ok(())
//! # }
//! ```

use super::event::TrackerEvent;
use super::host::{Host, LifecycleDispatcher, PauseState, PlayModeChange};
use super::logger::EventLogger;
use super::messages::Message;
use super::monitor::{ActivityMonitor, ActivityState, Observation};
use crate::msg_debug;
use parking_lot::Mutex;
use std::sync::Arc;

struct TrackerCore {
    host: Arc<dyn Host>,
    logger: EventLogger,
    monitor: ActivityMonitor,
    finished: bool,
}

impl TrackerCore {
    fn emit(&self, event: TrackerEvent) {
        msg_debug!(Message::TrackerStateChanged(event.to_string()));
        self.logger.log_event(event);
    }

    fn tick(&mut self) {
        if self.finished {
            return;
        }
        let observation = Observation::from_host(self.host.as_ref());
        let threshold = self.logger.settings().afk_threshold();
        for event in self.monitor.tick(observation, threshold) {
            self.emit(event);
        }
    }

    fn teardown(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.emit(TrackerEvent::EditorClose);
        self.emit(TrackerEvent::TrackerDestroyed);
    }
}

impl Drop for TrackerCore {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Shared handle to a running tracker.
///
/// Cloning yields another handle to the same tracker; subscribed host
/// handlers hold such clones.
#[derive(Clone)]
pub struct TimeTracker {
    core: Arc<Mutex<TrackerCore>>,
}

impl TimeTracker {
    /// Starts a new tracking session, logging `editor-start` and `tracker-started`.
    pub fn start(host: Arc<dyn Host>, logger: EventLogger) -> Self {
        let monitor = ActivityMonitor::new(host.is_focused());
        let tracker = Self::with_monitor(host, logger, monitor);
        {
            let core = tracker.core.lock();
            core.emit(TrackerEvent::EditorStart);
            core.emit(TrackerEvent::TrackerStarted);
        }
        tracker
    }

    /// Continues a session from previously saved state without logging start events.
    ///
    /// Hosts that reload their code while the editor keeps running use this
    /// with the state taken from [`TimeTracker::snapshot`].
    pub fn resume(host: Arc<dyn Host>, logger: EventLogger, state: ActivityState) -> Self {
        msg_debug!(Message::TrackerResumed);
        Self::with_monitor(host, logger, ActivityMonitor::from_state(state))
    }

    fn with_monitor(host: Arc<dyn Host>, logger: EventLogger, monitor: ActivityMonitor) -> Self {
        TimeTracker {
            core: Arc::new(Mutex::new(TrackerCore {
                host,
                logger,
                monitor,
                finished: false,
            })),
        }
    }

    /// Registers the tracker's handlers with the host dispatcher.
    ///
    /// Call once during initialization.
    pub fn subscribe(&self, dispatcher: &mut dyn LifecycleDispatcher) {
        let tracker = self.clone();
        dispatcher.on_tick(Box::new(move || tracker.tick()));

        let tracker = self.clone();
        dispatcher.on_quit(Box::new(move || tracker.shutdown()));

        let tracker = self.clone();
        dispatcher.on_play_mode_change(Box::new(move |change| tracker.play_mode_changed(change)));

        let tracker = self.clone();
        dispatcher.on_pause_change(Box::new(move |state| tracker.pause_changed(state)));

        let tracker = self.clone();
        dispatcher.on_user_input(Box::new(move || tracker.user_input()));
    }

    pub fn tick(&self) {
        self.core.lock().tick();
    }

    pub fn user_input(&self) {
        let mut core = self.core.lock();
        let now = core.host.session_elapsed();
        core.monitor.user_input(now);
    }

    pub fn play_mode_changed(&self, change: PlayModeChange) {
        let core = self.core.lock();
        if core.finished {
            return;
        }
        if let Some(event) = ActivityMonitor::play_mode_changed(change) {
            core.emit(event);
        }
    }

    pub fn pause_changed(&self, state: PauseState) {
        let core = self.core.lock();
        if !core.finished {
            core.emit(ActivityMonitor::pause_changed(state));
        }
    }

    /// Logs `editor-close` and `tracker-destroyed`; later calls do nothing.
    pub fn shutdown(&self) {
        self.core.lock().teardown();
    }

    /// Stops tracking ahead of a host code reload.
    ///
    /// Returns the state to [`resume`](TimeTracker::resume) from and
    /// suppresses the teardown events, since the editor session goes on.
    pub fn suspend(&self) -> ActivityState {
        let mut core = self.core.lock();
        core.finished = true;
        core.monitor.state()
    }

    pub fn is_finished(&self) -> bool {
        self.core.lock().finished
    }

    /// Current activity state, suitable for persisting and [`TimeTracker::resume`].
    pub fn snapshot(&self) -> ActivityState {
        self.core.lock().monitor.state()
    }

    pub fn logger(&self) -> EventLogger {
        self.core.lock().logger.clone()
    }
}
