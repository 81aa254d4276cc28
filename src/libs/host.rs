//! Interfaces consumed from the host editor.
//!
//! The tracker never polls the operating system itself. Everything it knows
//! about the editor comes through two seams:
//!
//! - [`Host`]: synchronous queries made while handling a callback (focus,
//!   session clock, product name, play state)
//! - [`LifecycleDispatcher`]: the host's callback registry; the tracker
//!   subscribes its handlers once during initialization
//!
//! [`ManualDispatcher`] is a small in-process dispatcher that stores the
//! registered handlers and fires them on demand. The `watch` command uses it
//! as its event loop backbone and tests use it to script host behaviour.

use serde::{Deserialize, Serialize};

/// Read-only view of the host editor's current state.
pub trait Host: Send + Sync {
    /// Whether the editor window currently has input focus.
    fn is_focused(&self) -> bool;

    /// Seconds elapsed since the editor session started.
    fn session_elapsed(&self) -> f64;

    /// Product or project name of the open project.
    fn product_name(&self) -> String;

    /// Whether a play-mode session is currently running.
    fn is_playing(&self) -> bool;
}

/// Play-mode transitions reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayModeChange {
    EnteredEditMode,
    ExitingEditMode,
    EnteredPlayMode,
    ExitingPlayMode,
}

/// Pause transitions of a running play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseState {
    Paused,
    Unpaused,
}

pub type Callback = Box<dyn FnMut() + Send>;
pub type PlayModeCallback = Box<dyn FnMut(PlayModeChange) + Send>;
pub type PauseCallback = Box<dyn FnMut(PauseState) + Send>;

/// The host's lifecycle callback registry.
pub trait LifecycleDispatcher {
    /// Periodic update, called once per editor frame or poll interval.
    fn on_tick(&mut self, handler: Callback);

    /// Editor is about to quit.
    fn on_quit(&mut self, handler: Callback);

    fn on_play_mode_change(&mut self, handler: PlayModeCallback);

    fn on_pause_change(&mut self, handler: PauseCallback);

    /// Raw user input such as a modifier key change.
    fn on_user_input(&mut self, handler: Callback);
}

/// Dispatcher that stores handlers and fires them when asked to.
#[derive(Default)]
pub struct ManualDispatcher {
    tick: Vec<Callback>,
    quit: Vec<Callback>,
    play_mode: Vec<PlayModeCallback>,
    pause: Vec<PauseCallback>,
    user_input: Vec<Callback>,
}

impl ManualDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.tick.iter_mut().for_each(|handler| handler());
    }

    pub fn quit(&mut self) {
        self.quit.iter_mut().for_each(|handler| handler());
    }

    pub fn play_mode_changed(&mut self, change: PlayModeChange) {
        self.play_mode.iter_mut().for_each(|handler| handler(change));
    }

    pub fn pause_changed(&mut self, state: PauseState) {
        self.pause.iter_mut().for_each(|handler| handler(state));
    }

    pub fn user_input(&mut self) {
        self.user_input.iter_mut().for_each(|handler| handler());
    }

    /// Total number of registered handlers across all hooks.
    pub fn handler_count(&self) -> usize {
        self.tick.len() + self.quit.len() + self.play_mode.len() + self.pause.len() + self.user_input.len()
    }
}

impl LifecycleDispatcher for ManualDispatcher {
    fn on_tick(&mut self, handler: Callback) {
        self.tick.push(handler);
    }

    fn on_quit(&mut self, handler: Callback) {
        self.quit.push(handler);
    }

    fn on_play_mode_change(&mut self, handler: PlayModeCallback) {
        self.play_mode.push(handler);
    }

    fn on_pause_change(&mut self, handler: PauseCallback) {
        self.pause.push(handler);
    }

    fn on_user_input(&mut self, handler: Callback) {
        self.user_input.push(handler);
    }
}
