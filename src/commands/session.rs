//! A host backed by the terminal session running the CLI.
//!
//! The command-line tool has no editor to ask, so it stands in for one:
//! the session clock starts with the process, focus and play state are
//! toggled by `watch` commands, and the product name defaults to the name of
//! the working directory.

use crate::libs::config::Settings;
use crate::libs::host::Host;
use crate::libs::logger::EventLogger;
use crate::libs::providers::ValueProviders;
use anyhow::Result;
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

pub struct TerminalHost {
    started: Instant,
    product_name: String,
    focused: AtomicBool,
    playing: AtomicBool,
}

impl TerminalHost {
    pub fn new(product_name: Option<String>) -> Self {
        let product_name = product_name.unwrap_or_else(|| {
            env::current_dir()
                .ok()
                .and_then(|dir| dir.file_name().map(|name| name.to_string_lossy().into_owned()))
                .unwrap_or_default()
        });

        TerminalHost {
            started: Instant::now(),
            product_name,
            focused: AtomicBool::new(true),
            playing: AtomicBool::new(false),
        }
    }

    pub fn set_focused(&self, focused: bool) {
        self.focused.store(focused, Ordering::SeqCst);
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::SeqCst);
    }
}

impl Host for TerminalHost {
    fn is_focused(&self) -> bool {
        self.focused.load(Ordering::SeqCst)
    }

    fn session_elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn product_name(&self) -> String {
        self.product_name.clone()
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}

/// Builds a logger over the stored preferences with the built-in providers.
pub fn logger(host: Arc<TerminalHost>) -> Result<EventLogger> {
    let providers = ValueProviders::with_builtins(host);
    Ok(EventLogger::new(Settings::open()?, Arc::new(providers)))
}
