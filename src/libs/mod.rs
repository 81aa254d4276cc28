//! Core library modules for the time tracker.
//!
//! ## Features
//!
//! - **Event Pipeline**: Host signals → state machine → events → log lines
//! - **Template Rendering**: `%name:format%` placeholders backed by value providers
//! - **Preferences**: Live key-value settings with defaults
//! - **Diagnostics**: Message catalogue and routing macros
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use time_tracker::libs::config::Settings;
//! use time_tracker::libs::event::TrackerEvent;
//! use time_tracker::libs::logger::EventLogger;
//! use time_tracker::libs::providers::ValueProviders;
//!
//! let mut providers = ValueProviders::new();
//! providers.register("event", |event, _| Ok(event.name().to_string()));
//! providers.register("project", |_, _| Ok("Demo".to_string()));
//!
//! let logger = EventLogger::new(Settings::in_memory(), Arc::new(providers));
//! assert!(logger.render(TrackerEvent::EditorFocus).ends_with("] editor-focus @ Demo"));
//! ```

pub mod config;
pub mod data_storage;
pub mod event;
pub mod formats;
pub mod formatter;
pub mod host;
pub mod logger;
pub mod messages;
pub mod monitor;
pub mod providers;
pub mod tracker;
pub mod view;
