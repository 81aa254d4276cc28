//! Named value providers for log line placeholders.
//!
//! A placeholder `%name:format%` is resolved by looking `name` up in a
//! [`ValueProviders`] registry and calling the provider with the event being
//! logged and the (possibly empty) format string.
//!
//! ## Built-in Providers
//!
//! | name               | value                                             |
//! |--------------------|---------------------------------------------------|
//! | `project`          | host product name                                 |
//! | `date`             | local wall clock, date format                     |
//! | `timeSinceStartup` | host session seconds, numeric format              |
//! | `event`            | event name                                        |
//! | `PID`              | current process id, integer format                |
//!
//! The registry is built once at startup, then shared read-only behind an
//! `Arc`. Extra providers are added with [`ValueProviders::register`] before
//! sharing.
//!
//! ## Examples
//!
//! ```rust
//! use time_tracker::libs::event::TrackerEvent;
//! use time_tracker::libs::providers::ValueProviders;
//!
//! let mut providers = ValueProviders::new();
//! providers.register("branch", |_, _| Ok("main".to_string()));
//!
//! let value = providers.resolve("branch", TrackerEvent::EditorFocus, "");
//! assert_eq!(value.unwrap().unwrap(), "main");
//! ```

use super::event::TrackerEvent;
use super::formats::{format_date, format_float, format_integer};
use super::host::Host;
use anyhow::{anyhow, Result};
use chrono::Local;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Signature shared by every value provider.
pub type ProviderFn = dyn Fn(TrackerEvent, &str) -> Result<String> + Send + Sync;

/// Registry mapping placeholder names to value providers.
#[derive(Default)]
pub struct ValueProviders {
    providers: BTreeMap<String, Box<ProviderFn>>,
}

impl ValueProviders {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the five built-in providers.
    pub fn with_builtins(host: Arc<dyn Host>) -> Self {
        let mut providers = Self::new();

        let project_host = host.clone();
        providers.register("project", move |_, _| Ok(project_host.product_name()));
        providers.register("date", |_, format| Ok(format_date(&Local::now(), format)?));
        providers.register("timeSinceStartup", move |_, format| {
            Ok(format_float(host.session_elapsed(), format)?)
        });
        providers.register("event", |event, _| Ok(event.name().to_string()));
        providers.register("PID", |_, format| Ok(format_integer(i64::from(std::process::id()), format)?));

        providers
    }

    /// Registers a provider under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, provider: F) -> &mut Self
    where
        F: Fn(TrackerEvent, &str) -> Result<String> + Send + Sync + 'static,
    {
        self.providers.insert(name.into(), Box::new(provider));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Invokes the provider registered under `name`.
    ///
    /// Returns `None` for unknown names. A provider that panics is reported
    /// as an error, so a faulty extension can never take the host down.
    pub fn resolve(&self, name: &str, event: TrackerEvent, format: &str) -> Option<Result<String>> {
        let provider = self.providers.get(name)?;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| provider(event, format)));
        Some(outcome.unwrap_or_else(|_| Err(anyhow!("value provider '{}' panicked", name))))
    }
}

impl fmt::Debug for ValueProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.providers.keys()).finish()
    }
}
