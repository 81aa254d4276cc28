//! Log line template rendering.
//!
//! A log line template is free text with embedded placeholders:
//!
//! ```text
//! [%date:s%] %event% @ %project%
//! ```
//!
//! Each placeholder is either `%name%` or `%name:format%`. Matching is
//! non-greedy, so the first `%` after the opening one always closes the
//! placeholder and the format may contain any character except `%`.
//!
//! ## Resolution Rules
//!
//! - **Known name**: replaced by the provider's output for the event and format
//! - **Unknown name**: the placeholder text is kept verbatim
//! - **Provider failure**: the placeholder text is kept verbatim
//!
//! There is no escape sequence for a literal `%`. A stray `%` simply pairs
//! with the next one, and if that pair names no provider the text survives
//! unchanged.
//!
//! ## Examples
//!
//! ```rust
//! use time_tracker::libs::event::TrackerEvent;
//! use time_tracker::libs::formatter::render;
//! use time_tracker::libs::providers::ValueProviders;
//!
//! let mut providers = ValueProviders::new();
//! providers.register("event", |event, _| Ok(event.name().to_string()));
//!
//! let line = render("%event% (%unknown:x%)", TrackerEvent::UserAfk, &providers);
//! assert_eq!(line, "user-afk (%unknown:x%)");
//! ```

use super::event::TrackerEvent;
use super::messages::Message;
use super::providers::ValueProviders;
use crate::msg_debug;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"%(?<name>.+?)(:(?<format>.+?))?%").expect("placeholder pattern is a valid regex")
    })
}

/// Renders `template` for `event`, substituting every resolvable placeholder.
///
/// Never fails: anything that can't be resolved is left as written.
pub fn render(template: &str, event: TrackerEvent, providers: &ValueProviders) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures| {
            let token = &caps[0];
            let name = &caps["name"];
            let format = caps.name("format").map_or("", |m| m.as_str());

            match providers.resolve(name, event, format) {
                Some(Ok(value)) => value,
                Some(Err(e)) => {
                    msg_debug!(Message::PlaceholderUnresolved(token.to_string(), e.to_string()));
                    token.to_string()
                }
                None => token.to_string(),
            }
        })
        .into_owned()
}
