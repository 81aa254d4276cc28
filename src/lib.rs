//! # Time Tracker - editor activity logging
//!
//! Records what happens in an editor session to a plain, append-only log
//! file, one line per event.
//!
//! ## Features
//!
//! - **Activity Detection**: Focus changes, AFK detection and play-mode transitions
//! - **Customizable Log Lines**: Templates such as `[%date:s%] %event% @ %project%`
//! - **Extensible Placeholders**: Register additional value providers
//! - **Live Preferences**: Settings are re-read on every event
//! - **Host Agnostic**: The editor is reached only through the `Host` and
//!   `LifecycleDispatcher` traits
//!
//! ## Usage
//!
//! ```rust,no_run
//! use time_tracker::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
