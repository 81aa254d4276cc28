//! Appends rendered events to the activity log.
//!
//! Each call renders the current log line template, opens the configured
//! file in append mode, writes one line and closes the file again. Nothing is
//! kept open between calls, so the log can be moved, deleted or rotated by
//! other tools at any time.
//!
//! Failures never reach the caller. They are reported on the diagnostic
//! channel and the record is dropped: no retry, no buffering.

use super::config::Settings;
use super::event::TrackerEvent;
use super::formatter::render;
use super::messages::Message;
use super::providers::ValueProviders;
use crate::{msg_debug, msg_error};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Renders events and appends them to the configured log file.
///
/// Clones share the same write lock, so lines written through any clone
/// never interleave.
#[derive(Clone)]
pub struct EventLogger {
    settings: Settings,
    providers: Arc<ValueProviders>,
    write_lock: Arc<Mutex<()>>,
}

impl EventLogger {
    pub fn new(settings: Settings, providers: Arc<ValueProviders>) -> Self {
        EventLogger {
            settings,
            providers,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn providers(&self) -> &ValueProviders {
        &self.providers
    }

    /// Renders the current log line template for `event`.
    pub fn render(&self, event: TrackerEvent) -> String {
        render(&self.settings.log_line(), event, &self.providers)
    }

    /// Logs `event`, reporting but otherwise ignoring any I/O failure.
    pub fn log_event(&self, event: TrackerEvent) {
        let path = self.settings.log_file_path();
        if let Err(e) = self.append(&path, &self.render(event)) {
            msg_error!(Message::LogWriteFailed {
                path: path.display().to_string(),
                error: e.to_string(),
            });
        }
    }

    /// Logs `event` and hands any I/O failure back to the caller.
    pub fn try_log_event(&self, event: TrackerEvent) -> io::Result<()> {
        self.append(&self.settings.log_file_path(), &self.render(event))
    }

    fn append(&self, path: &Path, line: &str) -> io::Result<()> {
        let mut record = String::with_capacity(line.len() + LINE_ENDING.len());
        record.push_str(line);
        record.push_str(LINE_ENDING);

        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(record.as_bytes())?;
        msg_debug!(format!("{} -> {}", line, path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    fn logger(dir: &TempDir, template: &str) -> EventLogger {
        let settings = Settings::in_memory();
        settings.set_log_file_path(dir.path().join("activity.log")).unwrap();
        settings.set_log_line(template).unwrap();

        let mut providers = ValueProviders::new();
        providers.register("event", |event, _| Ok(event.name().to_string()));
        EventLogger::new(settings, Arc::new(providers))
    }

    fn lines(dir: &TempDir) -> Vec<String> {
        fs::read_to_string(dir.path().join("activity.log"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn appends_one_line_per_call_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir, "%event%");

        logger.log_event(TrackerEvent::EditorStart);
        logger.log_event(TrackerEvent::TrackerStarted);
        logger.log_event(TrackerEvent::EditorBlur);

        assert_eq!(lines(&dir), vec!["editor-start", "tracker-started", "editor-blur"]);
    }

    #[test]
    fn each_line_ends_with_platform_terminator() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir, "%event%");
        logger.log_event(TrackerEvent::UserAfk);

        let content = fs::read_to_string(dir.path().join("activity.log")).unwrap();
        assert_eq!(content, format!("user-afk{}", LINE_ENDING));
    }

    #[test]
    fn template_changes_apply_to_next_line() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir, "%event%");
        logger.log_event(TrackerEvent::EditorFocus);
        logger.settings().set_log_line("> %event%").unwrap();
        logger.log_event(TrackerEvent::EditorBlur);

        assert_eq!(lines(&dir), vec!["editor-focus", "> editor-blur"]);
    }

    #[test]
    fn write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir, "%event%");
        logger.log_event(TrackerEvent::EditorStart);

        // A directory can't be opened for appending.
        let blocked = dir.path().join("blocked");
        fs::create_dir(&blocked).unwrap();
        logger.settings().set_log_file_path(&blocked).unwrap();
        logger.log_event(TrackerEvent::EditorClose);
        assert!(logger.try_log_event(TrackerEvent::EditorClose).is_err());

        logger.settings().set_log_file_path(dir.path().join("activity.log")).unwrap();
        assert_eq!(lines(&dir), vec!["editor-start"]);
    }

    #[test]
    fn concurrent_writers_never_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger(&dir, "%event% %event% %event% %event%");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let logger = logger.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        logger.log_event(TrackerEvent::UserInteraction);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = lines(&dir);
        assert_eq!(lines.len(), 400);
        let expected = vec!["user-interaction"; 4].join(" ");
        assert!(lines.iter().all(|line| *line == expected));
    }
}
