//! Preference-backed configuration for the tracker.
//!
//! Settings live in a host-provided key-value store (the editor's preference
//! mechanism) and are read live on every access: changing a preference takes
//! effect on the very next tick or log line, without any reload step.
//!
//! ## Keys and Defaults
//!
//! | key                        | type   | default                              |
//! |----------------------------|--------|--------------------------------------|
//! | `TimeTracker_LogFilePath`  | string | `time-tracker.log` in the working dir |
//! | `TimeTracker_LogLine`      | string | `[%date:s%] %event% @ %project%`     |
//! | `TimeTracker_AFKThreshold` | float  | `60`                                 |
//!
//! ## Stores
//!
//! - [`MemoryPreferences`]: in-process store, used by embedding hosts and tests
//! - [`FilePreferences`]: JSON file in the platform data directory, used by the CLI
//!
//! ## Usage Examples
//!
//! ```rust
//! use time_tracker::libs::config::Settings;
//!
//! let settings = Settings::in_memory();
//! assert_eq!(settings.log_line(), "[%date:s%] %event% @ %project%");
//!
//! settings.set_afk_threshold(300.0)?;
//! assert_eq!(settings.afk_threshold(), 300.0);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::messages::Message;
use crate::{msg_bail_anyhow, msg_debug, msg_warning};
use anyhow::{Context, Result};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::ops::RangeInclusive;
use std::path::{self, Path, PathBuf};
use std::process;
use std::sync::Arc;

pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

pub const LOG_FILE_PATH_KEY: &str = "TimeTracker_LogFilePath";
pub const LOG_LINE_KEY: &str = "TimeTracker_LogLine";
pub const AFK_THRESHOLD_KEY: &str = "TimeTracker_AFKThreshold";

pub const DEFAULT_LOG_FILE_NAME: &str = "time-tracker.log";
pub const DEFAULT_LOG_LINE: &str = "[%date:s%] %event% @ %project%";
pub const DEFAULT_AFK_THRESHOLD: f64 = 60.0;

/// Range offered by the interactive settings. The tracker itself accepts any
/// positive threshold.
pub const AFK_THRESHOLD_RANGE: RangeInclusive<f64> = 30.0..=1800.0;

/// A persisted key-value preference store.
///
/// Getters return `None` when the key is missing or holds a value of the
/// wrong type; callers apply their own defaults.
pub trait Preferences: Send + Sync {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&self, key: &str, value: &str) -> Result<()>;
    fn get_float(&self, key: &str) -> Option<f64>;
    fn set_float(&self, key: &str, value: f64) -> Result<()>;
    fn delete_key(&self, key: &str) -> Result<()>;
}

/// Preference store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.read().get(key)?.as_str().map(str::to_string)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), Value::from(value));
        Ok(())
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        self.values.read().get(key)?.as_f64()
    }

    fn set_float(&self, key: &str, value: f64) -> Result<()> {
        self.values.write().insert(key.to_string(), Value::from(value));
        Ok(())
    }

    fn delete_key(&self, key: &str) -> Result<()> {
        self.values.write().remove(key);
        Ok(())
    }
}

/// Preference store backed by a pretty-printed JSON object on disk.
///
/// The file is re-read on every lookup so edits made by another process
/// (or by hand) are picked up immediately. A missing file reads as empty;
/// a corrupted one is treated as empty and reported once per distinct error.
/// Writes replace the file atomically.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    last_read_error: Mutex<Option<String>>,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_read_error: Mutex::new(None),
        }
    }

    /// Opens the store in the platform data directory.
    ///
    /// - **Windows**: `%LOCALAPPDATA%\time-tracker\preferences.json`
    /// - **macOS**: `~/Library/Application Support/time-tracker/preferences.json`
    /// - **Linux**: `~/.local/share/time-tracker/preferences.json`
    pub fn open_default() -> Result<Self> {
        let path = DataStorage::new().get_path(PREFERENCES_FILE_NAME)?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn read_all(&self) -> BTreeMap<String, Value> {
        match self.load() {
            Ok(values) => {
                *self.last_read_error.lock() = None;
                values
            }
            Err(e) => {
                let error = e.to_string();
                let message = Message::PreferencesReadFailed(self.path.display().to_string(), error.clone());
                if self.is_new_read_error(error) {
                    msg_warning!(message);
                } else {
                    msg_debug!(message);
                }
                BTreeMap::new()
            }
        }
    }

    /// Records `error` as the latest read failure; true if it differs from the previous one.
    fn is_new_read_error(&self, error: String) -> bool {
        let mut last = self.last_read_error.lock();
        if last.as_deref() == Some(error.as_str()) {
            return false;
        }
        *last = Some(error);
        true
    }

    /// Sibling file the new contents are written to before replacing the store.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| PREFERENCES_FILE_NAME.into());
        name.push(format!(".{}.tmp", process::id()));
        self.path.with_file_name(name)
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, Value>)) -> Result<()> {
        let mut values = self.read_all();
        apply(&mut values);

        let staging = self.staging_path();
        let written = File::create(&staging).map_err(anyhow::Error::from).and_then(|file| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &values)?;
            writer.flush()?;
            Ok(())
        });
        let replaced = written.and_then(|()| fs::rename(&staging, &self.path).map_err(anyhow::Error::from));
        if replaced.is_err() {
            let _ = fs::remove_file(&staging);
        }
        replaced.with_context(|| Message::PreferencesWriteFailed(self.path.display().to_string()))
    }
}

impl Preferences for FilePreferences {
    fn get_string(&self, key: &str) -> Option<String> {
        self.read_all().get(key)?.as_str().map(str::to_string)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), Value::from(value));
        })
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        self.read_all().get(key)?.as_f64()
    }

    fn set_float(&self, key: &str, value: f64) -> Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), Value::from(value));
        })
    }

    fn delete_key(&self, key: &str) -> Result<()> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

/// Snapshot of the effective configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Absolute path of the activity log.
    pub log_file_path: PathBuf,
    /// Template rendered for every logged event.
    pub log_line: String,
    /// Seconds without interaction before the user is considered away.
    pub afk_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_file_path: Settings::default_log_file_path(),
            log_line: DEFAULT_LOG_LINE.to_string(),
            afk_threshold: DEFAULT_AFK_THRESHOLD,
        }
    }
}

/// Typed, defaulted access to the tracker's preferences.
///
/// Cloning is cheap and every clone reads the same underlying store.
#[derive(Clone)]
pub struct Settings {
    store: Arc<dyn Preferences>,
}

impl Settings {
    pub fn new(store: Arc<dyn Preferences>) -> Self {
        Self { store }
    }

    /// Settings backed by a fresh [`MemoryPreferences`] store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPreferences::new()))
    }

    /// Settings backed by the JSON file in the platform data directory.
    pub fn open() -> Result<Self> {
        Ok(Self::new(Arc::new(FilePreferences::open_default()?)))
    }

    /// `time-tracker.log` resolved against the current working directory.
    pub fn default_log_file_path() -> PathBuf {
        absolute(Path::new(DEFAULT_LOG_FILE_NAME))
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.store
            .get_string(LOG_FILE_PATH_KEY)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_log_file_path)
    }

    /// Stores the absolute form of `path`; paths that aren't valid UTF-8 are rejected.
    pub fn set_log_file_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = absolute(path.as_ref());
        let Some(path) = path.to_str() else {
            msg_bail_anyhow!(Message::InvalidLogFilePath(path.display().to_string()));
        };
        self.store.set_string(LOG_FILE_PATH_KEY, path)
    }

    pub fn log_line(&self) -> String {
        self.store
            .get_string(LOG_LINE_KEY)
            .unwrap_or_else(|| DEFAULT_LOG_LINE.to_string())
    }

    pub fn set_log_line(&self, template: &str) -> Result<()> {
        self.store.set_string(LOG_LINE_KEY, template)
    }

    pub fn afk_threshold(&self) -> f64 {
        self.store
            .get_float(AFK_THRESHOLD_KEY)
            .filter(|threshold| threshold.is_finite() && *threshold > 0.0)
            .unwrap_or(DEFAULT_AFK_THRESHOLD)
    }

    /// Stores a new AFK threshold; rejects values that aren't positive and finite.
    pub fn set_afk_threshold(&self, seconds: f64) -> Result<()> {
        if !seconds.is_finite() || seconds <= 0.0 {
            msg_bail_anyhow!(Message::InvalidAfkThreshold(seconds));
        }
        self.store.set_float(AFK_THRESHOLD_KEY, seconds)
    }

    /// Removes every stored value so that defaults apply again.
    pub fn reset(&self) -> Result<()> {
        for key in [LOG_FILE_PATH_KEY, LOG_LINE_KEY, AFK_THRESHOLD_KEY] {
            self.store.delete_key(key)?;
        }
        Ok(())
    }

    /// Reads every setting once.
    pub fn current(&self) -> Config {
        Config {
            log_file_path: self.log_file_path(),
            log_line: self.log_line(),
            afk_threshold: self.afk_threshold(),
        }
    }

    /// Writes every field of `config` back to the store.
    pub fn apply(&self, config: &Config) -> Result<()> {
        self.set_log_file_path(&config.log_file_path)?;
        self.set_log_line(&config.log_line)?;
        self.set_afk_threshold(config.afk_threshold)
    }
}

fn absolute(path: &Path) -> PathBuf {
    path::absolute(path).unwrap_or_else(|_| match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    })
}
