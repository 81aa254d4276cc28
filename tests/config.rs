#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use time_tracker::libs::config::{
        Config, FilePreferences, Preferences, Settings, AFK_THRESHOLD_KEY, DEFAULT_AFK_THRESHOLD, DEFAULT_LOG_LINE,
        LOG_LINE_KEY,
    };

    /// Test context providing a preferences file in a temporary directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        prefs_path: PathBuf,
        log_path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let prefs_path = temp_dir.path().join("preferences.json");
            let log_path = temp_dir.path().join("logs").join("editor.log");
            ConfigTestContext {
                _temp_dir: temp_dir,
                prefs_path,
                log_path,
            }
        }
    }

    impl ConfigTestContext {
        fn settings(&self) -> Settings {
            Settings::new(Arc::new(FilePreferences::new(&self.prefs_path)))
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_reads_defaults(ctx: &mut ConfigTestContext) {
        let config = ctx.settings().current();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_line, DEFAULT_LOG_LINE);
        assert_eq!(config.afk_threshold, DEFAULT_AFK_THRESHOLD);
        assert!(!ctx.prefs_path.exists());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            log_file_path: ctx.log_path.clone(),
            log_line: "%date:yyyy-MM-dd% %event%".to_string(),
            afk_threshold: 300.0,
        };
        ctx.settings().apply(&config).unwrap();

        let read_back = ctx.settings().current();
        assert_eq!(read_back, config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_file_layout(ctx: &mut ConfigTestContext) {
        let settings = ctx.settings();
        settings.set_log_line("%event%").unwrap();
        settings.set_afk_threshold(90.0).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&ctx.prefs_path).unwrap()).unwrap();
        assert_eq!(raw[LOG_LINE_KEY], "%event%");
        assert_eq!(raw[AFK_THRESHOLD_KEY], 90.0);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_external_edits_are_picked_up(ctx: &mut ConfigTestContext) {
        let settings = ctx.settings();
        settings.set_log_line("%event%").unwrap();

        fs::write(&ctx.prefs_path, r#"{ "TimeTracker_LogLine": "edited %event%" }"#).unwrap();
        assert_eq!(settings.log_line(), "edited %event%");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_corrupted_file_falls_back_to_defaults(ctx: &mut ConfigTestContext) {
        fs::write(&ctx.prefs_path, "{ not json").unwrap();
        let settings = ctx.settings();
        assert_eq!(settings.log_line(), DEFAULT_LOG_LINE);

        settings.set_afk_threshold(45.0).unwrap();
        assert_eq!(settings.afk_threshold(), 45.0);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_reset_removes_stored_values(ctx: &mut ConfigTestContext) {
        let settings = ctx.settings();
        settings.set_log_file_path(&ctx.log_path).unwrap();
        settings.set_log_line("%event%").unwrap();
        settings.reset().unwrap();

        let prefs = FilePreferences::new(&ctx.prefs_path);
        assert_eq!(prefs.get_string(LOG_LINE_KEY), None);
        assert_eq!(settings.current(), Config::default());
    }
}
