#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use time_tracker::libs::config::Settings;
    use time_tracker::libs::host::{Host, ManualDispatcher, PauseState, PlayModeChange};
    use time_tracker::libs::logger::EventLogger;
    use time_tracker::libs::providers::ValueProviders;
    use time_tracker::libs::tracker::TimeTracker;

    struct HostState {
        focused: bool,
        playing: bool,
        now: f64,
    }

    /// Host whose signals are set directly by the test.
    struct ScriptedHost {
        state: Mutex<HostState>,
    }

    impl ScriptedHost {
        fn new() -> Self {
            ScriptedHost {
                state: Mutex::new(HostState {
                    focused: true,
                    playing: false,
                    now: 0.0,
                }),
            }
        }

        fn at(&self, now: f64) {
            self.state.lock().now = now;
        }

        fn focus(&self, focused: bool) {
            self.state.lock().focused = focused;
        }

        fn play(&self, playing: bool) {
            self.state.lock().playing = playing;
        }
    }

    impl Host for ScriptedHost {
        fn is_focused(&self) -> bool {
            self.state.lock().focused
        }

        fn session_elapsed(&self) -> f64 {
            self.state.lock().now
        }

        fn product_name(&self) -> String {
            "Demo".to_string()
        }

        fn is_playing(&self) -> bool {
            self.state.lock().playing
        }
    }

    /// Each test gets its own log file and a tracker wired to a manual dispatcher.
    struct TrackerTestContext {
        _temp_dir: TempDir,
        log_path: PathBuf,
        host: Arc<ScriptedHost>,
        logger: EventLogger,
    }

    impl TestContext for TrackerTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let log_path = temp_dir.path().join("time-tracker.log");

            let settings = Settings::in_memory();
            settings.set_log_file_path(&log_path).unwrap();
            settings.set_log_line("%timeSinceStartup% %event% @ %project%").unwrap();
            settings.set_afk_threshold(60.0).unwrap();

            let host = Arc::new(ScriptedHost::new());
            let providers = ValueProviders::with_builtins(host.clone());
            let logger = EventLogger::new(settings, Arc::new(providers));

            TrackerTestContext {
                _temp_dir: temp_dir,
                log_path,
                host,
                logger,
            }
        }
    }

    impl TrackerTestContext {
        fn start(&self) -> (TimeTracker, ManualDispatcher) {
            let tracker = TimeTracker::start(self.host.clone(), self.logger.clone());
            let mut dispatcher = ManualDispatcher::new();
            tracker.subscribe(&mut dispatcher);
            (tracker, dispatcher)
        }

        fn lines(&self) -> Vec<String> {
            fs::read_to_string(&self.log_path)
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_start_and_quit_boundaries(ctx: &mut TrackerTestContext) {
        let (_tracker, mut dispatcher) = ctx.start();
        ctx.host.at(5.0);
        dispatcher.quit();
        dispatcher.quit();

        assert_eq!(
            ctx.lines(),
            vec![
                "0 editor-start @ Demo",
                "0 tracker-started @ Demo",
                "5 editor-close @ Demo",
                "5 tracker-destroyed @ Demo",
            ]
        );
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_subscribe_registers_every_hook(ctx: &mut TrackerTestContext) {
        let (_tracker, dispatcher) = ctx.start();
        assert_eq!(dispatcher.handler_count(), 5);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_dropping_last_handle_tears_down(ctx: &mut TrackerTestContext) {
        let (tracker, dispatcher) = ctx.start();
        drop(dispatcher);
        drop(tracker);

        let lines = ctx.lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "0 editor-close @ Demo");
        assert_eq!(lines[3], "0 tracker-destroyed @ Demo");
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_afk_detection_over_ticks(ctx: &mut TrackerTestContext) {
        let (_tracker, mut dispatcher) = ctx.start();

        for now in [10.0, 30.0, 59.0] {
            ctx.host.at(now);
            dispatcher.tick();
        }
        assert_eq!(ctx.lines().len(), 2, "no events before the threshold");

        for now in [61.0, 62.0, 120.0] {
            ctx.host.at(now);
            dispatcher.tick();
        }

        ctx.host.at(130.0);
        dispatcher.user_input();
        assert_eq!(ctx.lines().len(), 3, "input alone logs nothing");

        ctx.host.at(130.5);
        dispatcher.tick();

        assert_eq!(
            ctx.lines()[2..],
            ["61 user-afk @ Demo".to_string(), "130.5 user-interaction @ Demo".to_string()]
        );
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_focus_changes(ctx: &mut TrackerTestContext) {
        let (_tracker, mut dispatcher) = ctx.start();

        ctx.host.at(1.0);
        ctx.host.focus(false);
        dispatcher.tick();
        dispatcher.tick();

        ctx.host.at(2.0);
        ctx.host.focus(true);
        dispatcher.tick();
        dispatcher.tick();

        assert_eq!(ctx.lines()[2..], ["1 editor-blur @ Demo".to_string(), "2 editor-focus @ Demo".to_string()]);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_play_session(ctx: &mut TrackerTestContext) {
        let (_tracker, mut dispatcher) = ctx.start();

        ctx.host.at(10.0);
        dispatcher.play_mode_changed(PlayModeChange::ExitingEditMode);
        ctx.host.play(true);
        dispatcher.play_mode_changed(PlayModeChange::EnteredPlayMode);

        for now in (11..400).map(f64::from) {
            ctx.host.at(now);
            dispatcher.tick();
        }

        dispatcher.pause_changed(PauseState::Paused);
        dispatcher.pause_changed(PauseState::Unpaused);
        dispatcher.play_mode_changed(PlayModeChange::ExitingPlayMode);
        ctx.host.play(false);
        dispatcher.play_mode_changed(PlayModeChange::EnteredEditMode);

        assert_eq!(
            ctx.lines()[2..],
            [
                "10 playmode-enter @ Demo".to_string(),
                "399 playmode-pause @ Demo".to_string(),
                "399 playmode-unpause @ Demo".to_string(),
                "399 playmode-exit @ Demo".to_string(),
            ]
        );
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_threshold_is_read_live(ctx: &mut TrackerTestContext) {
        let (_tracker, mut dispatcher) = ctx.start();

        ctx.host.at(45.0);
        dispatcher.tick();
        assert_eq!(ctx.lines().len(), 2);

        ctx.logger.settings().set_afk_threshold(30.0).unwrap();
        dispatcher.tick();
        assert_eq!(ctx.lines().last().unwrap(), "45 user-afk @ Demo");
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_suspend_and_resume(ctx: &mut TrackerTestContext) {
        let (tracker, dispatcher) = ctx.start();
        ctx.host.at(90.0);
        tracker.tick();

        let state = tracker.suspend();
        assert!(state.is_afk);
        drop(dispatcher);
        drop(tracker);

        let resumed = TimeTracker::resume(ctx.host.clone(), ctx.logger.clone(), state);
        ctx.host.at(95.0);
        resumed.tick();
        resumed.shutdown();

        assert_eq!(
            ctx.lines(),
            vec![
                "0 editor-start @ Demo",
                "0 tracker-started @ Demo",
                "90 user-afk @ Demo",
                "95 editor-close @ Demo",
                "95 tracker-destroyed @ Demo",
            ]
        );
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_finished_tracker_ignores_callbacks(ctx: &mut TrackerTestContext) {
        let (tracker, mut dispatcher) = ctx.start();
        dispatcher.quit();
        assert!(tracker.is_finished());

        ctx.host.at(500.0);
        ctx.host.focus(false);
        dispatcher.tick();
        dispatcher.pause_changed(PauseState::Paused);
        dispatcher.play_mode_changed(PlayModeChange::EnteredPlayMode);

        assert_eq!(ctx.lines().len(), 4);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_unwritable_log_does_not_disturb_tracking(ctx: &mut TrackerTestContext) {
        ctx.logger
            .settings()
            .set_log_file_path(ctx.log_path.join("missing-dir").join("log"))
            .unwrap();

        let (tracker, mut dispatcher) = ctx.start();
        ctx.host.at(100.0);
        dispatcher.tick();

        assert!(tracker.snapshot().is_afk);
        assert!(ctx.lines().is_empty());
    }
}
