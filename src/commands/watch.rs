//! Runs the tracker against the terminal session.
//!
//! The terminal plays the role of the editor: a tokio interval drives the
//! tick hook, every line read from stdin counts as user input, and a few
//! keywords drive the remaining hooks. Ctrl+C, SIGTERM, `quit` or closing
//! stdin all trigger the quit hook, which writes the teardown events.
//!
//! Stdin is read on a plain thread that is never joined, so a pending read
//! can't hold the process open after shutdown.

use super::session::{self, TerminalHost};
use crate::libs::host::{ManualDispatcher, PauseState, PlayModeChange};
use crate::libs::messages::Message;
use crate::libs::tracker::TimeTracker;
use crate::{msg_debug, msg_error, msg_info, msg_print};
use anyhow::Result;
use clap::Args;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Duration};

type InputLines = mpsc::UnboundedReceiver<io::Result<String>>;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Tick interval in milliseconds
    #[arg(short, long, default_value_t = 500)]
    interval: u64,
    /// Project name to render for %project%
    #[arg(short, long)]
    project: Option<String>,
}

/// What the watch loop should do after a line of input.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn cmd(watch_args: WatchArgs) -> Result<()> {
    let host = Arc::new(TerminalHost::new(watch_args.project));
    let logger = session::logger(host.clone())?;
    let afk_threshold = logger.settings().afk_threshold();

    let tracker = TimeTracker::start(host.clone(), logger);
    let mut dispatcher = ManualDispatcher::new();
    tracker.subscribe(&mut dispatcher);

    msg_info!(Message::WatchStarted {
        interval: watch_args.interval,
        afk_threshold,
    });
    msg_print!(Message::WatchHelp);

    let shutdown_rx = spawn_signal_handler();
    let lines = spawn_stdin_reader();
    let interval = Duration::from_millis(watch_args.interval.max(1));

    let outcome = run(&host, &mut dispatcher, lines, shutdown_rx, interval).await;

    msg_info!(Message::WatchShuttingDown);
    dispatcher.quit();
    outcome
}

/// Drives the dispatcher until `quit`, end of input, or a shutdown signal.
async fn run(
    host: &TerminalHost,
    dispatcher: &mut ManualDispatcher,
    mut lines: InputLines,
    mut shutdown_rx: oneshot::Receiver<()>,
    interval: Duration,
) -> Result<()> {
    let mut signals_active = true;
    let mut ticker = time::interval(interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => dispatcher.tick(),
            line = lines.recv() => match line {
                Some(line) => {
                    if handle_line(host, dispatcher, &line?) == Flow::Quit {
                        return Ok(());
                    }
                }
                None => {
                    msg_info!(Message::WatchInputClosed);
                    return Ok(());
                }
            },
            received = &mut shutdown_rx, if signals_active => {
                if received.is_ok() {
                    return Ok(());
                }
                // Signal handling is unavailable; keep running until quit or EOF.
                signals_active = false;
            }
        }
    }
}

/// Forwards stdin lines from a detached thread; the channel closes at EOF or on a read error.
fn spawn_stdin_reader() -> InputLines {
    let (lines_tx, lines_rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let failed = line.is_err();
            if lines_tx.send(line).is_err() || failed {
                break;
            }
        }
    });

    lines_rx
}

/// Applies one line of terminal input to the host and dispatcher.
fn handle_line(host: &TerminalHost, dispatcher: &mut ManualDispatcher, line: &str) -> Flow {
    dispatcher.user_input();

    match line.trim() {
        "play" => {
            dispatcher.play_mode_changed(PlayModeChange::ExitingEditMode);
            host.set_playing(true);
            dispatcher.play_mode_changed(PlayModeChange::EnteredPlayMode);
        }
        "stop" => {
            dispatcher.play_mode_changed(PlayModeChange::ExitingPlayMode);
            host.set_playing(false);
            dispatcher.play_mode_changed(PlayModeChange::EnteredEditMode);
        }
        "pause" => dispatcher.pause_changed(PauseState::Paused),
        "resume" => dispatcher.pause_changed(PauseState::Unpaused),
        "focus" => host.set_focused(true),
        "blur" => host.set_focused(false),
        "quit" => return Flow::Quit,
        "" => {}
        other => msg_debug!(Message::WatchUnknownCommand(other.to_string())),
    }

    Flow::Continue
}

fn spawn_signal_handler() -> oneshot::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let (mut sigterm, mut sigint) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
                (Err(_), _) => {
                    msg_error!(Message::FailedToCreateSigtermHandler);
                    return;
                }
                (_, Err(_)) => {
                    msg_error!(Message::FailedToCreateSigintHandler);
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::WatcherReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::WatcherReceivedSigint);
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::WatcherReceivedCtrlC);
                }
                Err(e) => {
                    msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
                    return;
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    shutdown_rx
}
