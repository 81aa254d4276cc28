use super::session::{self, TerminalHost};
use crate::{
    libs::{event::TrackerEvent, messages::Message},
    msg_error_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct EventArgs {
    #[arg(value_enum)]
    event: TrackerEvent,
    /// Project name to render for %project%
    #[arg(short, long)]
    project: Option<String>,
}

/// Appends a single event to the log, failing loudly if it can't be written.
pub fn cmd(event_args: EventArgs) -> Result<()> {
    let host = Arc::new(TerminalHost::new(event_args.project));
    let logger = session::logger(host)?;

    logger.try_log_event(event_args.event).map_err(|e| {
        msg_error_anyhow!(Message::LogWriteFailed {
            path: logger.settings().log_file_path().display().to_string(),
            error: e.to_string(),
        })
    })?;

    msg_success!(Message::EventLogged(event_args.event.to_string()));
    Ok(())
}
