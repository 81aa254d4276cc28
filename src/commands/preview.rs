//! Shows what the current settings produce without writing to the log.

use super::session::{self, TerminalHost};
use crate::{
    libs::{event::TrackerEvent, formatter::render, messages::Message, view::View},
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::sync::Arc;

/// Event used for every preview line.
const DEMO_EVENT: TrackerEvent = TrackerEvent::EditorFocus;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Preview this template instead of the stored log line
    #[arg(short, long)]
    line: Option<String>,
    /// Project name to render for %project%
    #[arg(short, long)]
    project: Option<String>,
}

pub fn cmd(preview_args: PreviewArgs) -> Result<()> {
    let host = Arc::new(TerminalHost::new(preview_args.project));
    let logger = session::logger(host)?;
    let settings = logger.settings();

    let template = preview_args.line.unwrap_or_else(|| settings.log_line());

    msg_print!(Message::PreviewHeader, true);
    println!("{}", template);
    println!("{}", render(&template, DEMO_EVENT, logger.providers()));
    msg_info!(Message::PreviewLogFile(settings.log_file_path().display().to_string()));

    msg_print!(Message::PreviewProvidersHeader, true);
    View::providers(logger.providers(), DEMO_EVENT);

    msg_warning!(Message::OldLogsUnchanged, true);
    Ok(())
}
