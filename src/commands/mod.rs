pub mod event;
pub mod init;
pub mod preview;
pub mod session;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure log file, log line and AFK threshold")]
    Init(init::InitArgs),
    #[command(about = "Preview the log line and its placeholders")]
    Preview(preview::PreviewArgs),
    #[command(about = "Append a single event to the log", arg_required_else_help = true)]
    Event(event::EventArgs),
    #[command(about = "Track activity of this terminal session until quit")]
    Watch(watch::WatchArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Preview(args) => preview::cmd(args),
            Commands::Event(args) => event::cmd(args),
            Commands::Watch(args) => watch::cmd(args).await,
        }
    }
}
