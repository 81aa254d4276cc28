use time_tracker::commands::Cli;
use time_tracker::libs::messages::macros::is_debug_mode;
use tracing_subscriber::filter::EnvFilter;

fn init_tracing() {
    if !is_debug_mode() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("time_tracker=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    Cli::menu().await
}
