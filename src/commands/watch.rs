use crate::libs::daemon;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Run detached from the terminal
    #[arg(long, conflicts_with = "stop")]
    background: bool,

    /// Stop a watcher started with --background
    #[arg(long)]
    stop: bool,
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    if args.stop {
        return daemon::stop();
    }
    if args.background {
        return daemon::spawn();
    }
    daemon::run_with_signal_handling().await
}
