use crate::libs::config::Config;
use crate::libs::{autostart, messages::Message};
use crate::msg_print;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct AutostartArgs {
    #[command(subcommand)]
    command: AutostartCommand,
}

#[derive(Debug, Subcommand)]
enum AutostartCommand {
    /// Start `worktrack watch` when you log in
    Enable,
    /// Remove the login item
    Disable,
    /// Show whether the login item is installed
    Status,
}

pub fn cmd(args: AutostartArgs) -> Result<()> {
    match args.command {
        AutostartCommand::Enable => {
            autostart::enable()?;
            remember(true)
        }
        AutostartCommand::Disable => {
            autostart::disable()?;
            remember(false)
        }
        AutostartCommand::Status => {
            let status = autostart::status()?;
            msg_print!(Message::AutostartStatus(status));
            Ok(())
        }
    }
}

/// Keeps the launch-at-login setting in line with the login item.
fn remember(enabled: bool) -> Result<()> {
    let mut config = Config::read()?;
    if config.launch_at_login != enabled {
        config.launch_at_login = enabled;
        config.save()?;
    }
    Ok(())
}
