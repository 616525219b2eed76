use crate::{
    libs::{autostart, config::Config, messages::Message},
    msg_error, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Reset every setting to its default without prompting
    #[arg(short, long)]
    reset: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let previous = Config::read().unwrap_or_default();

    let config = if init_args.reset { Config::default() } else { Config::init()? };
    config.save()?;
    msg_success!(Message::ConfigSaved);

    if config.launch_at_login != previous.launch_at_login {
        let applied = if config.launch_at_login { autostart::enable() } else { autostart::disable() };
        if let Err(e) = applied {
            msg_error!(Message::LoginItemFailed(e.to_string()));
        }
    }
    Ok(())
}
