//! Command-line interface.
//!
//! Each subcommand lives in its own module exposing an `Args` struct and a
//! `cmd` function. [`Cli::menu`] parses the arguments and dispatches.

pub mod autostart;
pub mod history;
pub mod init;
pub mod month;
pub mod register;
pub mod status;
pub mod target;
pub mod watch;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Interactive settings setup")]
    Init(init::InitArgs),
    #[command(about = "Track work and breaks from screen lock activity")]
    Watch(watch::WatchArgs),
    #[command(about = "Show today's progress")]
    Status,
    #[command(about = "List tracked work days, or one day's sessions")]
    History(history::HistoryArgs),
    #[command(about = "Toggle the registered flag of a work day", arg_required_else_help = true)]
    Register(register::RegisterArgs),
    #[command(about = "Set the daily target hours", arg_required_else_help = true)]
    Target(target::TargetArgs),
    #[command(about = "Show hours worked per day for a month")]
    Month(month::MonthArgs),
    #[command(about = "Manage start at login")]
    Autostart(autostart::AutostartArgs),
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
            Commands::Watch(args) => watch::cmd(args).await,
            Commands::Status => status::cmd().await,
            Commands::History(args) => history::cmd(args),
            Commands::Register(args) => register::cmd(args),
            Commands::Target(args) => target::cmd(args),
            Commands::Month(args) => month::cmd(args),
            Commands::Autostart(args) => autostart::cmd(args),
        }
    }
}

/// Accepts `YYYY-MM-DD` or `today`.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.eq_ignore_ascii_case("today") {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
