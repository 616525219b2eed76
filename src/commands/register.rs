use super::parse_date;
use crate::db::{db::Db, store::SessionStore, store::SqliteStore};
use crate::libs::messages::Message;
use crate::{msg_error, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Work day to flip (YYYY-MM-DD or "today")
    date: String,
}

pub fn cmd(args: RegisterArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let store = SqliteStore::new(Db::new()?);

    let Some(work_day) = store.fetch_work_day(date)? else {
        msg_error!(Message::WorkdayNotFoundForDate(date.to_string()));
        return Ok(());
    };
    store.toggle_registered(work_day.id)?;
    msg_success!(Message::RegisteredToggled(date.to_string(), !work_day.is_registered));
    Ok(())
}
