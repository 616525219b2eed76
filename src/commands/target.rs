use crate::db::{db::Db, store::SessionStore, store::SqliteStore};
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Hours per day, greater than 0 and at most 24
    hours: f64,
}

/// Stores the new default and applies it to today's work day.
pub fn cmd(args: TargetArgs) -> Result<()> {
    if !(args.hours > 0.0 && args.hours <= 24.0) {
        msg_bail_anyhow!(Message::InvalidTargetHours(args.hours.to_string()));
    }

    let mut config = Config::read()?;
    config.tracking.target_hours = args.hours;
    config.save()?;

    let store = SqliteStore::new(Db::new()?);
    let today = SystemClock.now().date();
    let work_day = store.ensure_work_day(today, args.hours)?;
    store.update_target_hours(work_day.id, args.hours)?;

    msg_success!(Message::TargetUpdated(args.hours));
    Ok(())
}
