use super::parse_date;
use crate::db::{db::Db, store::SessionStore, store::SqliteStore};
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Show the sessions of a single day (YYYY-MM-DD or "today")
    #[arg(short, long)]
    date: Option<String>,

    /// Only list days not yet registered externally
    #[arg(short, long, conflicts_with = "date")]
    unregistered: bool,
}

pub fn cmd(args: HistoryArgs) -> Result<()> {
    let store = SqliteStore::new(Db::new()?);
    let now = SystemClock.now();

    if let Some(date_str) = args.date {
        let date = parse_date(&date_str)?;
        match store.daily_summary(date)? {
            Some(summary) => View::day(&summary, now),
            None => msg_print!(Message::WorkdayNotFoundForDate(date.to_string())),
        }
        return Ok(());
    }

    let mut summaries = Vec::new();
    for work_day in store.fetch_all_work_days()? {
        if args.unregistered && work_day.is_registered {
            continue;
        }
        if let Some(summary) = store.daily_summary(work_day.date)? {
            summaries.push(summary);
        }
    }

    if summaries.is_empty() {
        msg_print!(Message::NoWorkdaysFound);
    } else {
        View::history(&summaries, now);
    }
    Ok(())
}
