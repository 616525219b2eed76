use crate::db::{db::Db, store::SessionStore, store::SqliteStore};
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::config::Config;
use crate::libs::formatter::{format_hours_minutes, format_percent};
use crate::libs::messages::Message;
use crate::libs::motivation::{MessageGenerator, MessageKind};
use crate::libs::status::status_text;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let store = SqliteStore::new(Db::new()?);
    let now = SystemClock.now();

    let Some(summary) = store.daily_summary(now.date())? else {
        msg_print!(Message::NoWorkdayToday);
        return Ok(());
    };

    let state = summary.state(now);
    msg_print!(Message::StatusLine(
        state.label().to_string(),
        status_text(state, summary.remaining(now)),
        format_hours_minutes(&summary.worked(now)),
    ));
    msg_print!(Message::ProgressLine(format_percent(summary.progress(now))));
    View::day(&summary, now);

    let remind = config.tracking.register_externally && !summary.work_day.is_registered;
    let kind = MessageKind::for_progress(summary.progress(now), remind);
    let text = MessageGenerator::new(config.messages).generate(kind).await;
    msg_print!(Message::GeneratedMessage(text));
    Ok(())
}
