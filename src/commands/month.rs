use crate::db::{db::Db, store::SqliteStore};
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::monthly::MonthlyChart;
use crate::libs::view::View;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MonthArgs {
    /// Months relative to the current one, e.g. -1 for last month (at most 12 either way)
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i32,
}

pub fn cmd(args: MonthArgs) -> Result<()> {
    let store = SqliteStore::new(Db::new()?);
    let chart = MonthlyChart::load(&store, SystemClock.now(), args.offset)?;
    View::month(&chart);
    Ok(())
}
