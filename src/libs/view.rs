use super::formatter::{format_duration, format_hours, format_time};
use super::monthly::MonthlyChart;
use super::status::StatusColor;
use super::summary::DailySummary;
use chrono::NaiveDateTime;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// One row per work day: date, worked, break time, break count, target, registered.
    pub fn history_table(summaries: &[DailySummary], now: NaiveDateTime) -> Table {
        let mut table = Table::new();
        table.add_row(row!["DATE", "WORKED", "BREAKS", "BREAK COUNT", "TARGET", "REGISTERED"]);
        for summary in summaries {
            table.add_row(row![
                summary.work_day.date.format("%Y-%m-%d"),
                format_duration(&summary.worked(now)),
                format_duration(&summary.break_time(now)),
                summary.break_count(),
                format_hours(summary.work_day.target_hours),
                if summary.work_day.is_registered { "yes" } else { "no" }
            ]);
        }
        table
    }

    pub fn history(summaries: &[DailySummary], now: NaiveDateTime) {
        Self::history_table(summaries, now).printstd();
    }

    /// Work and break intervals of a single day in start order.
    pub fn day_table(summary: &DailySummary, now: NaiveDateTime) -> Table {
        let mut intervals: Vec<(&str, _)> = summary
            .sessions
            .iter()
            .map(|s| ("work", s))
            .chain(summary.breaks.iter().map(|s| ("break", s)))
            .collect();
        intervals.sort_by_key(|(_, s)| s.started_at);

        let mut table = Table::new();
        table.add_row(row!["#", "KIND", "START", "END", "DURATION"]);
        for (i, (kind, session)) in intervals.iter().enumerate() {
            table.add_row(row![
                i + 1,
                kind,
                format_time(Some(session.started_at)),
                format_time(session.ended_at),
                format_duration(&session.duration(now))
            ]);
        }
        table
    }

    pub fn day(summary: &DailySummary, now: NaiveDateTime) {
        Self::day_table(summary, now).printstd();
        println!(
            "Worked: {}  Breaks: {} ({})  Day: {} - {}",
            format_duration(&summary.worked(now)),
            summary.break_count(),
            format_duration(&summary.break_time(now)),
            format_time(summary.day_start_time()),
            format_time(summary.day_end_time(now)),
        );
    }

    pub fn month_table(chart: &MonthlyChart) -> Table {
        let mut table = Table::new();
        table.add_row(row!["DATE", "DAY", "HOURS", "TARGET", "", ""]);
        for day in &chart.days {
            table.add_row(row![
                day.date.format("%d"),
                day.date.format("%a"),
                format_hours(day.hours_worked),
                format_hours(day.target_hours),
                bar(day.hours_worked),
                color_name(day.color())
            ]);
        }
        table.add_row(row!["TOTAL", "", format_hours(chart.total_hours), "", "", ""]);
        table.add_row(row!["AVERAGE", "", format_hours(chart.average_hours), "", "", ""]);
        table
    }

    pub fn month(chart: &MonthlyChart) {
        println!("{}", chart.label());
        Self::month_table(chart).printstd();
        if chart.can_previous {
            println!("--offset {} for the previous month", chart.offset - 1);
        }
        if chart.can_next {
            println!("--offset {} for the next month", chart.offset + 1);
        }
    }
}

/// One block per started hour.
fn bar(hours: f64) -> String {
    "█".repeat(hours.max(0.0).ceil() as usize)
}

fn color_name(color: StatusColor) -> &'static str {
    match color {
        StatusColor::Red => "red",
        StatusColor::Yellow => "yellow",
        StatusColor::Green => "green",
        StatusColor::Gray => "gray",
    }
}
