use std::fmt::Write;

use ansi_term::Style;
use anyhow::Result;
use clap::Parser;

use crate::{
    analytics::{DashboardSummary, WEEKLY_GOAL},
    session::Session,
    store::entry_store::EntryStorage,
};

use super::entries::format_entry;

const DEFAULT_PERIOD_DAYS: u32 = 7;

#[derive(Debug, Parser)]
pub struct DashboardCommand {
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PERIOD_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=366),
        help = "Number of days shown in the activity chart, usually 7 or 30"
    )]
    period: u32,
}

/// Dashboard starts the session, so an empty log gets demo data here.
pub async fn process_dashboard_command<S: EntryStorage>(
    DashboardCommand { period }: DashboardCommand,
    session: &Session<S>,
) -> Result<()> {
    let entries = session.initialize(&mut rand::rng()).await?;
    let summary = DashboardSummary::compute(&entries, &session.local_now(), period);
    print!("{}", render_dashboard(&summary));
    Ok(())
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let heading = Style::new().bold();
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading.paint("Overview"));
    let _ = writeln!(out, "  Total entries\t{}", summary.total_entries);
    let _ = writeln!(out, "  This week\t{}", summary.this_week_count);
    let _ = writeln!(out, "  Streak\t{} days", summary.consecutive_days);
    let _ = writeln!(
        out,
        "  Goal rate\t{}% of {WEEKLY_GOAL} per week",
        summary.goal_rate
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{}",
        heading.paint(format!("Last {} days", summary.chart.len()))
    );
    for point in &summary.chart {
        let _ = writeln!(
            out,
            "  {:>5}\t{:>3}\t{:>6}\t{}",
            point.label,
            point.count,
            point.value,
            "█".repeat(point.count)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", heading.paint("Recent entries"));
    if summary.recent_entries.is_empty() {
        let _ = writeln!(out, "  Nothing logged yet");
    }
    for entry in &summary.recent_entries {
        let _ = writeln!(out, "  {}", format_entry(entry));
    }
    out
}
