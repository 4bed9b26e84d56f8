//! Dashboard metrics derived from a snapshot of entries. Calendar days are taken in the timezone
//! of the `now` argument, so callers decide which local days count.

pub mod chart;

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    query::sort::by_date_desc,
    store::entities::Entry,
    utils::{
        percentage::Percentage,
        time::{calendar_day, days_before},
    },
};

use chart::{chart_data, ChartPoint};

/// Entries per week that count as reaching the goal.
pub const WEEKLY_GOAL: usize = 7;
pub const RECENT_ENTRIES_LIMIT: usize = 5;

/// Entries dated at or after now minus seven days.
pub fn this_week_count<Tz: TimeZone>(entries: &[Entry], now: &DateTime<Tz>) -> usize {
    let since = days_before(now, 7).with_timezone(&Utc);
    entries.iter().filter(|v| v.date >= since).count()
}

/// Number of consecutive calendar days, ending today, that have at least one entry. Zero when
/// nothing was logged today.
pub fn consecutive_days<Tz: TimeZone>(entries: &[Entry], now: &DateTime<Tz>) -> u32 {
    let tz = now.timezone();
    let covered = entries
        .iter()
        .map(|v| calendar_day(&v.date, &tz))
        .collect::<HashSet<_>>();

    let mut streak = 0;
    let mut day = Some(now.date_naive());
    while let Some(current) = day.filter(|v| covered.contains(v)) {
        streak += 1;
        day = current.pred_opt();
    }
    streak
}

/// Share of [WEEKLY_GOAL] reached, as a whole percentage capped at 100.
pub fn goal_rate(this_week_count: usize) -> u32 {
    Percentage::of(this_week_count as f64, WEEKLY_GOAL as f64)
        .map(|v| v.capped(100.).rounded())
        .unwrap_or(0)
}

/// Newest entries first, regardless of how a list elsewhere is sorted.
pub fn recent_entries(entries: &[Entry], limit: usize) -> Vec<&Entry> {
    let mut sorted = entries.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| by_date_desc(a, b));
    sorted.truncate(limit);
    sorted
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary<'a> {
    pub total_entries: usize,
    pub this_week_count: usize,
    pub consecutive_days: u32,
    pub goal_rate: u32,
    pub chart: Vec<ChartPoint>,
    pub recent_entries: Vec<&'a Entry>,
}

impl<'a> DashboardSummary<'a> {
    pub fn compute<Tz: TimeZone>(
        entries: &'a [Entry],
        now: &DateTime<Tz>,
        period_days: u32,
    ) -> Self {
        let this_week_count = this_week_count(entries, now);
        Self {
            total_entries: entries.len(),
            this_week_count,
            consecutive_days: consecutive_days(entries, now),
            goal_rate: goal_rate(this_week_count),
            chart: chart_data(entries, period_days, now),
            recent_entries: recent_entries(entries, RECENT_ENTRIES_LIMIT),
        }
    }
}
