use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, TimeZone};

use crate::{
    store::entities::Entry,
    utils::time::{calendar_day, day_label},
};

/// Activity of one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// `M/D` label for axis ticks.
    pub label: String,
    pub count: usize,
    /// Sum of the values logged that day.
    pub value: f64,
}

/// One point per calendar day for the last `period_days` days, oldest first and today last.
/// Days without entries are zero filled.
pub fn chart_data<Tz: TimeZone>(
    entries: &[Entry],
    period_days: u32,
    now: &DateTime<Tz>,
) -> Vec<ChartPoint> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut per_day = HashMap::<NaiveDate, (usize, f64)>::new();
    for entry in entries {
        let bucket = per_day
            .entry(calendar_day(&entry.date, &tz))
            .or_insert((0, 0.));
        bucket.0 += 1;
        bucket.1 += entry.value;
    }

    (0..period_days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .map(|date| {
            let (count, value) = per_day.get(&date).copied().unwrap_or((0, 0.));
            ChartPoint {
                date,
                label: day_label(date),
                count,
                value,
            }
        })
        .collect()
}
