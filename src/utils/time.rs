use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, TimeZone, Utc};

/// Short label used for chart buckets, `6/15` style.
pub fn day_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// Same wall-clock time `days` calendar days earlier. Falls back to plain 24h steps when that
/// local time doesn't exist (DST gaps).
pub fn days_before<Tz: TimeZone>(now: &DateTime<Tz>, days: u32) -> DateTime<Tz> {
    now.clone()
        .checked_sub_days(Days::new(days as u64))
        .unwrap_or_else(|| now.clone() - Duration::days(days as i64))
}

/// Calendar day an instant falls on when seen from `tz`.
pub fn calendar_day<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}
