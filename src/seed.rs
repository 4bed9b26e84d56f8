//! Demo data used to fill an empty store on first start.

use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;

use crate::{
    store::{entities::Entry, id::generate_id},
    utils::time::days_before,
};

/// Number of calendar days covered, today included.
pub const SEED_DAYS: u32 = 30;
pub const MIN_ENTRIES_PER_DAY: u32 = 1;
pub const MAX_ENTRIES_PER_DAY: u32 = 3;
pub const MIN_VALUE: u32 = 1;
pub const MAX_VALUE: u32 = 100;

const TITLES: [&str; 7] = [
    "朝のランニング",
    "読書",
    "プログラミング学習",
    "瞑想",
    "英語学習",
    "筋トレ",
    "日記を書く",
];
const TAGS: [&str; 5] = ["運動", "学習", "健康", "習慣", "趣味"];
const NOTE: &str = "今日も頑張った！";

/// Generates entries for each of the last [SEED_DAYS] calendar days of `now`'s timezone. Every
/// entry of a day carries the same wall-clock time as `now`.
pub fn generate_seed_entries<Tz: TimeZone, R: Rng + ?Sized>(
    now: &DateTime<Tz>,
    rng: &mut R,
) -> Vec<Entry> {
    let created = now.with_timezone(&Utc);
    let mut entries = vec![];

    for day in 0..SEED_DAYS {
        let date = days_before(now, day).with_timezone(&Utc);
        let count = rng.random_range(MIN_ENTRIES_PER_DAY..=MAX_ENTRIES_PER_DAY);

        for index in 0..count {
            entries.push(Entry {
                id: format!("{}-{day}-{index}", generate_id(created, rng)),
                title: pick(&TITLES, rng).to_string(),
                note: rng.random_bool(0.5).then(|| NOTE.to_string()),
                tags: vec![pick(&TAGS, rng).to_string()],
                date,
                value: rng.random_range(MIN_VALUE..=MAX_VALUE) as f64,
            });
        }
    }

    entries
}

fn pick<'a, R: Rng + ?Sized>(values: &[&'a str], rng: &mut R) -> &'a str {
    values[rng.random_range(0..values.len())]
}
