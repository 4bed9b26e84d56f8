//! Filtered and sorted views over a snapshot of entries. Nothing here touches the store, every
//! function borrows the snapshot it is given and leaves it unmodified.

pub mod collation;
pub mod sort;

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::{store::entities::Entry, utils::time::days_before};

use collation::Collation;
use sort::{sort_entry_refs, SortOption};

/// Predicates selecting entries. Every active predicate has to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Case-insensitive substring of title or note. Empty means inactive.
    pub search: Option<String>,
    /// Exact tag the entry must carry.
    pub tag: Option<String>,
    /// Keep entries dated at or after this many days before now.
    pub recent_days: Option<u32>,
}

impl EntryFilter {
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..self
        }
    }

    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..self
        }
    }

    pub fn with_recent_days(self, days: u32) -> Self {
        Self {
            recent_days: Some(days),
            ..self
        }
    }

    pub fn matches<Tz: TimeZone>(&self, entry: &Entry, now: &DateTime<Tz>) -> bool {
        self.compile(now).matches(entry)
    }

    pub fn apply<'a, Tz: TimeZone>(&self, entries: &'a [Entry], now: &DateTime<Tz>) -> Vec<&'a Entry> {
        let predicate = self.compile(now);
        entries.iter().filter(|v| predicate.matches(v)).collect()
    }

    fn compile<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> CompiledFilter<'_> {
        CompiledFilter {
            search: self
                .search
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(str::to_lowercase),
            tag: self.tag.as_deref(),
            since: self
                .recent_days
                .map(|days| days_before(now, days).with_timezone(&Utc)),
        }
    }
}

struct CompiledFilter<'a> {
    search: Option<String>,
    tag: Option<&'a str>,
    since: Option<DateTime<Utc>>,
}

impl CompiledFilter<'_> {
    fn matches(&self, entry: &Entry) -> bool {
        if let Some(search) = &self.search {
            let in_title = entry.title.to_lowercase().contains(search.as_str());
            let in_note = entry
                .note
                .as_ref()
                .is_some_and(|note| note.to_lowercase().contains(search.as_str()));
            if !in_title && !in_note {
                return false;
            }
        }

        if let Some(tag) = self.tag {
            if !entry.has_tag(tag) {
                return false;
            }
        }

        match self.since {
            Some(since) => entry.date >= since,
            None => true,
        }
    }
}

/// A filter followed by a sort, what an entry list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    pub filter: EntryFilter,
    pub sort: SortOption,
}

impl EntryQuery {
    pub fn new(filter: EntryFilter, sort: SortOption) -> Self {
        Self { filter, sort }
    }

    pub fn run<'a, Tz: TimeZone, C: Collation + ?Sized>(
        &self,
        entries: &'a [Entry],
        now: &DateTime<Tz>,
        collation: &C,
    ) -> Vec<&'a Entry> {
        let mut result = self.filter.apply(entries, now);
        sort_entry_refs(&mut result, self.sort, collation);
        result
    }
}

/// Every tag used in the snapshot, in order of first appearance.
pub fn distinct_tags(entries: &[Entry]) -> Vec<&str> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .flat_map(|v| v.tags.iter())
        .map(String::as_str)
        .filter(|tag| seen.insert(*tag))
        .collect()
}
