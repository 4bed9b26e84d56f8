use std::{cmp::Ordering, fmt::Display};

use crate::store::entities::Entry;

use super::collation::Collation;

/// Orders offered for entry lists. Anything unrecognized means [SortOption::DateDesc].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    DateDesc,
    DateAsc,
    ValueDesc,
    ValueAsc,
    TitleAsc,
    TitleDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::DateDesc,
        SortOption::DateAsc,
        SortOption::ValueDesc,
        SortOption::ValueAsc,
        SortOption::TitleAsc,
        SortOption::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::DateDesc => "date-desc",
            SortOption::DateAsc => "date-asc",
            SortOption::ValueDesc => "value-desc",
            SortOption::ValueAsc => "value-asc",
            SortOption::TitleAsc => "title-asc",
            SortOption::TitleDesc => "title-desc",
        }
    }

    pub fn compare<C: Collation + ?Sized>(&self, a: &Entry, b: &Entry, collation: &C) -> Ordering {
        match self {
            SortOption::DateDesc => by_date_desc(a, b),
            SortOption::DateAsc => a.date.cmp(&b.date),
            SortOption::ValueDesc => b.value.total_cmp(&a.value),
            SortOption::ValueAsc => a.value.total_cmp(&b.value),
            SortOption::TitleAsc => collation.compare(&a.title, &b.title),
            SortOption::TitleDesc => collation.compare(&b.title, &a.title),
        }
    }
}

impl From<&str> for SortOption {
    fn from(value: &str) -> Self {
        SortOption::ALL
            .into_iter()
            .find(|v| v.as_str() == value)
            .unwrap_or_default()
    }
}

impl Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Newest first by full instant.
pub fn by_date_desc(a: &Entry, b: &Entry) -> Ordering {
    b.date.cmp(&a.date)
}

/// Returns the entries in `option` order. `entries` itself is left as is. The sort is stable so
/// ties keep their input order.
pub fn sort_entries<'a, C: Collation + ?Sized>(
    entries: &'a [Entry],
    option: SortOption,
    collation: &C,
) -> Vec<&'a Entry> {
    let mut result = entries.iter().collect::<Vec<_>>();
    sort_entry_refs(&mut result, option, collation);
    result
}

pub fn sort_entry_refs<C: Collation + ?Sized>(
    entries: &mut [&Entry],
    option: SortOption,
    collation: &C,
) {
    entries.sort_by(|a, b| option.compare(a, b, collation));
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    use crate::{
        query::collation::{CodePointCollation, Collation, LocaleCollation},
        store::entities::Entry,
    };

    use super::{sort_entries, SortOption};

    fn entry(id: &str, title: &str, date: &str, value: f64) -> Entry {
        Entry {
            id: id.into(),
            title: title.into(),
            note: None,
            tags: vec![],
            date: date.parse::<DateTime<Utc>>().unwrap(),
            value,
        }
    }

    fn entries() -> Vec<Entry> {
        vec![
            entry("1", "プログラミング学習", "2025-06-15T10:00:00.000Z", 50.),
            entry("2", "朝のランニング", "2025-06-17T08:00:00.000Z", 30.),
            entry("3", "読書", "2025-06-13T12:00:00.000Z", 80.),
            entry("4", "英語学習", "2025-06-16T09:00:00.000Z", 10.),
        ]
    }

    fn ids(sorted: &[&Entry]) -> Vec<String> {
        sorted.iter().map(|v| v.id.clone()).collect()
    }

    fn sorted_ids(option: SortOption) -> Vec<String> {
        let entries = entries();
        ids(&sort_entries(&entries, option, &CodePointCollation))
    }

    #[test]
    fn test_date_desc() {
        assert_eq!(sorted_ids(SortOption::DateDesc), ["2", "4", "1", "3"]);
    }

    #[test]
    fn test_date_asc() {
        assert_eq!(sorted_ids(SortOption::DateAsc), ["3", "1", "4", "2"]);
    }

    #[test]
    fn test_value_desc() {
        assert_eq!(sorted_ids(SortOption::ValueDesc), ["3", "1", "2", "4"]);
    }

    #[test]
    fn test_value_asc() {
        assert_eq!(sorted_ids(SortOption::ValueAsc), ["4", "2", "1", "3"]);
    }

    #[test]
    fn test_title_orders_follow_collation() -> anyhow::Result<()> {
        let collation = LocaleCollation::new("ja")?;
        let entries = entries();

        let ascending = sort_entries(&entries, SortOption::TitleAsc, &collation);
        for pair in ascending.windows(2) {
            assert_ne!(
                collation.compare(&pair[0].title, &pair[1].title),
                Ordering::Greater
            );
        }

        let descending = sort_entries(&entries, SortOption::TitleDesc, &collation);
        for pair in descending.windows(2) {
            assert_ne!(
                collation.compare(&pair[0].title, &pair[1].title),
                Ordering::Less
            );
        }
        Ok(())
    }

    #[test]
    fn test_unknown_option_is_date_desc() {
        assert_eq!(SortOption::from("unknown"), SortOption::DateDesc);
        assert_eq!(SortOption::from(""), SortOption::DateDesc);
        assert_eq!(SortOption::from("DATE-ASC"), SortOption::DateDesc);
        assert_eq!(
            sorted_ids(SortOption::from("unknown")),
            sorted_ids(SortOption::DateDesc)
        );
    }

    #[test]
    fn test_option_names_round_trip() {
        for option in SortOption::ALL {
            assert_eq!(SortOption::from(option.as_str()), option);
            assert_eq!(option.to_string(), option.as_str());
        }
    }

    #[test]
    fn test_input_is_not_modified() {
        let entries = entries();
        let before = entries.clone();
        sort_entries(&entries, SortOption::ValueDesc, &CodePointCollation);
        assert_eq!(entries, before);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(sort_entries(&[], SortOption::DateDesc, &CodePointCollation).is_empty());

        let single = vec![entry("1", "テスト", "2025-06-15T10:00:00.000Z", 10.)];
        let sorted = sort_entries(&single, SortOption::DateDesc, &CodePointCollation);
        assert_eq!(sorted, vec![&single[0]]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let same = vec![
            entry("1", "読書", "2025-06-15T10:00:00.000Z", 50.),
            entry("2", "読書", "2025-06-15T10:00:00.000Z", 50.),
        ];
        for option in SortOption::ALL {
            assert_eq!(
                ids(&sort_entries(&same, option, &CodePointCollation)),
                ["1", "2"]
            );
        }
    }

    fn arbitrary_entries() -> impl Strategy<Value = Vec<Entry>> {
        prop::collection::vec(
            (0i64..2_000_000_000, -1000i32..1000, "[a-zあ-ん読書瞑想]{0,6}"),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(index, (seconds, value, title))| Entry {
                    id: index.to_string(),
                    title,
                    note: None,
                    tags: vec![],
                    date: Utc.timestamp_opt(seconds, 0).unwrap(),
                    value: value as f64,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_sort_is_a_permutation(entries in arbitrary_entries(), option in 0usize..6) {
            let before = entries.clone();
            let sorted = sort_entries(&entries, SortOption::ALL[option], &CodePointCollation);

            prop_assert_eq!(&entries, &before);
            let mut sorted_ids = ids(&sorted);
            let mut input_ids = entries.iter().map(|v| v.id.clone()).collect::<Vec<_>>();
            sorted_ids.sort();
            input_ids.sort();
            prop_assert_eq!(sorted_ids, input_ids);
        }

        #[test]
        fn prop_date_orders_are_inverse(entries in arbitrary_entries()) {
            let mut dates = entries.iter().map(|v| v.date).collect::<Vec<_>>();
            dates.sort();
            dates.dedup();
            prop_assume!(dates.len() == entries.len());

            let mut descending = ids(&sort_entries(&entries, SortOption::DateDesc, &CodePointCollation));
            let ascending = ids(&sort_entries(&entries, SortOption::DateAsc, &CodePointCollation));
            descending.reverse();
            prop_assert_eq!(descending, ascending);
        }

        #[test]
        fn prop_unknown_option_matches_date_desc(entries in arbitrary_entries(), option in "[a-z-]{0,12}") {
            prop_assume!(SortOption::ALL.iter().all(|v| v.as_str() != option));

            let fallback = ids(&sort_entries(&entries, SortOption::from(option.as_str()), &CodePointCollation));
            let date_desc = ids(&sort_entries(&entries, SortOption::DateDesc, &CodePointCollation));
            prop_assert_eq!(fallback, date_desc);
        }
    }
}
