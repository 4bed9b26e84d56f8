use std::cmp::Ordering;

use anyhow::{anyhow, Result};
use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use icu_provider::DataLocale;

/// Locale used for ordering titles unless configured otherwise.
pub const DEFAULT_COLLATION_LOCALE: &str = "ja";

/// Decides the order of two titles. Any `Fn(&str, &str) -> Ordering` works as one.
pub trait Collation {
    fn compare(&self, left: &str, right: &str) -> Ordering;
}

impl<F: Fn(&str, &str) -> Ordering> Collation for F {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        self(left, right)
    }
}

/// Natural-language ordering of a locale, backed by ICU collation data.
pub struct LocaleCollation {
    locale: String,
    collator: Collator,
}

impl LocaleCollation {
    pub fn new(locale: &str) -> Result<Self> {
        let parsed: Locale = locale
            .parse()
            .map_err(|e| anyhow!("Invalid collation locale {locale:?}: {e:?}"))?;
        let collator = Collator::try_new(&DataLocale::from(&parsed), CollatorOptions::new())
            .map_err(|e| anyhow!("No collation data for {locale:?}: {e:?}"))?;

        Ok(Self {
            locale: locale.to_string(),
            collator,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Collation for LocaleCollation {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        self.collator.compare(left, right)
    }
}

/// Plain code point ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodePointCollation;

impl Collation for CodePointCollation {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        left.cmp(right)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{CodePointCollation, Collation, LocaleCollation, DEFAULT_COLLATION_LOCALE};

    #[test]
    fn test_locale_collation_is_not_code_point_order() -> anyhow::Result<()> {
        let english = LocaleCollation::new("en")?;
        assert_eq!(english.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(CodePointCollation.compare("apple", "Banana"), Ordering::Greater);
        Ok(())
    }

    #[test]
    fn test_japanese_collation() -> anyhow::Result<()> {
        let japanese = LocaleCollation::new(DEFAULT_COLLATION_LOCALE)?;
        assert_eq!(japanese.locale(), "ja");
        // full width letters sort with their ascii counterparts
        assert_eq!(japanese.compare("Ａ", "B"), Ordering::Less);
        assert_eq!(CodePointCollation.compare("Ａ", "B"), Ordering::Greater);
        // kana before kanji
        assert_eq!(japanese.compare("プログラミング学習", "読書"), Ordering::Less);
        assert_eq!(japanese.compare("読書", "読書"), Ordering::Equal);
        Ok(())
    }

    #[test]
    fn test_invalid_locale() {
        assert!(LocaleCollation::new("not a locale!").is_err());
    }

    #[test]
    fn test_closure_collation() {
        let by_length = |a: &str, b: &str| a.chars().count().cmp(&b.chars().count());
        assert_eq!(by_length.compare("読書", "瞑想する"), Ordering::Less);
    }
}
