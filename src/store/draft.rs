//! Validation of user supplied entry fields. The store itself accepts whatever it is given, so
//! every place that creates or edits entries from user input goes through [EntryDraft].

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::entities::{Entry, EntryPatch};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryDraftError {
    #[error("Title must not be empty")]
    EmptyTitle,
}

/// Entry fields as typed by a user, already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub title: String,
    pub note: Option<String>,
    pub tags: Vec<String>,
    pub value: f64,
}

impl EntryDraft {
    pub fn parse(
        title: &str,
        note: Option<&str>,
        tags: Option<&str>,
        value: Option<&str>,
    ) -> Result<Self, EntryDraftError> {
        Ok(Self {
            title: parse_title(title)?,
            note: note.and_then(parse_note),
            tags: tags.map(parse_tags).unwrap_or_default(),
            value: value.map(parse_value).unwrap_or(0.),
        })
    }

    pub fn into_entry(self, id: String, date: DateTime<Utc>) -> Entry {
        Entry {
            id,
            title: self.title,
            note: self.note,
            tags: self.tags,
            date,
            value: self.value,
        }
    }

    /// Replaces every user editable field, the way saving an edit form does.
    pub fn into_patch(self) -> EntryPatch {
        EntryPatch {
            title: Some(self.title),
            note: Some(self.note),
            tags: Some(self.tags),
            date: None,
            value: Some(self.value),
        }
    }
}

/// Builds a patch out of only the fields that were supplied. An empty note clears it.
pub fn parse_patch(
    title: Option<&str>,
    note: Option<&str>,
    tags: Option<&str>,
    value: Option<&str>,
) -> Result<EntryPatch, EntryDraftError> {
    Ok(EntryPatch {
        title: title.map(parse_title).transpose()?,
        note: note.map(parse_note),
        tags: tags.map(parse_tags),
        date: None,
        value: value.map(parse_value),
    })
}

fn parse_title(title: &str) -> Result<String, EntryDraftError> {
    let title = title.trim();
    if title.is_empty() {
        Err(EntryDraftError::EmptyTitle)
    } else {
        Ok(title.to_string())
    }
}

fn parse_note(note: &str) -> Option<String> {
    if note.trim().is_empty() {
        None
    } else {
        Some(note.to_string())
    }
}

/// Comma separated list. Blank items are dropped, duplicates are kept.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

/// Reads the leading integer of `text`, `"12 reps"` is 12. Anything unparsable is 0.
pub fn parse_value(text: &str) -> f64 {
    let text = text.trim_start();
    let sign_len = text
        .chars()
        .next()
        .filter(|c| *c == '-' || *c == '+')
        .map_or(0, char::len_utf8);
    let digits_len = text[sign_len..]
        .chars()
        .take_while(char::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return 0.;
    }

    text[..sign_len + digits_len].parse::<f64>().unwrap_or(0.)
}
