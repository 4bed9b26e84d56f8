use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged activity. Stored and exchanged as JSON, `date` travels as an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub value: f64,
}

impl Entry {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|v| v == tag)
    }

    pub fn with_note(self, note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..self
        }
    }

    pub fn with_tags<I, T>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..self
        }
    }
}

/// The whole persisted collection. Export and import use exactly this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardRecord {
    pub entries: Vec<Entry>,
}

/// Partial update of an [Entry]. Fields left as `None` keep their previous value. The id is not
/// part of the patch since ids are never reassigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the note.
    pub note: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub date: Option<DateTime<Utc>>,
    pub value: Option<f64>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.note.is_none()
            && self.tags.is_none()
            && self.date.is_none()
            && self.value.is_none()
    }

    pub fn apply_to(self, entry: &mut Entry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(note) = self.note {
            entry.note = note;
        }
        if let Some(tags) = self.tags {
            entry.tags = tags;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(value) = self.value {
            entry.value = value;
        }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self
        }
    }

    pub fn with_value(self, value: f64) -> Self {
        Self {
            value: Some(value),
            ..self
        }
    }

    pub fn with_note(self, note: Option<String>) -> Self {
        Self {
            note: Some(note),
            ..self
        }
    }
}
