// src/domain/event.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where an event happens, normalized once at the store boundary.
///
/// Documents carry `location` as `{name, address?}`, as a bare legacy
/// string, or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Location {
    Structured {
        name: String,
        address: Option<String>,
    },
    Legacy(String),
    #[default]
    Absent,
}

/// One event, independent of the backend it was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRecord {
    /// `None` until the store has assigned one.
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    /// Ignored for ordering when `recurring` is set.
    pub date: Option<NaiveDate>,
    pub display_time: Option<String>,
    pub recurring: bool,
    pub location: Location,
    pub image_url: Option<String>,
    pub link: Option<String>,
}

/// The editable fields written by the admin editor.
///
/// Timestamps are not part of the draft: stores stamp them on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub display_time: Option<String>,
    pub recurring: bool,
    pub location: Location,
    pub image_url: Option<String>,
    pub link: Option<String>,
}

impl EventDraft {
    pub fn into_record(self, id: Option<String>) -> EventRecord {
        EventRecord {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            display_time: self.display_time,
            recurring: self.recurring,
            location: self.location,
            image_url: self.image_url,
            link: self.link,
        }
    }
}

// Stored document shape
//  ├── title
//  ├── description
//  ├── date          "YYYY-MM-DD" | null
//  ├── displayTime   "6:30 PM" | null
//  ├── recurring
//  ├── location      {name, address?} | "legacy text" | null
//  ├── imageUrl
//  └── link

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawLocation {
    Structured {
        #[serde(default)]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<String>,
    },
    Legacy(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub display_time: Option<String>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl From<&EventDraft> for EventDocument {
    fn from(draft: &EventDraft) -> Self {
        let location = match &draft.location {
            Location::Structured { name, address } => Some(RawLocation::Structured {
                name: Some(name.clone()),
                address: address.clone(),
            }),
            Location::Legacy(text) => Some(RawLocation::Legacy(text.clone())),
            Location::Absent => None,
        };

        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            date: draft.date.map(|d| d.format("%Y-%m-%d").to_string()),
            display_time: draft.display_time.clone(),
            recurring: draft.recurring,
            location,
            image_url: draft.image_url.clone(),
            link: draft.link.clone(),
        }
    }
}

impl EventDocument {
    /// Normalize a stored document into an `EventRecord`.
    ///
    /// Blank optional strings become `None`. A date that is not `YYYY-MM-DD`
    /// is dropped (the record is then treated as undated) and logged.
    pub fn into_record(self, id: Option<String>) -> EventRecord {
        let date = non_blank(self.date).and_then(|raw| {
            match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(e) => {
                    tracing::warn!(id = ?id, date = %raw, "ignoring unparsable event date: {e}");
                    None
                }
            }
        });

        EventRecord {
            id,
            title: self.title,
            description: self.description,
            date,
            display_time: non_blank(self.display_time),
            recurring: self.recurring,
            location: normalize_location(self.location),
            image_url: non_blank(self.image_url),
            link: non_blank(self.link),
        }
    }
}

fn normalize_location(raw: Option<RawLocation>) -> Location {
    match raw {
        Some(RawLocation::Structured { name, address }) => Location::Structured {
            name: name.unwrap_or_default(),
            address: non_blank(address),
        },
        Some(RawLocation::Legacy(text)) if !text.trim().is_empty() => Location::Legacy(text),
        _ => Location::Absent,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
