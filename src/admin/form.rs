// src/admin/form.rs
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::datetime::DisplayTime;
use crate::domain::location::display_name;
use crate::domain::{EventDraft, EventRecord, Location};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingRequired,
    #[error("Please enter a valid date")]
    InvalidDate,
}

/// Raw editor inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD` from the date input.
    pub date: String,
    pub hour: String,
    pub minute: String,
    pub period: String,
    pub location_name: String,
    pub recurring: bool,
    pub link: String,
}

impl EventForm {
    /// Build from decoded `application/x-www-form-urlencoded` pairs.
    /// Unknown keys are ignored; a checkbox counts as checked when present.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = EventForm::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "title" => form.title = value,
                "description" => form.description = value,
                "date" => form.date = value,
                "hour" => form.hour = value,
                "minute" => form.minute = value,
                "period" => form.period = value,
                "location" => form.location_name = value,
                "recurring" => form.recurring = !value.is_empty(),
                "link" => form.link = value,
                _ => {}
            }
        }
        form
    }

    /// Pre-populate from a stored record. An unparsable time leaves the
    /// time inputs blank.
    pub fn from_record(event: &EventRecord) -> Self {
        let time = event.display_time.as_deref().and_then(DisplayTime::parse);
        let (hour, minute, period) = match time {
            Some(t) => (t.hour, t.minute, t.period),
            None => Default::default(),
        };

        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            date: event
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            hour,
            minute,
            period,
            location_name: display_name(&event.location).unwrap_or_default().to_string(),
            recurring: event.recurring,
            link: event.link.clone().unwrap_or_default(),
        }
    }

    /// Check required fields and build the draft to persist.
    /// The image is left unset; the editor attaches it.
    pub fn to_draft(&self) -> Result<EventDraft, FormError> {
        let title = self.title.trim();
        let description = self.description.trim();
        let date = self.date.trim();
        let location = self.location_name.trim();

        if title.is_empty() || description.is_empty() || date.is_empty() || location.is_empty() {
            return Err(FormError::MissingRequired);
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| FormError::InvalidDate)?;

        let display_time =
            DisplayTime::from_parts(&self.hour, &self.minute, &self.period).map(|t| t.format());

        let link = match self.link.trim() {
            "" => None,
            l => Some(l.to_string()),
        };

        Ok(EventDraft {
            title: title.to_string(),
            description: description.to_string(),
            date: Some(date),
            display_time,
            recurring: self.recurring,
            location: Location::Structured {
                name: location.to_string(),
                address: None,
            },
            image_url: None,
            link,
        })
    }
}
