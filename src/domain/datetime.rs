// src/domain/datetime.rs

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Human-readable date/time for the public event list.
///
/// - recurring: `"Recurring @ 6:30 PM"`, or `"Recurring Event"` without a time
/// - no date: `"Date TBD"`
/// - dated: `"November 10, 2025"`, with `" @ 5:00 PM"` appended when timed
///
/// Month names are chrono's fixed English names, so the output does not
/// depend on the host locale or timezone.
pub fn format_event_date(date: Option<NaiveDate>, display_time: Option<&str>, recurring: bool) -> String {
    if recurring {
        return match display_time {
            Some(time) => format!("Recurring @ {time}"),
            None => "Recurring Event".to_string(),
        };
    }

    let Some(date) = date else {
        return "Date TBD".to_string();
    };

    with_time(date.format("%B %-d, %Y").to_string(), display_time)
}

/// Short form used in the admin list: `"Mon, Nov 10, 2025 @ 5:00 PM"`.
pub fn format_compact(date: Option<NaiveDate>, display_time: Option<&str>, recurring: bool) -> String {
    if recurring {
        return format!("Recurring @ {}", display_time.unwrap_or("TBD"));
    }

    let Some(date) = date else {
        return "Date TBD".to_string();
    };

    with_time(date.format("%a, %b %-d, %Y").to_string(), display_time)
}

fn with_time(formatted: String, display_time: Option<&str>) -> String {
    match display_time {
        Some(time) => format!("{formatted} @ {time}"),
        None => formatted,
    }
}

/// A clock time split into the editor's hour / minute / period inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTime {
    pub hour: String,
    pub minute: String,
    /// Always `"AM"` or `"PM"`.
    pub period: String,
}

fn display_time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+):(\d+)\s*(AM|PM)").expect("display time pattern is valid")
    })
}

impl DisplayTime {
    /// Parse `H:MM AM|PM`. Anything else yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = display_time_pattern().captures(raw)?;
        Some(Self {
            hour: caps[1].to_string(),
            minute: caps[2].to_string(),
            period: caps[3].to_uppercase(),
        })
    }

    /// Build from form inputs. A blank hour means "no time given".
    pub fn from_parts(hour: &str, minute: &str, period: &str) -> Option<Self> {
        let hour = hour.trim();
        if hour.is_empty() {
            return None;
        }
        let minute = match minute.trim() {
            "" => "00",
            m => m,
        };
        let period = match period.trim().to_uppercase().as_str() {
            "AM" => "AM",
            _ => "PM",
        };
        Some(Self {
            hour: hour.to_string(),
            minute: minute.to_string(),
            period: period.to_string(),
        })
    }

    pub fn format(&self) -> String {
        format!("{}:{} {}", self.hour, self.minute, self.period)
    }
}
