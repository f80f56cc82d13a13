// src/domain/selector.rs

use crate::domain::event::EventRecord;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Keeps the events that are still upcoming on `as_of` and orders them for display.
///
/// A record is kept when it is recurring, has no date, or its date is on or
/// after `as_of`. Recurring events come first in input order; dated events
/// follow in ascending date order. A pair where either side has no date
/// compares equal, so undated events keep their relative input position.
pub fn select_upcoming(records: Vec<EventRecord>, as_of: NaiveDate) -> Vec<EventRecord> {
    let mut upcoming: Vec<EventRecord> = records
        .into_iter()
        .filter(|event| is_upcoming(event, as_of))
        .collect();

    // `sort_by` is stable.
    upcoming.sort_by(compare_for_display);
    upcoming
}

fn is_upcoming(event: &EventRecord, as_of: NaiveDate) -> bool {
    if event.recurring {
        return true;
    }
    match event.date {
        Some(date) => date >= as_of,
        None => true,
    }
}

fn compare_for_display(a: &EventRecord, b: &EventRecord) -> Ordering {
    match (a.recurring, b.recurring) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    if a.recurring {
        return Ordering::Equal;
    }

    match (a.date, b.date) {
        (Some(da), Some(db)) => da.cmp(&db),
        _ => Ordering::Equal,
    }
}
