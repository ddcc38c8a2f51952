//! Summary statistics over an event list.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::event::{EventCategory, PersonalEvent};

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarStats {
    pub next_event: Option<PersonalEvent>,
    pub by_category: Vec<(EventCategory, usize)>,
    pub most_active_category: Option<EventCategory>,
    /// Full weekday name, e.g. "Monday"
    pub busiest_day: Option<String>,
    pub followed_feeds: usize,
    pub total_events: usize,
}

impl CalendarStats {
    pub fn compute(events: &[PersonalEvent], followed_feeds: usize, now: DateTime<Utc>, tz: Tz) -> Self {
        let by_category = count_by_category(events);
        CalendarStats {
            next_event: next_event(events, now).cloned(),
            most_active_category: first_max(&by_category),
            by_category,
            busiest_day: busiest_day(events, tz),
            followed_feeds,
            total_events: events.len(),
        }
    }
}

/// The earliest event starting strictly after `now`.
pub fn next_event(events: &[PersonalEvent], now: DateTime<Utc>) -> Option<&PersonalEvent> {
    events
        .iter()
        .filter(|e| e.start > now)
        .min_by_key(|e| e.start)
}

/// Counts per category, in order of first appearance.
pub fn count_by_category(events: &[PersonalEvent]) -> Vec<(EventCategory, usize)> {
    tally(events.iter().map(|e| e.category))
}

pub fn most_active_category(events: &[PersonalEvent]) -> Option<EventCategory> {
    first_max(&count_by_category(events))
}

/// Weekday with the most event starts, in `tz`.
pub fn busiest_day(events: &[PersonalEvent], tz: Tz) -> Option<String> {
    let days = tally(
        events
            .iter()
            .map(|e| e.start.with_timezone(&tz).format("%A").to_string()),
    );
    first_max(&days)
}

fn tally<K: PartialEq>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

/// Key with the highest count; ties go to the key seen first.
fn first_max<K: Clone>(counts: &[(K, usize)]) -> Option<K> {
    let mut best: Option<&(K, usize)> = None;
    for entry in counts {
        if best.is_none_or(|b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.map(|(k, _)| k.clone())
}
