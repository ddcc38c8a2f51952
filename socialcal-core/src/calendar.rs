//! Personal calendars: named, coloured buckets for personal events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SocialCalError, SocialCalResult};
use crate::event::{EventCategory, PersonalEvent};

/// Colour used for events linked from a public feed.
pub const FEED_COLOR: &str = "#C8102E";

/// Colour used for events that belong to no calendar.
pub const DEFAULT_COLOR: &str = "#3174ad";

/// Colours handed out to new calendars, in order.
const PALETTE: &[&str] = &[
    "#2196F3", "#4CAF50", "#FF9800", "#9C27B0", "#009688", "#E91E63", "#795548", "#607D8B",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarId(pub u64);

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalCalendar {
    pub id: CalendarId,
    pub name: String,
    pub color: String,
}

impl fmt::Display for PersonalCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The user's personal calendars. Names are not required to be unique.
#[derive(Debug, Clone, Default)]
pub struct PersonalCalendars {
    calendars: Vec<PersonalCalendar>,
}

impl PersonalCalendars {
    pub fn new(calendars: Vec<PersonalCalendar>) -> Self {
        PersonalCalendars { calendars }
    }

    /// Work, Personal and Family.
    pub fn defaults() -> Self {
        Self::from_seeds([
            ("Work", "#2196F3"),
            ("Personal", "#4CAF50"),
            ("Family", "#FF9800"),
        ])
    }

    /// Build calendars from (name, color) pairs, numbering ids from 1.
    pub fn from_seeds<N, C>(seeds: impl IntoIterator<Item = (N, C)>) -> Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        let calendars = seeds
            .into_iter()
            .enumerate()
            .map(|(i, (name, color))| PersonalCalendar {
                id: CalendarId(i as u64 + 1),
                name: name.into(),
                color: color.into(),
            })
            .collect();
        PersonalCalendars { calendars }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonalCalendar> {
        self.calendars.iter()
    }

    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }

    pub fn get(&self, id: CalendarId) -> Option<&PersonalCalendar> {
        self.calendars.iter().find(|c| c.id == id)
    }

    pub fn add(&mut self, name: &str) -> SocialCalResult<CalendarId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SocialCalError::InvalidEvent(
                "calendar name is required".into(),
            ));
        }

        let id = CalendarId(self.calendars.iter().map(|c| c.id.0).max().unwrap_or(0) + 1);
        let color = PALETTE[self.calendars.len() % PALETTE.len()];

        self.calendars.push(PersonalCalendar {
            id,
            name: name.to_string(),
            color: color.to_string(),
        });
        Ok(id)
    }

    /// Replace the calendar with the same id.
    pub fn update(&mut self, calendar: PersonalCalendar) -> SocialCalResult<()> {
        let slot = self
            .calendars
            .iter_mut()
            .find(|c| c.id == calendar.id)
            .ok_or(SocialCalError::CalendarNotFound(calendar.id))?;
        *slot = calendar;
        Ok(())
    }

    pub fn delete(&mut self, id: CalendarId) -> bool {
        let before = self.calendars.len();
        self.calendars.retain(|c| c.id != id);
        self.calendars.len() != before
    }

    /// The calendar a new event of this category is filed under, matched by
    /// name. Only used when the event is created; afterwards the event keeps
    /// the id.
    pub fn for_category(&self, category: EventCategory) -> Option<CalendarId> {
        self.calendars
            .iter()
            .find(|c| c.name.to_lowercase() == category.as_str())
            .map(|c| c.id)
    }

    pub fn color_of(&self, event: &PersonalEvent) -> &str {
        if event.is_linked() {
            return FEED_COLOR;
        }

        event
            .calendar
            .and_then(|id| self.get(id))
            .map(|c| c.color.as_str())
            .unwrap_or(DEFAULT_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDraft, EventId};
    use chrono::{TimeZone, Utc};

    fn event_in(calendar: Option<CalendarId>) -> PersonalEvent {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let mut draft = EventDraft::new("Review", start, start);
        draft.calendar = calendar;
        draft.into_event(EventId(1)).unwrap()
    }

    #[test]
    fn test_defaults_map_categories() {
        let calendars = PersonalCalendars::defaults();
        assert_eq!(calendars.for_category(EventCategory::Work), Some(CalendarId(1)));
        assert_eq!(calendars.for_category(EventCategory::Family), Some(CalendarId(3)));
        assert_eq!(calendars.for_category(EventCategory::Other), None);
    }

    #[test]
    fn test_rename_keeps_event_color() {
        let mut calendars = PersonalCalendars::defaults();
        let work = calendars.for_category(EventCategory::Work);
        let event = event_in(work);

        let mut renamed = calendars.get(CalendarId(1)).unwrap().clone();
        renamed.name = "Office".to_string();
        calendars.update(renamed).unwrap();

        assert_eq!(calendars.color_of(&event), "#2196F3");
        assert_eq!(calendars.for_category(EventCategory::Work), None);
    }

    #[test]
    fn test_color_fallbacks() {
        let calendars = PersonalCalendars::defaults();

        assert_eq!(calendars.color_of(&event_in(None)), DEFAULT_COLOR);

        let mut linked = event_in(Some(CalendarId(1)));
        linked.source = Some("TechEvents".into());
        assert_eq!(calendars.color_of(&linked), FEED_COLOR);
    }

    #[test]
    fn test_add_and_delete() {
        let mut calendars = PersonalCalendars::defaults();
        let id = calendars.add("Gym").unwrap();

        assert_eq!(id, CalendarId(4));
        assert_eq!(calendars.get(id).unwrap().color, PALETTE[3]);
        assert!(calendars.add("  ").is_err());

        assert!(calendars.delete(id));
        assert!(!calendars.delete(id));
        assert_eq!(calendars.len(), 3);
    }

    #[test]
    fn test_update_unknown_calendar() {
        let mut calendars = PersonalCalendars::defaults();
        let ghost = PersonalCalendar {
            id: CalendarId(99),
            name: "Ghost".into(),
            color: "#000000".into(),
        };
        assert!(matches!(
            calendars.update(ghost),
            Err(SocialCalError::CalendarNotFound(CalendarId(99)))
        ));
    }
}
