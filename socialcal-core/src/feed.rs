//! Public feeds: read-only sample events the user can follow.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::event::{EventId, EventType, PublicEvent};
use crate::ordering::sort_by_date;
use crate::timestamp::local_ymd_hm;

pub const LIVERPOOL_FC: &str = "Liverpool FC";
pub const TECH_EVENTS: &str = "TechEvents";
pub const GLOBAL_DAYS: &str = "GlobalDays";

const LIVERPOOL_FIXTURES: &str = "https://www.liverpoolfc.com/match/2024-25/men/fixtures-results";

/// A feed the user can follow or unfollow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowedCalendar {
    pub id: u64,
    pub name: String,
    pub followed: bool,
}

#[derive(Debug, Clone)]
pub struct Feeds {
    calendars: Vec<FollowedCalendar>,
    events: Vec<PublicEvent>,
}

impl Feeds {
    pub fn new(calendars: Vec<FollowedCalendar>, events: Vec<PublicEvent>) -> Self {
        Feeds { calendars, events }
    }

    /// The built-in feeds, all followed, with their sample events.
    pub fn sample(tz: Tz) -> Self {
        let calendars = [LIVERPOOL_FC, TECH_EVENTS, GLOBAL_DAYS]
            .iter()
            .enumerate()
            .map(|(i, name)| FollowedCalendar {
                id: i as u64 + 1,
                name: name.to_string(),
                followed: true,
            })
            .collect();

        let events = sample_public_events(tz).unwrap_or_else(|| {
            tracing::warn!(tz = tz.name(), "could not place sample feed events");
            Vec::new()
        });

        Feeds::new(calendars, events)
    }

    pub fn calendars(&self) -> &[FollowedCalendar] {
        &self.calendars
    }

    pub fn events(&self) -> &[PublicEvent] {
        &self.events
    }

    pub fn get_event(&self, id: EventId) -> Option<&PublicEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn find_calendar(&self, name: &str) -> Option<&FollowedCalendar> {
        self.calendars.iter().find(|c| c.name == name)
    }

    /// Flip the follow state of a feed. Returns the new state, or `None` for
    /// an unknown id.
    pub fn toggle(&mut self, id: u64) -> Option<bool> {
        let calendar = self.calendars.iter_mut().find(|c| c.id == id)?;
        calendar.followed = !calendar.followed;
        Some(calendar.followed)
    }

    pub fn set_followed(&mut self, name: &str, followed: bool) -> bool {
        match self.calendars.iter_mut().find(|c| c.name == name) {
            Some(calendar) => {
                calendar.followed = followed;
                true
            }
            None => false,
        }
    }

    pub fn followed_sources(&self) -> Vec<&str> {
        self.calendars
            .iter()
            .filter(|c| c.followed)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn is_followed(&self, source: &str) -> bool {
        self.calendars.iter().any(|c| c.followed && c.name == source)
    }

    /// Events grouped by source, groups in order of first appearance.
    pub fn grouped_by_source(&self) -> Vec<(&str, Vec<&PublicEvent>)> {
        let mut groups: Vec<(&str, Vec<&PublicEvent>)> = Vec::new();
        for event in &self.events {
            match groups.iter_mut().find(|(source, _)| *source == event.source) {
                Some((_, list)) => list.push(event),
                None => groups.push((event.source.as_str(), vec![event])),
            }
        }
        groups
    }

    /// Events of followed feeds, in timeline order.
    pub fn visible_events(&self, now: DateTime<Utc>) -> Vec<PublicEvent> {
        let mut visible: Vec<PublicEvent> = self
            .events
            .iter()
            .filter(|e| self.is_followed(&e.source))
            .cloned()
            .collect();
        sort_by_date(&mut visible, now);
        visible
    }
}

fn sample_public_events(tz: Tz) -> Option<Vec<PublicEvent>> {
    let at = |y, m, d, h, min| local_ymd_hm(tz, y, m, d, h, min);

    Some(vec![
        PublicEvent {
            id: EventId(1),
            title: "Tech Conference".into(),
            date: at(2024, 10, 15, 9, 0)?,
            source: TECH_EVENTS.into(),
            event_type: EventType::Post,
            location: Some("San Francisco, CA".into()),
            web_link: Some("https://techconference.com".into()),
            date_added: at(2024, 9, 1, 0, 0)?,
        },
        PublicEvent {
            id: EventId(2),
            title: "Social Media Day".into(),
            date: at(2024, 10, 16, 10, 30)?,
            source: GLOBAL_DAYS.into(),
            event_type: EventType::Post,
            location: None,
            web_link: None,
            date_added: at(2024, 9, 5, 0, 0)?,
        },
        PublicEvent {
            id: EventId(3),
            title: "Liverpool vs Manchester United".into(),
            date: at(2024, 10, 20, 15, 0)?,
            source: LIVERPOOL_FC.into(),
            event_type: EventType::Post,
            location: Some("Anfield, Liverpool".into()),
            web_link: Some(LIVERPOOL_FIXTURES.into()),
            date_added: at(2024, 9, 10, 0, 0)?,
        },
        PublicEvent {
            id: EventId(4),
            title: "Liverpool vs Everton".into(),
            date: at(2024, 11, 5, 15, 0)?,
            source: LIVERPOOL_FC.into(),
            event_type: EventType::Post,
            location: Some("Anfield, Liverpool".into()),
            web_link: Some(LIVERPOOL_FIXTURES.into()),
            date_added: at(2024, 9, 15, 0, 0)?,
        },
        PublicEvent {
            id: EventId(5),
            title: "Arsenal vs Liverpool".into(),
            date: at(2024, 11, 12, 17, 30)?,
            source: LIVERPOOL_FC.into(),
            event_type: EventType::Post,
            location: Some("Emirates Stadium, London".into()),
            web_link: Some(LIVERPOOL_FIXTURES.into()),
            date_added: at(2024, 9, 20, 0, 0)?,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_sample_feeds() {
        let feeds = Feeds::sample(Tz::UTC);
        assert_eq!(feeds.calendars().len(), 3);
        assert_eq!(feeds.events().len(), 5);
        assert_eq!(
            feeds.get_event(EventId(1)).unwrap().date,
            Utc.with_ymd_and_hms(2024, 10, 15, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_grouped_by_source_keeps_first_seen_order() {
        let feeds = Feeds::sample(Tz::UTC);
        let groups = feeds.grouped_by_source();

        let names: Vec<&str> = groups.iter().map(|(s, _)| *s).collect();
        assert_eq!(names, vec![TECH_EVENTS, GLOBAL_DAYS, LIVERPOOL_FC]);
        assert_eq!(groups[2].1.len(), 3);
    }

    #[test]
    fn test_unfollowed_feed_is_hidden() {
        let mut feeds = Feeds::sample(Tz::UTC);
        assert_eq!(feeds.toggle(1), Some(false));
        assert_eq!(feeds.toggle(42), None);

        let visible = feeds.visible_events(now());
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|e| e.source != LIVERPOOL_FC));
        assert_eq!(feeds.followed_sources(), vec![TECH_EVENTS, GLOBAL_DAYS]);
    }

    #[test]
    fn test_visible_events_are_in_timeline_order() {
        let feeds = Feeds::sample(Tz::UTC);
        let titles: Vec<String> = feeds
            .visible_events(now())
            .into_iter()
            .map(|e| e.title)
            .collect();

        assert_eq!(
            titles,
            vec![
                "Arsenal vs Liverpool",
                "Liverpool vs Everton",
                "Liverpool vs Manchester United",
                "Social Media Day",
                "Tech Conference",
            ]
        );
    }

    #[test]
    fn test_sample_dates_resolve_in_any_zone() {
        for name in ["Pacific/Auckland", "America/Santiago", "Asia/Tehran", "Europe/London"] {
            let tz: Tz = name.parse().unwrap();
            let feeds = Feeds::sample(tz);

            assert_eq!(feeds.events().len(), 5, "{name}");
            for event in feeds.events() {
                assert_eq!(event.date.with_timezone(&tz).year(), 2024, "{name}");
                assert_eq!(event.date_added.with_timezone(&tz).year(), 2024, "{name}");
            }
        }
    }

    #[test]
    fn test_set_followed_by_name() {
        let mut feeds = Feeds::sample(Tz::UTC);
        assert!(feeds.set_followed(GLOBAL_DAYS, false));
        assert!(!feeds.set_followed("Nope", false));
        assert!(!feeds.is_followed(GLOBAL_DAYS));
        assert!(feeds.find_calendar(GLOBAL_DAYS).is_some());
    }
}
