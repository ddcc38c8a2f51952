//! Search and filter criteria for personal events.

use std::str::FromStr;

use crate::error::SocialCalError;
use crate::event::{EventCategory, EventType, PersonalEvent};

/// Which events to show by origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FeedFilter {
    #[default]
    All,
    /// Only events the user created or imported
    Personal,
    /// Only events linked from the named feed
    Source(String),
}

impl FromStr for FeedFilter {
    type Err = SocialCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" => FeedFilter::All,
            "personal" => FeedFilter::Personal,
            name => FeedFilter::Source(name.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Case-insensitive title substring; empty matches everything
    pub search: String,
    pub event_type: Option<EventType>,
    pub category: Option<EventCategory>,
    pub feed: FeedFilter,
}

impl EventFilter {
    pub fn matches(&self, event: &PersonalEvent) -> bool {
        let matches_search = self.search.is_empty()
            || event
                .title
                .to_lowercase()
                .contains(&self.search.to_lowercase());

        let matches_type = self.event_type.is_none_or(|t| t == event.event_type);
        let matches_category = self.category.is_none_or(|c| c == event.category);

        let matches_feed = match &self.feed {
            FeedFilter::All => true,
            FeedFilter::Personal => event.source.is_none(),
            FeedFilter::Source(name) => event.source.as_deref() == Some(name.as_str()),
        };

        matches_search && matches_type && matches_category && matches_feed
    }

    pub fn apply<'a>(&self, events: &'a [PersonalEvent]) -> Vec<&'a PersonalEvent> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDraft, EventId};
    use chrono::{TimeZone, Utc};

    fn event(title: &str, event_type: EventType, category: EventCategory, source: Option<&str>) -> PersonalEvent {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let mut e = EventDraft {
            event_type,
            category,
            ..EventDraft::new(title, start, start)
        }
        .into_event(EventId(1))
        .unwrap();
        e.source = source.map(str::to_string);
        e
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = EventFilter::default();
        assert!(filter.matches(&event("Anything", EventType::Post, EventCategory::Other, Some("X"))));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = EventFilter {
            search: "LIVER".into(),
            ..Default::default()
        };
        assert!(filter.matches(&event("Liverpool vs Everton", EventType::Post, EventCategory::Other, None)));
        assert!(!filter.matches(&event("Dentist", EventType::Post, EventCategory::Other, None)));
    }

    #[test]
    fn test_type_and_category() {
        let filter = EventFilter {
            event_type: Some(EventType::Meeting),
            category: Some(EventCategory::Work),
            ..Default::default()
        };
        assert!(filter.matches(&event("Sync", EventType::Meeting, EventCategory::Work, None)));
        assert!(!filter.matches(&event("Sync", EventType::Meeting, EventCategory::Family, None)));
        assert!(!filter.matches(&event("Sync", EventType::Study, EventCategory::Work, None)));
    }

    #[test]
    fn test_feed_filter() {
        let mine = event("Mine", EventType::Post, EventCategory::Personal, None);
        let linked = event("Match", EventType::Post, EventCategory::Other, Some("Liverpool FC"));

        let personal = EventFilter {
            feed: "personal".parse().unwrap(),
            ..Default::default()
        };
        assert!(personal.matches(&mine));
        assert!(!personal.matches(&linked));

        let liverpool = EventFilter {
            feed: "Liverpool FC".parse().unwrap(),
            ..Default::default()
        };
        assert!(!liverpool.matches(&mine));
        assert!(liverpool.matches(&linked));
        assert_eq!(liverpool.apply(&[mine, linked.clone()]), vec![&linked]);
    }
}
