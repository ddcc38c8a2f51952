//! Event types.
//!
//! Personal events are owned and edited by the user. Public events are
//! read-only sample data grouped into feeds; linking one copies it into a
//! personal event tagged with its source.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarId;
use crate::error::{SocialCalError, SocialCalResult};

/// Numeric event identity, assigned from a millisecond clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl EventId {
    /// Id of the `index`-th occurrence expanded from this event.
    pub fn offset(self, index: usize) -> EventId {
        EventId(self.0 + index as i64)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = SocialCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(EventId)
            .map_err(|_| SocialCalError::UnknownValue {
                kind: "event id",
                value: s.to_string(),
            })
    }
}

/// Allocates event ids from the wall clock.
///
/// Ids never repeat within one generator: when two ids are requested in the
/// same millisecond the second one is bumped past the first.
#[derive(Debug, Default, Clone)]
pub struct EventIdGen {
    last: Option<i64>,
}

impl EventIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> EventId {
        self.next_at(Utc::now())
    }

    pub fn next_at(&mut self, now: DateTime<Utc>) -> EventId {
        let millis = now.timestamp_millis();
        let id = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(id);
        EventId(id)
    }
}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, default = $default:ident,
        { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = SocialCalError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(SocialCalError::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

closed_enum!(
    /// What kind of occasion an event is.
    EventType, "event type", default = Post,
    {
        Post => "post",
        Birthday => "birthday",
        Anniversary => "anniversary",
        EatOut => "eatout",
        Meeting => "meeting",
        WorldDates => "worlddates",
        Holiday => "holiday",
        Study => "study",
        Hobby => "hobby",
        Payment => "payment",
    }
);

closed_enum!(
    /// Which part of life an event belongs to.
    EventCategory, "event category", default = Personal,
    {
        Personal => "personal",
        Family => "family",
        Work => "work",
        Other => "other",
    }
);

impl EventCategory {
    /// Events in private categories are never shared.
    pub fn is_private(&self) -> bool {
        matches!(
            self,
            EventCategory::Personal | EventCategory::Family | EventCategory::Work
        )
    }
}

/// Anything that can be placed on the timeline by a single date.
pub trait Dated {
    fn date(&self) -> DateTime<Utc>;
}

/// A user-owned calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalEvent {
    pub id: EventId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub category: EventCategory,
    pub location: Option<String>,
    pub web_link: Option<String>,
    pub description: Option<String>,
    /// RRULE text, e.g. `FREQ=WEEKLY;BYDAY=MO`
    pub recurrence: Option<String>,
    /// Feed name when this event was linked from a public event
    pub source: Option<String>,
    pub calendar: Option<CalendarId>,
    /// Base event id when this is an expanded recurrence instance
    pub occurrence_of: Option<EventId>,
}

impl PersonalEvent {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.as_deref().is_some_and(|r| !r.trim().is_empty())
    }

    pub fn is_linked(&self) -> bool {
        self.source.is_some()
    }
}

impl Dated for PersonalEvent {
    fn date(&self) -> DateTime<Utc> {
        self.start
    }
}

impl fmt::Display for PersonalEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// A read-only event published by a feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicEvent {
    pub id: EventId,
    pub title: String,
    pub date: DateTime<Utc>,
    pub source: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub location: Option<String>,
    pub web_link: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl PublicEvent {
    /// Relative age of the listing, e.g. "3 days ago".
    pub fn added_ago(&self, now: DateTime<Utc>) -> String {
        relative_to_now(now - self.date_added)
    }
}

impl Dated for PublicEvent {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

/// A personal or public event, for views that mix both.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarEntry {
    Personal(PersonalEvent),
    Public(PublicEvent),
}

impl CalendarEntry {
    pub fn title(&self) -> &str {
        match self {
            CalendarEntry::Personal(e) => &e.title,
            CalendarEntry::Public(e) => &e.title,
        }
    }
}

impl Dated for CalendarEntry {
    fn date(&self) -> DateTime<Utc> {
        match self {
            CalendarEntry::Personal(e) => e.date(),
            CalendarEntry::Public(e) => e.date(),
        }
    }
}

/// A partially filled event, as collected from a form or an import row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub event_type: EventType,
    pub category: EventCategory,
    pub location: Option<String>,
    pub web_link: Option<String>,
    pub description: Option<String>,
    pub recurrence: Option<String>,
    pub calendar: Option<CalendarId>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        EventDraft {
            title: title.into(),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    /// Turn the draft into an event, rejecting it when the title is blank or
    /// a timestamp is missing.
    pub fn into_event(self, id: EventId) -> SocialCalResult<PersonalEvent> {
        if self.title.trim().is_empty() {
            return Err(SocialCalError::InvalidEvent("title is required".into()));
        }
        let start = self
            .start
            .ok_or_else(|| SocialCalError::InvalidEvent("start is required".into()))?;
        let end = self
            .end
            .ok_or_else(|| SocialCalError::InvalidEvent("end is required".into()))?;

        Ok(PersonalEvent {
            id,
            title: self.title,
            start,
            end,
            event_type: self.event_type,
            category: self.category,
            location: self.location,
            web_link: self.web_link,
            description: self.description,
            recurrence: self.recurrence.filter(|r| !r.trim().is_empty()),
            source: None,
            calendar: self.calendar,
            occurrence_of: None,
        })
    }
}

/// Coarse "time ago" wording, rounded to the largest sensible unit.
fn relative_to_now(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    let minutes = (secs as f64 / 60.0).round() as i64;
    let hours = (secs as f64 / 3600.0).round() as i64;
    let days = (secs as f64 / 86_400.0).round() as i64;

    match secs {
        s if s < 45 => "a few seconds ago".to_string(),
        s if s < 90 => "a minute ago".to_string(),
        _ if minutes < 45 => format!("{minutes} minutes ago"),
        _ if minutes < 90 => "an hour ago".to_string(),
        _ if hours < 22 => format!("{hours} hours ago"),
        _ if hours < 36 => "a day ago".to_string(),
        _ if days < 26 => format!("{days} days ago"),
        _ if days < 45 => "a month ago".to_string(),
        _ if days < 320 => format!("{} months ago", ((days as f64) / 30.4).round().max(2.0) as i64),
        _ if days < 548 => "a year ago".to_string(),
        _ => format!("{} years ago", ((days as f64) / 365.0).round() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_id_gen_is_monotonic_within_same_millisecond() {
        let mut ids = EventIdGen::new();
        let now = at(2026, 10, 15, 12);

        let a = ids.next_at(now);
        let b = ids.next_at(now);
        let c = ids.next_at(now - Duration::seconds(5));

        assert_eq!(a.0, now.timestamp_millis());
        assert_eq!(b.0, a.0 + 1);
        assert_eq!(c.0, b.0 + 1);
    }

    #[test]
    fn test_event_type_parse_is_case_insensitive() {
        assert_eq!("Meeting".parse::<EventType>().unwrap(), EventType::Meeting);
        assert_eq!(" eatout ".parse::<EventType>().unwrap(), EventType::EatOut);
        assert!("party".parse::<EventType>().is_err());
        assert_eq!(EventType::ALL.len(), 10);
    }

    #[test]
    fn test_category_defaults_and_privacy() {
        assert_eq!(EventCategory::default(), EventCategory::Personal);
        assert!(EventCategory::Work.is_private());
        assert!(!EventCategory::Other.is_private());
    }

    #[test]
    fn test_draft_requires_title() {
        let draft = EventDraft::new("   ", at(2026, 1, 1, 9), at(2026, 1, 1, 10));
        assert!(matches!(
            draft.into_event(EventId(1)),
            Err(SocialCalError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_draft_requires_end() {
        let mut draft = EventDraft::new("Standup", at(2026, 1, 1, 9), at(2026, 1, 1, 10));
        draft.end = None;
        assert!(draft.into_event(EventId(1)).is_err());
    }

    #[test]
    fn test_draft_drops_blank_recurrence() {
        let mut draft = EventDraft::new("Standup", at(2026, 1, 1, 9), at(2026, 1, 1, 10));
        draft.recurrence = Some("  ".into());
        let event = draft.into_event(EventId(7)).unwrap();
        assert!(!event.is_recurring());
        assert_eq!(event.duration(), Duration::hours(1));
    }

    #[test]
    fn test_added_ago_wording() {
        let ago = relative_to_now;

        assert_eq!(ago(Duration::seconds(10)), "a few seconds ago");
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::hours(3)), "3 hours ago");
        assert_eq!(ago(Duration::hours(30)), "a day ago");
        assert_eq!(ago(Duration::days(10)), "10 days ago");
        assert_eq!(ago(Duration::days(40)), "a month ago");
        assert_eq!(ago(Duration::days(400)), "a year ago");
        assert_eq!(ago(Duration::days(800)), "2 years ago");
    }
}
