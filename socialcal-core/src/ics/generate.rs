//! ICS export of the current event list.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};
use serde::{Deserialize, Serialize};

use crate::error::{SocialCalError, SocialCalResult};
use crate::event::PersonalEvent;

const PRODID: &str = "-//socialcal//EN";

/// Identity written as ORGANIZER on every exported event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organizer {
    pub name: String,
    pub email: String,
}

impl Default for Organizer {
    fn default() -> Self {
        Organizer {
            name: "Your Name".to_string(),
            email: "your@email.com".to_string(),
        }
    }
}

/// Calendar fields of a timestamp, as shown in `tz`. Seconds are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    /// 1-indexed
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl DateParts {
    pub fn from_utc(dt: DateTime<Utc>, tz: Tz) -> Self {
        let local = dt.with_timezone(&tz);
        DateParts {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
        }
    }

    /// Floating DATE-TIME value, e.g. `20240101T100000`.
    fn to_ics_string(self) -> SocialCalResult<String> {
        if !(0..=9999).contains(&self.year) {
            return Err(SocialCalError::IcsGenerate(format!(
                "year {} cannot be written as an iCalendar date",
                self.year
            )));
        }
        Ok(format!(
            "{:04}{:02}{:02}T{:02}{:02}00",
            self.year, self.month, self.day, self.hour, self.minute
        ))
    }
}

/// Generate a VCALENDAR with one VEVENT per event.
///
/// Times are written as floating local times in `tz`. Status is always
/// CONFIRMED and busy status always BUSY.
pub fn generate_ics(events: &[PersonalEvent], organizer: &Organizer, tz: Tz) -> SocialCalResult<String> {
    let mut cal = Calendar::new();
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for (index, event) in events.iter().enumerate() {
        let start = DateParts::from_utc(event.start, tz).to_ics_string()?;
        let end = DateParts::from_utc(event.end, tz).to_ics_string()?;

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}-{}@socialcal", event.id, index));
        ics_event.add_property("DTSTAMP", &dtstamp);
        ics_event.summary(&event.title);
        ics_event.add_property("DTSTART", start);
        ics_event.add_property("DTEND", end);

        if let Some(desc) = event.description.as_deref().filter(|d| !d.is_empty()) {
            ics_event.description(desc);
        }

        if let Some(loc) = event.location.as_deref().filter(|l| !l.is_empty()) {
            ics_event.location(loc);
        }

        if let Some(url) = event.web_link.as_deref().filter(|u| !u.is_empty()) {
            ics_event.add_property("URL", url);
        }

        ics_event.add_property("CATEGORIES", event.category.as_str());
        ics_event.add_property("STATUS", "CONFIRMED");
        ics_event.add_property("X-MICROSOFT-CDO-BUSYSTATUS", "BUSY");

        let mut org = Property::new("ORGANIZER", format!("mailto:{}", organizer.email));
        org.add_parameter("CN", &organizer.name);
        ics_event.append_property(org);

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    let output = strip_ics_bloat(&cal.to_string());

    tracing::debug!(events = events.len(), "generated ics");
    Ok(output)
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventCategory, EventDraft, EventId};
    use chrono::TimeZone;

    fn make_test_event() -> PersonalEvent {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let mut draft = EventDraft::new("Meeting", start, start + chrono::Duration::hours(1));
        draft.category = EventCategory::Work;
        draft.into_event(EventId(42)).unwrap()
    }

    #[test]
    fn test_empty_list_is_valid_calendar() {
        let ics = generate_ics(&[], &Organizer::default(), Tz::UTC).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));
        assert!(ics.contains("PRODID:-//socialcal//EN"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn test_fixed_fields() {
        let ics = generate_ics(&[make_test_event()], &Organizer::default(), Tz::UTC).unwrap();

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(ics.contains("SUMMARY:Meeting"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTART:20240101T100000"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20240101T110000"), "ICS:\n{}", ics);
        assert!(ics.contains("STATUS:CONFIRMED"));
        assert!(ics.contains("X-MICROSOFT-CDO-BUSYSTATUS:BUSY"));
        assert!(ics.contains("CATEGORIES:work"));
        assert!(ics.contains("UID:42-0@socialcal"));
        assert!(!ics.contains("LOCATION"), "empty location should be omitted");
    }

    #[test]
    fn test_organizer_is_placeholder_with_cn_parameter() {
        let ics = generate_ics(&[make_test_event()], &Organizer::default(), Tz::UTC).unwrap();

        let organizer_line = ics
            .lines()
            .find(|l| l.starts_with("ORGANIZER"))
            .expect("Should have ORGANIZER line");
        assert!(organizer_line.contains(";CN="), "Got: {}", organizer_line);
        assert!(organizer_line.contains("Your Name"), "Got: {}", organizer_line);
        assert!(organizer_line.contains("mailto:your@email.com"), "Got: {}", organizer_line);
    }

    #[test]
    fn test_times_are_local_components() {
        let tz: Tz = "Asia/Tokyo".parse().unwrap();
        let ics = generate_ics(&[make_test_event()], &Organizer::default(), tz).unwrap();

        assert!(ics.contains("DTSTART:20240101T190000"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_optional_fields_and_unique_uids() {
        let mut event = make_test_event();
        event.location = Some("Anfield".into());
        event.web_link = Some("https://example.com".into());
        event.description = Some("Bring slides".into());

        let ics = generate_ics(&[event.clone(), event], &Organizer::default(), Tz::UTC).unwrap();

        assert!(ics.contains("LOCATION:Anfield"));
        assert!(ics.contains("URL:https://example.com"));
        assert!(ics.contains("DESCRIPTION:Bring slides"));
        assert!(ics.contains("UID:42-0@socialcal"));
        assert!(ics.contains("UID:42-1@socialcal"));
    }

    #[test]
    fn test_date_parts_are_one_indexed() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 30).unwrap();
        assert_eq!(
            DateParts::from_utc(dt, Tz::UTC),
            DateParts { year: 2024, month: 12, day: 31, hour: 23, minute: 59 }
        );
    }

    #[test]
    fn test_out_of_range_year_is_an_error() {
        let mut event = make_test_event();
        event.end = Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap();

        let err = generate_ics(&[event], &Organizer::default(), Tz::UTC).unwrap_err();
        assert!(matches!(err, SocialCalError::IcsGenerate(_)));
    }
}
