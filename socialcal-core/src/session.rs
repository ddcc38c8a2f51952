//! In-memory calendar state: personal events, calendars, feeds and the
//! active filter.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::calendar::{CalendarId, PersonalCalendar, PersonalCalendars};
use crate::config::AppConfig;
use crate::csv_import::{parse_csv, read_csv_file};
use crate::error::{SocialCalError, SocialCalResult};
use crate::event::{
    CalendarEntry, EventCategory, EventDraft, EventId, EventIdGen, PersonalEvent, PublicEvent,
};
use crate::feed::Feeds;
use crate::filter::{EventFilter, FeedFilter};
use crate::ics::{Organizer, generate_ics};
use crate::ordering::sort_by_date;
use crate::recurrence::expand_recurring_events;
use crate::stats::CalendarStats;

#[derive(Debug, Clone)]
pub struct CalendarSession {
    events: Vec<PersonalEvent>,
    calendars: PersonalCalendars,
    feeds: Feeds,
    pub filter: EventFilter,
    ids: EventIdGen,
    tz: Tz,
    organizer: Organizer,
}

impl CalendarSession {
    pub fn new(calendars: PersonalCalendars, feeds: Feeds, tz: Tz) -> Self {
        CalendarSession {
            events: Vec::new(),
            calendars,
            feeds,
            filter: EventFilter::default(),
            ids: EventIdGen::new(),
            tz,
            organizer: Organizer::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> SocialCalResult<Self> {
        let tz = config.tz()?;
        let mut session = CalendarSession::new(config.personal_calendars(), config.feeds(tz)?, tz);
        session.organizer = config.organizer.clone();
        Ok(session)
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn events(&self) -> &[PersonalEvent] {
        &self.events
    }

    pub fn get_event(&self, id: EventId) -> Option<&PersonalEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn calendars(&self) -> &PersonalCalendars {
        &self.calendars
    }

    pub fn feeds(&self) -> &Feeds {
        &self.feeds
    }

    // ---- personal events ----

    /// Validate a draft and append it. A draft without a calendar is filed
    /// under the calendar named after its category.
    pub fn add_event(&mut self, draft: EventDraft) -> SocialCalResult<EventId> {
        let calendar = draft
            .calendar
            .or_else(|| self.calendars.for_category(draft.category));
        let event = EventDraft { calendar, ..draft }.into_event(self.ids.next_id())?;
        let id = event.id;

        tracing::debug!(%id, title = %event.title, "added event");
        self.events.push(event);
        Ok(id)
    }

    pub fn update_event(&mut self, event: PersonalEvent) -> SocialCalResult<()> {
        if event.title.trim().is_empty() {
            return Err(SocialCalError::InvalidEvent("title is required".into()));
        }
        let slot = self
            .events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or(SocialCalError::EventNotFound(event.id))?;
        *slot = event;
        Ok(())
    }

    /// Update the event if its id is known, otherwise add it under a new id.
    pub fn save_event(&mut self, event: PersonalEvent) -> SocialCalResult<EventId> {
        if self.get_event(event.id).is_some() {
            let id = event.id;
            self.update_event(event)?;
            return Ok(id);
        }

        let draft = EventDraft {
            title: event.title,
            start: Some(event.start),
            end: Some(event.end),
            event_type: event.event_type,
            category: event.category,
            location: event.location,
            web_link: event.web_link,
            description: event.description,
            recurrence: event.recurrence,
            calendar: event.calendar,
        };
        self.add_event(draft)
    }

    pub fn delete_event(&mut self, id: EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }

    /// Copy a public event into the personal list. Returns `None` when an
    /// event with the same title, start and source is already there.
    pub fn link_public_event(&mut self, public: &PublicEvent) -> Option<EventId> {
        let already_linked = self.events.iter().any(|e| {
            e.title == public.title
                && e.start == public.date
                && e.source.as_deref() == Some(public.source.as_str())
        });
        if already_linked {
            tracing::debug!(title = %public.title, "public event already linked");
            return None;
        }

        let id = self.ids.next_id();
        self.events.push(PersonalEvent {
            id,
            title: public.title.clone(),
            start: public.date,
            end: public.date + Duration::hours(1),
            event_type: public.event_type,
            category: EventCategory::Other,
            location: public.location.clone(),
            web_link: public.web_link.clone(),
            description: None,
            recurrence: None,
            source: Some(public.source.clone()),
            calendar: None,
            occurrence_of: None,
        });
        Some(id)
    }

    /// Link the public event with `id` from the feeds.
    pub fn link_feed_event(&mut self, id: EventId) -> SocialCalResult<Option<EventId>> {
        let public = self
            .feeds
            .get_event(id)
            .cloned()
            .ok_or(SocialCalError::EventNotFound(id))?;
        Ok(self.link_public_event(&public))
    }

    // ---- import ----

    pub fn import_csv(&mut self, content: &str) -> usize {
        let drafts = parse_csv(content, self.tz);
        self.append_drafts(drafts)
    }

    /// Read a CSV file and append its events. Returns how many were added.
    pub async fn import_csv_file(&mut self, path: &Path) -> SocialCalResult<usize> {
        let drafts = read_csv_file(path, self.tz).await?;
        let imported = self.append_drafts(drafts);

        tracing::info!(path = %path.display(), imported, "imported csv");
        Ok(imported)
    }

    fn append_drafts(&mut self, drafts: Vec<EventDraft>) -> usize {
        let mut imported = 0;
        for draft in drafts {
            match self.add_event(draft) {
                Ok(_) => imported += 1,
                Err(e) => tracing::debug!("skipping csv row: {e}"),
            }
        }
        imported
    }

    // ---- feeds ----

    /// Flip a feed's follow state. Unfollowing drops the events linked from
    /// that feed and clears a feed filter pointing at it.
    pub fn toggle_follow(&mut self, feed_id: u64) -> Option<bool> {
        let followed = self.feeds.toggle(feed_id)?;
        self.prune_unfollowed();
        Some(followed)
    }

    pub fn set_followed(&mut self, name: &str, followed: bool) -> bool {
        if !self.feeds.set_followed(name, followed) {
            return false;
        }
        self.prune_unfollowed();
        true
    }

    fn prune_unfollowed(&mut self) {
        let feeds = &self.feeds;
        let before = self.events.len();
        self.events.retain(|e| match &e.source {
            Some(source) => feeds.is_followed(source),
            None => true,
        });

        let removed = before - self.events.len();
        if removed > 0 {
            tracing::debug!(removed, "dropped events of unfollowed feeds");
        }

        let stale_filter = matches!(
            &self.filter.feed,
            FeedFilter::Source(name) if !self.feeds.is_followed(name)
        );
        if stale_filter {
            self.filter.feed = FeedFilter::All;
        }
    }

    pub fn visible_public_events(&self, now: DateTime<Utc>) -> Vec<PublicEvent> {
        self.feeds.visible_events(now)
    }

    // ---- views ----

    /// Events passing the filter, with recurring events expanded.
    pub fn filtered_events(&self, now: DateTime<Utc>) -> SocialCalResult<Vec<PersonalEvent>> {
        let matching: Vec<PersonalEvent> = self.filter.apply(&self.events).into_iter().cloned().collect();
        expand_recurring_events(&matching, now, self.tz)
    }

    pub fn sorted_events(&self, now: DateTime<Utc>) -> SocialCalResult<Vec<PersonalEvent>> {
        let mut events = self.filtered_events(now)?;
        sort_by_date(&mut events, now);
        Ok(events)
    }

    /// Sorted events merged with the public events of followed feeds.
    pub fn timeline(&self, now: DateTime<Utc>) -> SocialCalResult<Vec<CalendarEntry>> {
        let mut entries: Vec<CalendarEntry> = self
            .filtered_events(now)?
            .into_iter()
            .map(CalendarEntry::Personal)
            .chain(self.feeds.visible_events(now).into_iter().map(CalendarEntry::Public))
            .collect();
        sort_by_date(&mut entries, now);
        Ok(entries)
    }

    pub fn export_ics(&self, now: DateTime<Utc>) -> SocialCalResult<String> {
        let events = self.filtered_events(now)?;
        generate_ics(&events, &self.organizer, self.tz)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> SocialCalResult<CalendarStats> {
        let events = self.filtered_events(now)?;
        Ok(CalendarStats::compute(
            &events,
            self.feeds.followed_sources().len(),
            now,
            self.tz,
        ))
    }

    pub fn event_color(&self, event: &PersonalEvent) -> &str {
        self.calendars.color_of(event)
    }

    pub fn is_shareable(&self, event: &PersonalEvent) -> bool {
        !event.category.is_private()
    }

    /// Share an event. Only non-private events can be shared.
    pub fn share(&self, event: &PersonalEvent) -> bool {
        if !self.is_shareable(event) {
            return false;
        }
        tracing::info!(id = %event.id, title = %event.title, "sharing event");
        true
    }

    // ---- personal calendars ----

    pub fn add_calendar(&mut self, name: &str) -> SocialCalResult<CalendarId> {
        self.calendars.add(name)
    }

    pub fn update_calendar(&mut self, calendar: PersonalCalendar) -> SocialCalResult<()> {
        self.calendars.update(calendar)
    }

    /// Remove a calendar. Its events keep their id and fall back to the
    /// default colour.
    pub fn delete_calendar(&mut self, id: CalendarId) -> bool {
        self.calendars.delete(id)
    }
}
