//! RRULE expansion for recurring events.
//!
//! Expands a recurring personal event into concrete instances between now and
//! the end of the current year. Non-recurring events pass through untouched.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rrule::RRuleSet;

use crate::error::{SocialCalError, SocialCalResult};
use crate::event::PersonalEvent;
use crate::timestamp::end_of_year_horizon;

/// Expand every recurring event in `events` over the horizon that starts at
/// `now` and ends with the current year. Order is preserved: each recurring
/// event is replaced in place by its instances.
pub fn expand_recurring_events(
    events: &[PersonalEvent],
    now: DateTime<Utc>,
    tz: Tz,
) -> SocialCalResult<Vec<PersonalEvent>> {
    let horizon = end_of_year_horizon(now, tz)?;
    let mut expanded = Vec::with_capacity(events.len());

    for event in events {
        if event.is_recurring() {
            expanded.extend(expand_recurring_event(event, now, horizon, tz)?);
        } else {
            expanded.push(event.clone());
        }
    }

    Ok(expanded)
}

/// Expand one recurring event into the instances strictly inside
/// (`range_start`, `range_end`).
///
/// Instance `i` gets id `base + i`, keeps the original duration and records
/// the base id in `occurrence_of`.
pub fn expand_recurring_event(
    event: &PersonalEvent,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    tz: Tz,
) -> SocialCalResult<Vec<PersonalEvent>> {
    let Some(rule) = event.recurrence.as_deref() else {
        return Ok(Vec::new());
    };

    let rrule_str = build_rrule_string(rule, event.start, tz);

    let rrule_set: RRuleSet = rrule_str.parse().map_err(|e| {
        SocialCalError::RecurrenceParse(format!(
            "Failed to parse RRULE for event '{}': {}",
            event.title, e
        ))
    })?;

    // `limit` only guards rules that stop producing dates; the horizon bounds
    // the instance count
    let rrule_set = rrule_set.limit();
    let duration = event.duration();

    let instances = (&rrule_set)
        .into_iter()
        .map(|occ| occ.with_timezone(&Utc))
        .skip_while(|occ| *occ <= range_start)
        .take_while(|occ| *occ < range_end)
        .enumerate()
        .map(|(index, start)| PersonalEvent {
            id: event.id.offset(index),
            start,
            end: start + duration,
            recurrence: None,
            occurrence_of: Some(event.id),
            ..event.clone()
        })
        .collect::<Vec<_>>();

    tracing::debug!(event = %event.title, count = instances.len(), "expanded recurring event");

    Ok(instances)
}

/// Build the iCalendar-format text the rrule parser expects.
///
/// Rule text that already carries a DTSTART is used verbatim. Otherwise the
/// event start becomes DTSTART (in `tz`, so weekday rules follow local
/// time), and bare rule lines get an `RRULE:` prefix.
fn build_rrule_string(rule: &str, start: DateTime<Utc>, tz: Tz) -> String {
    let rule = rule.trim();
    if rule.contains("DTSTART") {
        return rule.to_string();
    }

    let mut lines = Vec::new();

    let dtstart = if tz == Tz::UTC {
        format!("DTSTART:{}", start.format("%Y%m%dT%H%M%SZ"))
    } else {
        format!(
            "DTSTART;TZID={}:{}",
            tz.name(),
            start.with_timezone(&tz).format("%Y%m%dT%H%M%S")
        )
    };
    lines.push(dtstart);

    for line in rule.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.contains(':') {
            lines.push(line.to_string());
        } else {
            lines.push(format!("RRULE:{}", line));
        }
    }

    lines.join("\n")
}
