use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use socialcal_core::event::{CalendarEntry, Dated};
use socialcal_core::session::CalendarSession;

use crate::render::{format_date_label, render_event, render_public_event};

pub fn run(session: &CalendarSession, with_feeds: bool) -> Result<()> {
    let now = Utc::now();

    let entries = if with_feeds {
        session.timeline(now)?
    } else {
        session
            .sorted_events(now)?
            .into_iter()
            .map(CalendarEntry::Personal)
            .collect()
    };

    if entries.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Upcoming events come first, latest first; a new date label starts each day
    let mut current_date: Option<String> = None;

    for entry in &entries {
        let date_label = format_date_label(entry.date(), now, session.tz());

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label.bold());
            current_date = Some(date_label);
        }

        match entry {
            CalendarEntry::Personal(event) => {
                println!("{}", render_event(event, session.event_color(event), session.tz()))
            }
            CalendarEntry::Public(event) => {
                println!("{}", render_public_event(event, false, now, session.tz()))
            }
        }
    }

    Ok(())
}
