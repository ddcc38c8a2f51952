use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use socialcal_core::config::AppConfig;
use socialcal_core::likes::LikedEvents;

use crate::render::{Render, render_public_event};

pub fn run(config: &AppConfig, unfollow: &[String]) -> Result<()> {
    let tz = config.tz()?;
    let now = Utc::now();
    let mut feeds = config.feeds(tz)?;

    for name in unfollow {
        if !feeds.set_followed(name, false) {
            anyhow::bail!("Feed '{}' not found", name);
        }
    }

    let liked = LikedEvents::load(&config.storage())?;

    for (i, calendar) in feeds.calendars().iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", calendar.render());

        if !calendar.followed {
            continue;
        }

        let events: Vec<_> = feeds
            .visible_events(now)
            .into_iter()
            .filter(|e| e.source == calendar.name)
            .collect();

        if events.is_empty() {
            println!("   {}", "No events".dimmed());
        }
        for event in &events {
            println!("{}", render_public_event(event, liked.contains(event.id), now, tz));
        }
    }

    Ok(())
}
