use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use socialcal_core::session::CalendarSession;

use crate::render::pluralize;

pub fn run(session: &CalendarSession) -> Result<()> {
    let now = Utc::now();
    let stats = session.stats(now)?;

    let next = match &stats.next_event {
        Some(event) => format!(
            "{} {}",
            event.title,
            event
                .start
                .with_timezone(&session.tz())
                .format("%a %b %-d %H:%M")
                .to_string()
                .dimmed()
        ),
        None => "none".dimmed().to_string(),
    };

    println!("{} {}", "Next event:".bold(), next);
    println!(
        "{} {}",
        "Most active:".bold(),
        stats
            .most_active_category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".into())
    );
    println!(
        "{} {}",
        "Busiest day:".bold(),
        stats.busiest_day.as_deref().unwrap_or("-")
    );
    println!(
        "{} {} {}",
        "Following:".bold(),
        stats.followed_feeds,
        pluralize("feed", stats.followed_feeds)
    );
    println!(
        "{} {} {}",
        "Total:".bold(),
        stats.total_events,
        pluralize("event", stats.total_events)
    );

    if !stats.by_category.is_empty() {
        println!();
        for (category, count) in &stats.by_category {
            println!("   {:<10} {}", category.to_string(), count);
        }
    }

    Ok(())
}
