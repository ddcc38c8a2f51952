//! TUI rendering traits for socialcal types.
//!
//! Extension traits that add colored terminal rendering to socialcal-core
//! types using owo_colors.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use socialcal_core::calendar::PersonalCalendar;
use socialcal_core::event::{PersonalEvent, PublicEvent};
use socialcal_core::feed::FollowedCalendar;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for PersonalCalendar {
    fn render(&self) -> String {
        format!("{} {} {}", swatch(&self.color), self.name, self.color.dimmed())
    }
}

impl Render for FollowedCalendar {
    fn render(&self) -> String {
        if self.followed {
            format!("📡 {}", self.name.bold())
        } else {
            format!("📡 {} {}", self.name.dimmed(), "(unfollowed)".dimmed())
        }
    }
}

/// A colored block for a `#RRGGBB` color, or a plain one if it doesn't parse.
pub fn swatch(hex: &str) -> String {
    match parse_hex(hex) {
        Some((r, g, b)) => "■".truecolor(r, g, b).to_string(),
        None => "■".to_string(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// One line for a personal event: time, swatch, title, tags.
pub fn render_event(event: &PersonalEvent, color: &str, tz: Tz) -> String {
    let time = event.start.with_timezone(&tz).format("%H:%M").to_string();
    let mut line = format!("  {:>5} {} {}", time, swatch(color), event.title);

    let mut tags = vec![event.event_type.to_string(), event.category.to_string()];
    if let Some(source) = &event.source {
        tags.push(source.clone());
    }
    if event.occurrence_of.is_some() {
        tags.push("repeats".to_string());
    }
    line.push_str(&format!(" {}", format!("[{}]", tags.join(", ")).dimmed()));

    if let Some(location) = &event.location {
        line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
    }
    line
}

/// One line for a public event, with its id so it can be linked or liked.
pub fn render_public_event(event: &PublicEvent, liked: bool, now: DateTime<Utc>, tz: Tz) -> String {
    let heart = if liked { "♥".red().to_string() } else { "♡".dimmed().to_string() };
    let date = event.date.with_timezone(&tz).format("%a %b %-d %Y %H:%M");
    let id = format!("#{}", event.id);

    format!(
        "  {} {} {} {} {}",
        heart,
        id.dimmed(),
        event.title,
        date.to_string().dimmed(),
        format!("(added {})", event.added_ago(now)).dimmed()
    )
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25 2026")
pub fn format_date_label(date: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> String {
    let day = date.with_timezone(&tz).date_naive();
    let today = now.with_timezone(&tz).date_naive();

    match (day - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => day.format("%a %b %-d %Y").to_string(),
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#C8102E"), Some((200, 16, 46)));
        assert_eq!(parse_hex("3174ad"), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#zz0000"), None);
    }

    #[test]
    fn test_date_labels() {
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap();
        let tomorrow = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 12, 28, 9, 0, 0).unwrap();

        assert_eq!(format_date_label(now, now, Tz::UTC), "Today");
        assert_eq!(format_date_label(tomorrow, now, Tz::UTC), "Tomorrow");
        assert_eq!(format_date_label(later, now, Tz::UTC), "Mon Dec 28 2026");
    }
}
