use anyhow::Result;
use owo_colors::OwoColorize;
use socialcal_core::config::AppConfig;
use socialcal_core::event::EventId;
use socialcal_core::likes::LikedEvents;

pub fn run(config: &AppConfig, id: &str) -> Result<()> {
    let id: EventId = id.parse()?;
    let feeds = config.feeds(config.tz()?)?;

    let Some(event) = feeds.get_event(id) else {
        anyhow::bail!("No public event with id {}", id);
    };

    let storage = config.storage();
    let mut liked = LikedEvents::load(&storage)?;

    if liked.toggle(id, &storage)? {
        println!("{} Liked {}", "♥".red(), event.title);
    } else {
        println!("{} Unliked {}", "♡".dimmed(), event.title);
    }

    Ok(())
}
