pub mod calendars;
pub mod events;
pub mod export;
pub mod feeds;
pub mod like;
pub mod stats;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use socialcal_core::config::AppConfig;
use socialcal_core::event::{EventCategory, EventId, EventType};
use socialcal_core::filter::FeedFilter;
use socialcal_core::session::CalendarSession;

/// Builds the in-memory session shared by `events`, `export` and `stats`.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Import events from a CSV file (title,start,end,type,category)
    #[arg(long = "import", value_name = "FILE")]
    imports: Vec<PathBuf>,

    /// Add a public event to your events by id
    #[arg(long = "link", value_name = "ID")]
    links: Vec<EventId>,

    /// Unfollow a feed before listing
    #[arg(long, value_name = "NAME")]
    unfollow: Vec<String>,

    /// Only events whose title contains this text
    #[arg(short, long, default_value = "")]
    search: String,

    #[arg(short = 't', long = "type")]
    event_type: Option<EventType>,

    #[arg(short, long)]
    category: Option<EventCategory>,

    /// "all", "personal", or a feed name
    #[arg(short, long, default_value = "all")]
    feed: FeedFilter,
}

impl SessionArgs {
    pub async fn build(self, config: &AppConfig) -> Result<CalendarSession> {
        let mut session = CalendarSession::from_config(config)?;

        for path in &self.imports {
            let imported = session.import_csv_file(path).await?;
            if imported == 0 {
                tracing::warn!(path = %path.display(), "no events imported");
            }
        }

        for id in self.links {
            if session.link_feed_event(id)?.is_none() {
                tracing::info!(%id, "already linked");
            }
        }

        for name in &self.unfollow {
            if !session.set_followed(name, false) {
                anyhow::bail!("Feed '{}' not found", name);
            }
        }

        session.filter.search = self.search;
        session.filter.event_type = self.event_type;
        session.filter.category = self.category;
        session.filter.feed = self.feed;

        Ok(session)
    }
}
