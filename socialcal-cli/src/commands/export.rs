use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use socialcal_core::error::SocialCalError;
use socialcal_core::session::CalendarSession;

use crate::render::pluralize;

/// Write the filtered events to `output`. A calendar that can't be serialized
/// is logged and nothing is written.
pub async fn run(session: &CalendarSession, output: &Path) -> Result<()> {
    let now = Utc::now();
    let count = session.filtered_events(now)?.len();

    let ics = match session.export_ics(now) {
        Ok(ics) => ics,
        Err(SocialCalError::IcsGenerate(e)) => {
            tracing::error!("Failed to export calendar: {e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    tokio::fs::write(output, ics).await?;

    println!(
        "{} {} {} to {}",
        "✓".green(),
        count,
        pluralize("event", count),
        output.display()
    );
    Ok(())
}
