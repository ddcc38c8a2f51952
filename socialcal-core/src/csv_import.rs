//! CSV import of personal events.
//!
//! Rows are `title,start,end,type,category`. The first line is a header.
//! Fields are split on every comma; quoting is not recognised, so a comma
//! inside a title shifts the remaining fields of that row.

use std::path::Path;

use chrono_tz::Tz;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::SocialCalResult;
use crate::event::{EventCategory, EventDraft, EventType};
use crate::timestamp::parse_timestamp;

/// Parse CSV text into event drafts. Rows with a blank title or a missing or
/// unparseable start/end are skipped.
pub fn parse_csv(content: &str, tz: Tz) -> Vec<EventDraft> {
    // The header is the first physical line, even when it is blank
    let body = content.split_once('\n').map_or("", |(_, rest)| rest);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut drafts = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        match record.ok().and_then(|r| parse_row(&r, tz)) {
            Some(draft) => drafts.push(draft),
            None => skipped += 1,
        }
    }

    tracing::debug!(imported = drafts.len(), skipped, "parsed csv");
    drafts
}

/// Read and parse a CSV file.
pub async fn read_csv_file(path: &Path, tz: Tz) -> SocialCalResult<Vec<EventDraft>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(parse_csv(&content, tz))
}

fn parse_row(record: &StringRecord, tz: Tz) -> Option<EventDraft> {
    let field = |i: usize| record.get(i).map(str::trim).filter(|s| !s.is_empty());

    let title = field(0)?;
    let start = parse_timestamp(field(1)?, tz).ok()?;
    let end = parse_timestamp(field(2)?, tz).ok()?;

    let event_type = field(3)
        .map(|s| {
            s.parse::<EventType>().unwrap_or_else(|e| {
                tracing::debug!("{e}, using default");
                EventType::default()
            })
        })
        .unwrap_or_default();

    let category = field(4)
        .map(|s| {
            s.parse::<EventCategory>().unwrap_or_else(|e| {
                tracing::debug!("{e}, using default");
                EventCategory::default()
            })
        })
        .unwrap_or_default();

    Some(EventDraft {
        event_type,
        category,
        ..EventDraft::new(title, start, end)
    })
}
