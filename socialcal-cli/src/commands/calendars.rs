use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use socialcal_core::config::AppConfig;

use crate::render::Render;

pub fn run(config: &mut AppConfig, config_path: &Path, add: Option<&str>, remove: Option<&str>) -> Result<()> {
    let mut calendars = config.personal_calendars();

    if let Some(name) = add {
        let id = calendars.add(name)?;
        if let Some(calendar) = calendars.get(id) {
            println!("{} Added {}", "+".green(), calendar.render());
        }
    }

    if let Some(name) = remove {
        let ids: Vec<_> = calendars.iter().filter(|c| c.name == name).map(|c| c.id).collect();
        if ids.is_empty() {
            anyhow::bail!("Calendar '{}' not found", name);
        }
        for id in ids {
            calendars.delete(id);
        }
        println!("{} Removed {}", "-".red(), name);
    }

    if add.is_some() || remove.is_some() {
        config.set_personal_calendars(&calendars);
        config.save_to(config_path)?;
        println!();
    }

    if calendars.is_empty() {
        println!("{}", "No calendars configured".dimmed());
        return Ok(());
    }

    for calendar in calendars.iter() {
        println!("{}", calendar.render());
    }

    Ok(())
}
