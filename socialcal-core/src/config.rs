//! Global socialcal configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::calendar::PersonalCalendars;
use crate::error::{SocialCalError, SocialCalResult};
use crate::feed::Feeds;
use crate::ics::Organizer;
use crate::storage::LocalStorage;
use crate::timestamp::{parse_tz, system_tz};

static DEFAULT_DATA_PATH: &str = "~/.local/share/socialcal";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

/// A personal calendar to create at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSeed {
    pub name: String,
    pub color: String,
}

fn default_calendars() -> Vec<CalendarSeed> {
    PersonalCalendars::defaults()
        .iter()
        .map(|c| CalendarSeed {
            name: c.name.clone(),
            color: c.color.clone(),
        })
        .collect()
}

/// Configuration at ~/.config/socialcal/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// IANA zone used for naive timestamps and exports; system zone if unset
    #[serde(default)]
    pub timezone: Option<String>,

    #[serde(default = "default_data_path")]
    pub data_dir: PathBuf,

    /// Feeds that start out unfollowed
    #[serde(default)]
    pub unfollowed_feeds: Vec<String>,

    #[serde(default = "default_calendars")]
    pub calendars: Vec<CalendarSeed>,

    #[serde(default)]
    pub organizer: Organizer,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            timezone: None,
            data_dir: default_data_path(),
            calendars: default_calendars(),
            unfollowed_feeds: Vec::new(),
            organizer: Organizer::default(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> SocialCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SocialCalError::Config("Could not determine config directory".into()))?
            .join("socialcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first if
    /// no file exists yet.
    pub fn load() -> SocialCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> SocialCalResult<Self> {
        let config: AppConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| SocialCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SocialCalError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SocialCalResult<()> {
        let contents = format!(
            "\
# socialcal configuration

# Timezone for imported times and exports (defaults to the system zone):
# timezone = \"Europe/London\"

# Where liked events are stored:
# data_dir = \"{}\"

# Feeds to start unfollowed:
# unfollowed_feeds = [\"GlobalDays\"]

# Personal calendars:
# [[calendars]]
# name = \"Work\"
# color = \"#2196F3\"

# Organizer written into exported .ics files:
# [organizer]
# name = \"Your Name\"
# email = \"your@email.com\"
",
            DEFAULT_DATA_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SocialCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SocialCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> SocialCalResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| SocialCalError::Config(e.to_string()))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn tz(&self) -> SocialCalResult<Tz> {
        match &self.timezone {
            Some(name) => parse_tz(name),
            None => Ok(system_tz()),
        }
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn storage(&self) -> LocalStorage {
        LocalStorage::new(self.data_path())
    }

    pub fn personal_calendars(&self) -> PersonalCalendars {
        PersonalCalendars::from_seeds(
            self.calendars
                .iter()
                .map(|c| (c.name.clone(), c.color.clone())),
        )
    }

    /// Replace the calendar seeds with the current calendars.
    pub fn set_personal_calendars(&mut self, calendars: &PersonalCalendars) {
        self.calendars = calendars
            .iter()
            .map(|c| CalendarSeed {
                name: c.name.clone(),
                color: c.color.clone(),
            })
            .collect();
    }

    /// Sample feeds with the configured ones unfollowed.
    pub fn feeds(&self, tz: Tz) -> SocialCalResult<Feeds> {
        let mut feeds = Feeds::sample(tz);
        for name in &self.unfollowed_feeds {
            if !feeds.set_followed(name, false) {
                return Err(SocialCalError::Config(format!("Unknown feed '{}'", name)));
            }
        }
        Ok(feeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::GLOBAL_DAYS;

    #[test]
    fn test_default_template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("socialcal/config.toml");

        AppConfig::create_default_config(&path).unwrap();
        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.timezone, None);
        assert_eq!(config.data_dir, default_data_path());
        assert_eq!(config.calendars.len(), 3);
        assert_eq!(config.organizer, Organizer::default());
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r##"
timezone = "Europe/London"
data_dir = "/tmp/socialcal-test"
unfollowed_feeds = ["GlobalDays"]

[[calendars]]
name = "Gym"
color = "#111111"

[organizer]
name = "Sam"
email = "sam@example.com"
"##,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        let tz = config.tz().unwrap();

        assert_eq!(tz, chrono_tz::Europe::London);
        assert_eq!(config.data_path(), PathBuf::from("/tmp/socialcal-test"));
        assert_eq!(config.personal_calendars().len(), 1);
        assert_eq!(config.organizer.email, "sam@example.com");
        assert!(!config.feeds(tz).unwrap().is_followed(GLOBAL_DAYS));
    }

    #[test]
    fn test_saved_calendars_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        let mut calendars = config.personal_calendars();
        calendars.add("Gym").unwrap();
        config.set_personal_calendars(&calendars);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        let names: Vec<String> = loaded.calendars.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["Work", "Personal", "Family", "Gym"]);
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        let config = AppConfig {
            timezone: Some("Nowhere/Land".into()),
            unfollowed_feeds: vec!["Unknown".into()],
            ..Default::default()
        };

        assert!(matches!(config.tz(), Err(SocialCalError::Config(_))));
        assert!(matches!(config.feeds(Tz::UTC), Err(SocialCalError::Config(_))));
    }
}
