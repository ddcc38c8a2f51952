//! Directory-backed key/value storage.
//!
//! Each key is one JSON file, `<dir>/<key>.json`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{SocialCalError, SocialCalResult};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Raw value for `key`, or `None` if it was never set.
    pub fn get_item(&self, key: &str) -> SocialCalResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    pub fn set_item(&self, key: &str, value: &str) -> SocialCalResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> SocialCalResult<Option<T>> {
        match self.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| SocialCalError::Serialization(format!("{key}: {e}"))),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> SocialCalResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| SocialCalError::Serialization(format!("{key}: {e}")))?;
        self.set_item(key, &raw)
    }
}
