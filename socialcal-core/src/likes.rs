//! Liked public events, persisted under the `likedEvents` key.

use std::collections::BTreeSet;

use crate::error::SocialCalResult;
use crate::event::EventId;
use crate::storage::LocalStorage;

pub const LIKED_EVENTS_KEY: &str = "likedEvents";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikedEvents {
    ids: BTreeSet<EventId>,
}

impl LikedEvents {
    pub fn load(storage: &LocalStorage) -> SocialCalResult<Self> {
        let ids: Vec<EventId> = storage.get_json(LIKED_EVENTS_KEY)?.unwrap_or_default();
        Ok(LikedEvents {
            ids: ids.into_iter().collect(),
        })
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Like or unlike `id` and write the set back. Returns whether the event
    /// is liked afterwards.
    pub fn toggle(&mut self, id: EventId, storage: &LocalStorage) -> SocialCalResult<bool> {
        let liked = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };

        let ids: Vec<EventId> = self.ids.iter().copied().collect();
        storage.set_json(LIKED_EVENTS_KEY, &ids)?;

        tracing::debug!(%id, liked, "toggled like");
        Ok(liked)
    }
}
