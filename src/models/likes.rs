use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ForkfulError, Result};
use crate::storage::KeyValueStore;

pub const LIKES_KEY: &str = "likes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image: String,
}

/// Liked recipes keyed by id, in the order they were liked
#[derive(Debug, Default)]
pub struct Likes {
    likes: IndexMap<String, LikedRecipe>,
    session_only: bool,
}

impl Likes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.contains_key(id)
    }

    /// Liking an already liked recipe returns the existing entry unchanged
    pub fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        image: impl Into<String>,
    ) -> LikedRecipe {
        let id = id.into();
        self.likes
            .entry(id.clone())
            .or_insert_with(|| LikedRecipe {
                id,
                title: title.into(),
                author: author.into(),
                image: image.into(),
            })
            .clone()
    }

    pub fn delete_like(&mut self, id: &str) -> Result<LikedRecipe> {
        self.likes
            .shift_remove(id)
            .ok_or_else(|| ForkfulError::LikeNotFound(id.to_string()))
    }

    pub fn count(&self) -> usize {
        self.likes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LikedRecipe> {
        self.likes.values()
    }

    pub fn get_index(&self, index: usize) -> Option<&LikedRecipe> {
        self.likes.get_index(index).map(|(_, like)| like)
    }

    /// True while the last write to storage failed; likes then live only in memory
    pub fn is_session_only(&self) -> bool {
        self.session_only
    }

    /// Write the full set to `store`. Failures are logged, never returned.
    pub async fn persist(&mut self, store: &dyn KeyValueStore) {
        match self.try_persist(store).await {
            Ok(()) => self.session_only = false,
            Err(e) => {
                warn!("Failed to persist likes, keeping them for this session only: {}", e);
                self.session_only = true;
            }
        }
    }

    async fn try_persist(&self, store: &dyn KeyValueStore) -> Result<()> {
        let liked: Vec<&LikedRecipe> = self.likes.values().collect();
        let serialized = serde_json::to_string(&liked)?;
        store.set(LIKES_KEY, &serialized).await?;
        debug!("Persisted {} likes", liked.len());
        Ok(())
    }

    /// Replace the in-memory set with what `store` holds. Unreadable data
    /// leaves the set as it was.
    pub async fn restore(&mut self, store: &dyn KeyValueStore) {
        match Self::try_restore(store).await {
            Ok(Some(liked)) => {
                self.likes = liked
                    .into_iter()
                    .map(|like| (like.id.clone(), like))
                    .collect();
                debug!("Restored {} likes", self.likes.len());
            }
            Ok(None) => debug!("No stored likes"),
            Err(e) => warn!("Failed to restore likes: {}", e),
        }
    }

    async fn try_restore(store: &dyn KeyValueStore) -> Result<Option<Vec<LikedRecipe>>> {
        let Some(serialized) = store.get(LIKES_KEY).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&serialized)?))
    }
}
