//! Per-user favorite categories.
//!
//! Favorite status is not a property of a Category. It is a set of
//! category ids kept per user, behind a repository so callers never hold
//! it as global state.

use crate::{error::RewardsResult, types::CategoryId};
use std::collections::{HashMap, HashSet};

pub trait FavoriteRepository {
    fn favorites(&self, user_id: &str) -> RewardsResult<HashSet<CategoryId>>;

    fn set_favorite(&mut self, user_id: &str, category_id: &str, favorite: bool) -> RewardsResult<()>;

    /// Flip a category's favorite status. Returns the new status.
    fn toggle_favorite(&mut self, user_id: &str, category_id: &str) -> RewardsResult<bool> {
        let now_favorite = !self.favorites(user_id)?.contains(category_id);
        self.set_favorite(user_id, category_id, now_favorite)?;
        Ok(now_favorite)
    }
}

/// Favorites held in memory. Lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryFavorites {
    by_user: HashMap<String, HashSet<CategoryId>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoriteRepository for MemoryFavorites {
    fn favorites(&self, user_id: &str) -> RewardsResult<HashSet<CategoryId>> {
        Ok(self.by_user.get(user_id).cloned().unwrap_or_default())
    }

    fn set_favorite(&mut self, user_id: &str, category_id: &str, favorite: bool) -> RewardsResult<()> {
        let set = self.by_user.entry(user_id.to_string()).or_default();
        if favorite {
            set.insert(category_id.to_string());
        } else {
            set.remove(category_id);
        }
        Ok(())
    }
}
