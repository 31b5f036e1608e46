use super::RewardsStore;
use crate::{error::RewardsResult, favorites::FavoriteRepository, types::CategoryId};
use rusqlite::params;
use std::collections::HashSet;

impl FavoriteRepository for RewardsStore {
    fn favorites(&self, user_id: &str) -> RewardsResult<HashSet<CategoryId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category_id FROM favorite_category WHERE user_id = ?1")?;
        let ids = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(ids)
    }

    fn set_favorite(&mut self, user_id: &str, category_id: &str, favorite: bool) -> RewardsResult<()> {
        if favorite {
            self.conn.execute(
                "INSERT OR IGNORE INTO favorite_category (user_id, category_id) VALUES (?1, ?2)",
                params![user_id, category_id],
            )?;
        } else {
            self.conn.execute(
                "DELETE FROM favorite_category WHERE user_id = ?1 AND category_id = ?2",
                params![user_id, category_id],
            )?;
        }
        Ok(())
    }
}
