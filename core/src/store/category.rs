use super::RewardsStore;
use crate::{category::normalize, error::RewardsResult, model::Category};
use rusqlite::params;

impl RewardsStore {
    pub fn insert_custom_category(&self, user_id: &str, category: &Category) -> RewardsResult<()> {
        self.insert_custom_categories(user_id, std::slice::from_ref(category))
    }

    /// Insert several custom categories in one transaction.
    pub fn insert_custom_categories(&self, user_id: &str, categories: &[Category]) -> RewardsResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO custom_category (category_id, user_id, name, name_key, icon, color)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for category in categories {
                stmt.execute(params![
                    category.id,
                    user_id,
                    category.name,
                    normalize(&category.name),
                    category.icon,
                    category.color,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn update_custom_category(&self, user_id: &str, category: &Category) -> RewardsResult<bool> {
        let changed = self.conn.execute(
            "UPDATE custom_category
             SET name = ?1, name_key = ?2, icon = ?3, color = ?4
             WHERE category_id = ?5 AND user_id = ?6",
            params![
                category.name,
                normalize(&category.name),
                category.icon,
                category.color,
                category.id,
                user_id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a custom category and any favorite mark on it.
    pub fn delete_custom_category(&self, user_id: &str, category_id: &str) -> RewardsResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "DELETE FROM custom_category WHERE category_id = ?1 AND user_id = ?2",
            params![category_id, user_id],
        )?;
        tx.execute(
            "DELETE FROM favorite_category WHERE category_id = ?1 AND user_id = ?2",
            params![category_id, user_id],
        )?;
        tx.commit()?;
        Ok(changed > 0)
    }

    /// A user's custom categories, oldest first.
    pub fn list_custom_categories(&self, user_id: &str) -> RewardsResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT category_id, name, icon, color
             FROM custom_category WHERE user_id = ?1
             ORDER BY seq ASC",
        )?;
        let categories = stmt
            .query_map(params![user_id], |row| {
                Ok(Category {
                    id:        row.get(0)?,
                    name:      row.get(1)?,
                    icon:      row.get(2)?,
                    color:     row.get(3)?,
                    is_custom: true,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }
}
