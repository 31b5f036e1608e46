//! Category matching and the catalog of known categories.
//!
//! Names are compared after normalization (trim + lowercase). There is no
//! fuzzy or partial matching: "Dining" and " dining " are the same
//! category, "Dining Out" is a different one.

use crate::{
    config::RewardsConfig,
    error::{RewardsError, RewardsResult},
    model::{Card, Category},
    types::CategoryId,
};
use std::collections::HashSet;

pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Case-insensitive exact match after trimming. An empty request matches nothing.
pub fn matches(bonus_category: &str, requested: &str) -> bool {
    let requested = normalize(requested);
    !requested.is_empty() && normalize(bonus_category) == requested
}

/// Built-in plus custom categories, unique by normalized name.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// The built-in set from config, then the user's custom categories.
    /// Custom entries whose names collide with an earlier entry are dropped.
    pub fn new(config: &RewardsConfig, custom: Vec<Category>) -> Self {
        let mut catalog = Self {
            categories: config.default_categories.iter().map(|s| s.to_category()).collect(),
        };
        for category in custom {
            if catalog.resolve(&category.name).is_some() {
                log::warn!(
                    "category: ignoring custom category '{}' ({}), name already taken",
                    category.name, category.id
                );
                continue;
            }
            catalog.categories.push(category);
        }
        catalog
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn custom(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_custom)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a category by name, case-insensitively.
    pub fn resolve(&self, name: &str) -> Option<&Category> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        self.categories.iter().find(|c| normalize(&c.name) == wanted)
    }

    pub fn add_custom(&mut self, name: &str, icon: &str, color: &str) -> RewardsResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RewardsError::Validation {
                field:  "name".into(),
                reason: "category name is required".into(),
            });
        }
        if self.resolve(name).is_some() {
            return Err(RewardsError::DuplicateCategory { name: name.to_string() });
        }
        let category = Category::custom(name, icon, color);
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Rename a custom category. Its id is unchanged.
    pub fn rename_custom(&mut self, id: &str, new_name: &str) -> RewardsResult<Category> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(RewardsError::Validation {
                field:  "name".into(),
                reason: "category name is required".into(),
            });
        }
        if let Some(existing) = self.resolve(new_name) {
            if existing.id != id {
                return Err(RewardsError::DuplicateCategory { name: new_name.to_string() });
            }
        }
        let category = self.custom_mut(id)?;
        category.name = new_name.to_string();
        Ok(category.clone())
    }

    /// Remove a custom category. Built-in categories cannot be removed.
    pub fn remove_custom(&mut self, id: &str) -> RewardsResult<Category> {
        self.custom_mut(id)?;
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| RewardsError::CategoryNotFound { category_id: id.to_string() })?;
        Ok(self.categories.remove(pos))
    }

    fn custom_mut(&mut self, id: &str) -> RewardsResult<&mut Category> {
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RewardsError::CategoryNotFound { category_id: id.to_string() })?;
        if !category.is_custom {
            return Err(RewardsError::BuiltInCategory { category_id: id.to_string() });
        }
        Ok(category)
    }

    /// Create custom categories for the given names, skipping any that
    /// already resolve. Returns only the categories actually created.
    pub fn absorb_discovered(&mut self, names: &[String], icon: &str, color: &str) -> Vec<Category> {
        let mut created = Vec::new();
        for name in names {
            if let Ok(category) = self.add_custom(name, icon, color) {
                created.push(category);
            }
        }
        created
    }

    /// Favorites first, then everything else; each group sorted by name.
    pub fn ordered(&self, favorites: &HashSet<CategoryId>) -> Vec<&Category> {
        let mut out: Vec<&Category> = self.categories.iter().collect();
        out.sort_by(|a, b| {
            let fav_a = favorites.contains(&a.id);
            let fav_b = favorites.contains(&b.id);
            fav_b
                .cmp(&fav_a)
                .then_with(|| normalize(&a.name).cmp(&normalize(&b.name)))
        });
        out
    }
}

/// Bonus category names that no known category resolves to.
///
/// Keyed by normalized name: each missing name appears once, spelled the
/// way it was first seen in card order. Running this again after the
/// result has been absorbed yields nothing.
pub fn discover_category_names(catalog: &CategoryCatalog, cards: &[Card]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for bonus in cards.iter().flat_map(|c| c.bonuses.iter()) {
        let key = normalize(&bonus.category);
        if key.is_empty() || catalog.resolve(&key).is_some() {
            continue;
        }
        if seen.insert(key) {
            out.push(bonus.category.trim().to_string());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case_and_surrounding_whitespace() {
        assert!(matches("Dining", "dining"));
        assert!(matches("  Dining ", "DINING"));
        assert!(!matches("Dining Out", "Dining"));
        assert!(!matches("Dining", "Din"));
    }

    #[test]
    fn empty_request_matches_nothing() {
        assert!(!matches("", ""));
        assert!(!matches("Dining", "   "));
    }
}
