use crate::{category::normalize, model::Category, types::CategoryId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_CUSTOM_ICON: &str = "tag";
pub const DEFAULT_CUSTOM_COLOR: &str = "#8E8E93";

/// One entry of the built-in category set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySeed {
    pub id:    CategoryId,
    pub name:  String,
    pub icon:  String,
    pub color: String,
}

impl CategorySeed {
    fn new(id: &str, name: &str, icon: &str, color: &str) -> Self {
        Self {
            id:    id.into(),
            name:  name.into(),
            icon:  icon.into(),
            color: color.into(),
        }
    }

    pub fn to_category(&self) -> Category {
        Category {
            id:        self.id.clone(),
            name:      self.name.clone(),
            icon:      self.icon.clone(),
            color:     self.color.clone(),
            is_custom: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DefaultCategoriesFile {
    categories: Vec<CategorySeed>,
    #[serde(default)]
    custom_icon: Option<String>,
    #[serde(default)]
    custom_color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RewardsConfig {
    pub default_categories: Vec<CategorySeed>,
    /// Applied to custom categories created without an explicit icon.
    pub custom_icon: String,
    pub custom_color: String,
}

impl RewardsConfig {
    /// Load from the data/ directory.
    /// Without a data directory, use RewardsConfig::builtin().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/categories/default_categories.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: DefaultCategoriesFile = serde_json::from_str(&content)?;

        let config = Self {
            default_categories: file.categories,
            custom_icon: file.custom_icon.unwrap_or_else(|| DEFAULT_CUSTOM_ICON.into()),
            custom_color: file.custom_color.unwrap_or_else(|| DEFAULT_CUSTOM_COLOR.into()),
        };
        config.check_unique_names()?;

        log::info!(
            "config: loaded {} default categories from {path}",
            config.default_categories.len()
        );
        Ok(config)
    }

    fn check_unique_names(&self) -> anyhow::Result<()> {
        let mut seen_names = HashSet::new();
        let mut seen_ids = HashSet::new();
        for seed in &self.default_categories {
            if !seen_names.insert(normalize(&seed.name)) {
                anyhow::bail!("duplicate default category name: {}", seed.name);
            }
            if !seen_ids.insert(seed.id.as_str()) {
                anyhow::bail!("duplicate default category id: {}", seed.id);
            }
        }
        Ok(())
    }

    /// The built-in catalog, hardcoded. Mirrors data/categories/default_categories.json.
    pub fn builtin() -> Self {
        let default_categories = vec![
            CategorySeed::new("dining",        "Dining",        "utensils",      "#FF6B6B"),
            CategorySeed::new("groceries",     "Groceries",     "shopping-cart", "#4ECDC4"),
            CategorySeed::new("travel",        "Travel",        "plane",         "#45B7D1"),
            CategorySeed::new("gas",           "Gas",           "gas-pump",      "#F7B731"),
            CategorySeed::new("entertainment", "Entertainment", "film",          "#A55EEA"),
            CategorySeed::new("shopping",      "Shopping",      "shopping-bag",  "#FD9644"),
            CategorySeed::new("online",        "Online",        "globe",         "#26DE81"),
            CategorySeed::new("streaming",     "Streaming",     "tv",            "#EB3B5A"),
            CategorySeed::new("drugstores",    "Drugstores",    "pills",         "#20BF6B"),
            CategorySeed::new("transit",       "Transit",       "bus",           "#2D98DA"),
            CategorySeed::new("hotels",        "Hotels",        "bed",           "#8854D0"),
            CategorySeed::new("airlines",      "Airlines",      "plane-up",      "#3867D6"),
            CategorySeed::new("rideshare",     "Rideshare",     "car",           "#0FB9B1"),
            CategorySeed::new("utilities",     "Utilities",     "bolt",          "#F7B731"),
            CategorySeed::new("home",          "Home",          "house",         "#FA8231"),
            CategorySeed::new("wholesale",     "Wholesale",     "warehouse",     "#4B6584"),
            CategorySeed::new("phone",         "Phone",         "mobile",        "#778CA3"),
            CategorySeed::new("fitness",       "Fitness",       "dumbbell",      "#EB3B5A"),
            CategorySeed::new("education",     "Education",     "graduation-cap","#3867D6"),
            CategorySeed::new("other",         "Other",         "ellipsis",      "#A5B1C2"),
        ];

        Self {
            default_categories,
            custom_icon: DEFAULT_CUSTOM_ICON.into(),
            custom_color: DEFAULT_CUSTOM_COLOR.into(),
        }
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
