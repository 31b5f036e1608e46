use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewardsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("No clock supplied: a current date is required")]
    MissingClock,

    #[error("Card '{card_id}' not found")]
    CardNotFound { card_id: String },

    #[error("Category '{category_id}' not found")]
    CategoryNotFound { category_id: String },

    #[error("Category '{name}' already exists")]
    DuplicateCategory { name: String },

    #[error("Category '{category_id}' is built in and cannot be changed")]
    BuiltInCategory { category_id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RewardsResult<T> = Result<T, RewardsError>;
