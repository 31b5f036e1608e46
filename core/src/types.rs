//! Shared primitive types used across the entire crate.

/// Opaque identifier of a tracked card.
pub type CardId = String;

/// Opaque identifier of a bonus rule. Unique within its card.
pub type BonusId = String;

/// Opaque identifier of a category. Stable across renames.
pub type CategoryId = String;

/// The owner every persisted row is scoped to.
pub type UserId = String;

/// Reward rates are expressed on the percentage scale, 0–100.
pub type Rate = f64;

pub const MAX_RATE: Rate = 100.0;
