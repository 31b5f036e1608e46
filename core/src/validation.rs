//! Entry validation for cards and bonuses.
//!
//! RULE: Ranking and expiry assume well-formed input and do not re-check.
//! Everything persisted through the wallet passes through here first.

use crate::{
    error::{RewardsError, RewardsResult},
    model::{Bonus, Card},
    types::{Rate, MAX_RATE},
};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field:  String,
    pub reason: String,
}

impl ValidationIssue {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { field: field.into(), reason: reason.into() }
    }
}

impl From<ValidationIssue> for RewardsError {
    fn from(issue: ValidationIssue) -> Self {
        RewardsError::Validation { field: issue.field, reason: issue.reason }
    }
}

/// Default rates may be zero; a card that earns nothing extra is still a card.
pub fn default_rate_in_range(rate: Rate) -> bool {
    rate.is_finite() && (0.0..=MAX_RATE).contains(&rate)
}

/// Bonus rates must be strictly positive.
pub fn bonus_rate_in_range(rate: Rate) -> bool {
    rate.is_finite() && rate > 0.0 && rate <= MAX_RATE
}

/// True when the bonus could legally enter the engine.
pub fn bonus_is_well_formed(bonus: &Bonus) -> bool {
    validate_bonus(bonus, "bonus").is_empty()
}

/// Report every problem with a bonus. `prefix` qualifies field names.
pub fn validate_bonus(bonus: &Bonus, prefix: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if bonus.category.trim().is_empty() {
        issues.push(ValidationIssue::new(format!("{prefix}.category"), "category is required"));
    }
    if !bonus_rate_in_range(bonus.rate) {
        issues.push(ValidationIssue::new(
            format!("{prefix}.rate"),
            format!("rate must be greater than 0 and at most {MAX_RATE}, got {}", bonus.rate),
        ));
    }
    if let (Some(start), Some(end)) = (bonus.start_date, bonus.end_date) {
        if start > end {
            issues.push(ValidationIssue::new(
                format!("{prefix}.start_date"),
                format!("start date {start} is after end date {end}"),
            ));
        }
    }

    issues
}

/// Report every problem with a card and its bonuses, in field order.
pub fn validate_card(card: &Card) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if card.name.trim().is_empty() {
        issues.push(ValidationIssue::new("name", "card name is required"));
    }
    if !default_rate_in_range(card.default_rate) {
        issues.push(ValidationIssue::new(
            "default_rate",
            format!("default rate must be between 0 and {MAX_RATE}, got {}", card.default_rate),
        ));
    }
    let mut seen_ids = HashSet::new();
    for (i, bonus) in card.bonuses.iter().enumerate() {
        let prefix = format!("bonuses[{i}]");
        if !seen_ids.insert(bonus.id.as_str()) {
            issues.push(ValidationIssue::new(
                format!("{prefix}.id"),
                format!("bonus id {} appears more than once on this card", bonus.id),
            ));
        }
        issues.extend(validate_bonus(bonus, &prefix));
    }

    issues
}

/// Fail with the first issue found, if any.
pub fn ensure_valid_card(card: &Card) -> RewardsResult<()> {
    match validate_card(card).into_iter().next() {
        Some(issue) => Err(issue.into()),
        None => Ok(()),
    }
}
