//! Ranking engine: which card earns the most for a purchase category.
//!
//! ALGORITHM (per request):
//!   1. Per card, keep bonuses that match the category and are active on `now`.
//!   2. Per card, pick the best of those: highest rate, then the soonest
//!      defined end date, then earliest in the card's own order.
//!   3. A card without such a bonus falls back to its default rate.
//!   4. Sort by rate, descending. At equal rates a bonus beats a default;
//!      otherwise card order is kept (stable sort).
//!
//! Every input card yields exactly one result. The function is pure:
//! identical inputs give an identical ordered output.

use crate::{
    activity::is_active,
    category::matches,
    model::{Bonus, Card, MatchResult},
    validation::{bonus_is_well_formed, default_rate_in_range},
};
use chrono::NaiveDate;
use std::cmp::Ordering;

pub fn find_best_cards(cards: &[Card], requested_category: &str, now: NaiveDate) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = cards
        .iter()
        .map(|card| match best_bonus(card, requested_category, now) {
            Some(bonus) => MatchResult::from_bonus(card, bonus),
            None => default_match(card),
        })
        .collect();

    results.sort_by(rank_order);
    results
}

/// The highest-ranked entry, if any card was given.
pub fn best_card(cards: &[Card], requested_category: &str, now: NaiveDate) -> Option<MatchResult> {
    find_best_cards(cards, requested_category, now).into_iter().next()
}

/// The card's best active bonus for the category, if it has one.
pub fn best_bonus<'a>(card: &'a Card, requested_category: &str, now: NaiveDate) -> Option<&'a Bonus> {
    let mut best: Option<&Bonus> = None;

    for bonus in &card.bonuses {
        if !matches(&bonus.category, requested_category) || !is_active(bonus, now) {
            continue;
        }
        if !bonus_is_well_formed(bonus) {
            log::debug!(
                "ranking: skipping malformed bonus {} on card {}",
                bonus.id, card.id
            );
            continue;
        }
        best = match best {
            Some(current) if !outranks(bonus, current) => Some(current),
            _ => Some(bonus),
        };
    }

    best
}

/// Strictly better only; ties keep the earlier bonus.
fn outranks(candidate: &Bonus, current: &Bonus) -> bool {
    match candidate.rate.total_cmp(&current.rate) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match (candidate.end_date, current.end_date) {
            (Some(a), Some(b)) => a < b,
            (Some(_), None) => true,
            (None, _) => false,
        },
    }
}

fn default_match(card: &Card) -> MatchResult {
    let mut result = MatchResult::from_default(card);
    // Out-of-range defaults never reach the store; if one does, it ranks as 0.
    if !default_rate_in_range(result.rate) {
        log::warn!(
            "ranking: card {} has out-of-range default rate {}, ranking it as 0",
            card.id, card.default_rate
        );
        result.rate = 0.0;
    }
    result
}

fn rank_order(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.rate
        .total_cmp(&a.rate)
        .then_with(|| a.is_default.cmp(&b.is_default))
}
