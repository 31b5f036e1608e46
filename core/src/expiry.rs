//! Expiry notifier: bonuses that end today or tomorrow.
//!
//! The horizon is exactly those two days. Nothing here remembers what was
//! already announced; the wallet deduplicates through the store.

use crate::{
    activity::days_until_expiry,
    model::{Card, ExpiryNotice, ExpiryWindow},
};
use chrono::NaiveDate;

pub fn find_expiring_bonuses(cards: &[Card], today: NaiveDate) -> Vec<ExpiryNotice> {
    let mut out = Vec::new();

    for card in cards {
        for bonus in &card.bonuses {
            let (Some(end_date), Some(days)) = (bonus.end_date, days_until_expiry(bonus, today)) else {
                continue;
            };
            let Some(window) = ExpiryWindow::from_days(days) else {
                continue;
            };

            out.push(ExpiryNotice {
                card_id:     card.id.clone(),
                card_name:   card.name.clone(),
                bonus_id:    bonus.id.clone(),
                category:    bonus.category.clone(),
                rate:        bonus.rate,
                reward_type: bonus.reward_type,
                end_date,
                window,
            });
        }
    }

    out
}
