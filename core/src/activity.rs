//! Temporal activity: whether a bonus applies on a given date.
//!
//! Comparisons are date-level and both bounds are inclusive.

use crate::model::Bonus;
use chrono::NaiveDate;

/// A bonus is active iff `(start absent OR start <= now) AND (end absent OR end >= now)`.
pub fn is_active(bonus: &Bonus, now: NaiveDate) -> bool {
    let started = bonus.start_date.map_or(true, |start| start <= now);
    let not_ended = bonus.end_date.map_or(true, |end| end >= now);
    started && not_ended
}

/// Whole days from `now` until the bonus ends. `None` when it never ends.
/// Negative once the end date has passed; callers decide what that means.
pub fn days_until_expiry(bonus: &Bonus, now: NaiveDate) -> Option<i64> {
    bonus.end_date.map(|end| (end - now).num_days())
}
