use super::RewardsStore;
use crate::error::RewardsResult;
use chrono::NaiveDate;
use rusqlite::params;

impl RewardsStore {
    /// Record that a notice was handed to delivery.
    /// Returns true the first time a key is seen for this user, false after.
    pub fn record_notification(&self, user_id: &str, dedupe_key: &str, sent_on: NaiveDate) -> RewardsResult<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO notification_log (user_id, dedupe_key, sent_on)
             VALUES (?1, ?2, ?3)",
            params![user_id, dedupe_key, sent_on],
        )?;
        Ok(inserted == 1)
    }

    /// Forget notices sent before `cutoff`. Returns the number removed.
    pub fn prune_notifications_before(&self, user_id: &str, cutoff: NaiveDate) -> RewardsResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM notification_log WHERE user_id = ?1 AND sent_on < ?2",
            params![user_id, cutoff],
        )?;
        Ok(removed)
    }
}
