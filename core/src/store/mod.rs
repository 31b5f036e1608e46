//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The wallet calls store methods; nothing else executes SQL.
//! Every row is scoped by user_id.

use crate::error::RewardsResult;
use rusqlite::Connection;

mod card;
mod category;
mod favorite;
mod notification;

pub struct RewardsStore {
    conn: Connection,
}

impl RewardsStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> RewardsResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> RewardsResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order. Safe to run more than once.
    pub fn migrate(&self) -> RewardsResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_categories.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/003_notifications.sql"))?;
        Ok(())
    }
}
