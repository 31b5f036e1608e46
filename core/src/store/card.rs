use super::RewardsStore;
use crate::{
    error::RewardsResult,
    model::{Bonus, Card},
};
use rusqlite::{params, Connection, OptionalExtension};

impl RewardsStore {
    /// Insert a card and its bonuses atomically.
    pub fn insert_card(&self, user_id: &str, card: &Card) -> RewardsResult<()> {
        self.insert_cards(user_id, std::slice::from_ref(card))
    }

    /// Insert several cards in one transaction. Either all land or none do.
    pub fn insert_cards(&self, user_id: &str, cards: &[Card]) -> RewardsResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for card in cards {
            insert_card_row(&tx, user_id, card)?;
            insert_bonuses(&tx, user_id, &card.id, &card.bonuses)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Replace a card's fields and bonus list. Returns false if the card
    /// does not exist for this user. Insertion position is kept.
    pub fn update_card(&self, user_id: &str, card: &Card) -> RewardsResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE card
             SET name = ?1, issuer = ?2, default_rate = ?3, image_url = ?4
             WHERE card_id = ?5 AND user_id = ?6",
            params![
                card.name,
                card.issuer,
                card.default_rate,
                card.image_url,
                card.id,
                user_id,
            ],
        )?;
        if changed == 0 {
            return Ok(false);
        }
        tx.execute(
            "DELETE FROM bonus WHERE card_id = ?1 AND user_id = ?2",
            params![card.id, user_id],
        )?;
        insert_bonuses(&tx, user_id, &card.id, &card.bonuses)?;
        tx.commit()?;
        Ok(true)
    }

    /// Delete a card. Its bonuses go with it (ON DELETE CASCADE).
    pub fn delete_card(&self, user_id: &str, card_id: &str) -> RewardsResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM card WHERE card_id = ?1 AND user_id = ?2",
            params![card_id, user_id],
        )?;
        Ok(changed > 0)
    }

    pub fn get_card(&self, user_id: &str, card_id: &str) -> RewardsResult<Option<Card>> {
        let card = self
            .conn
            .query_row(
                "SELECT card_id, name, issuer, default_rate, image_url
                 FROM card WHERE card_id = ?1 AND user_id = ?2",
                params![card_id, user_id],
                card_from_row,
            )
            .optional()?;

        match card {
            Some(mut card) => {
                card.bonuses = self.bonuses_for_card(user_id, &card.id)?;
                Ok(Some(card))
            }
            None => Ok(None),
        }
    }

    /// All of a user's cards, in the order they were added.
    pub fn list_cards(&self, user_id: &str) -> RewardsResult<Vec<Card>> {
        let mut stmt = self.conn.prepare(
            "SELECT card_id, name, issuer, default_rate, image_url
             FROM card WHERE user_id = ?1
             ORDER BY seq ASC",
        )?;
        let mut cards = stmt
            .query_map(params![user_id], card_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        for card in &mut cards {
            card.bonuses = self.bonuses_for_card(user_id, &card.id)?;
        }
        Ok(cards)
    }

    pub fn card_count(&self, user_id: &str) -> RewardsResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM card WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn bonus_count(&self, user_id: &str, card_id: &str) -> RewardsResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM bonus WHERE card_id = ?1 AND user_id = ?2",
            params![card_id, user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn bonuses_for_card(&self, user_id: &str, card_id: &str) -> RewardsResult<Vec<Bonus>> {
        let mut stmt = self.conn.prepare(
            "SELECT bonus_id, category, rate, reward_type, start_date, end_date, rotating, notes
             FROM bonus WHERE card_id = ?1 AND user_id = ?2
             ORDER BY position ASC",
        )?;
        let bonuses = stmt
            .query_map(params![card_id, user_id], |row| {
                let reward_type: String = row.get(3)?;
                Ok(Bonus {
                    id:          row.get(0)?,
                    category:    row.get(1)?,
                    rate:        row.get(2)?,
                    // The CHECK constraint keeps this column to the two known values.
                    reward_type: reward_type.parse().unwrap_or_default(),
                    start_date:  row.get(4)?,
                    end_date:    row.get(5)?,
                    rotating:    row.get::<_, i64>(6)? != 0,
                    notes:       row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bonuses)
    }
}

fn card_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id:           row.get(0)?,
        name:         row.get(1)?,
        issuer:       row.get(2)?,
        default_rate: row.get(3)?,
        image_url:    row.get(4)?,
        bonuses:      Vec::new(),
    })
}

fn insert_card_row(conn: &Connection, user_id: &str, card: &Card) -> RewardsResult<()> {
    conn.execute(
        "INSERT INTO card (card_id, user_id, name, issuer, default_rate, image_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            card.id,
            user_id,
            card.name,
            card.issuer,
            card.default_rate,
            card.image_url,
        ],
    )?;
    Ok(())
}

fn insert_bonuses(conn: &Connection, user_id: &str, card_id: &str, bonuses: &[Bonus]) -> RewardsResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO bonus (
            user_id, card_id, bonus_id, position, category, rate, reward_type,
            start_date, end_date, rotating, notes
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )?;
    for (position, bonus) in bonuses.iter().enumerate() {
        stmt.execute(params![
            user_id,
            card_id,
            bonus.id,
            position as i64,
            bonus.category,
            bonus.rate,
            bonus.reward_type.as_str(),
            bonus.start_date,
            bonus.end_date,
            if bonus.rotating { 1i64 } else { 0i64 },
            bonus.notes,
        ])?;
    }
    Ok(())
}
