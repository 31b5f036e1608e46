//! The wallet: one user's cards, categories and favorites, wired to a
//! store and a clock.
//!
//! Every request re-reads the user's data from the store and only then
//! computes. Nothing is cached between requests, so a ranking never sees
//! a half-applied write.

use crate::{
    category::{discover_category_names, CategoryCatalog},
    clock::Clock,
    config::RewardsConfig,
    error::{RewardsError, RewardsResult},
    expiry::find_expiring_bonuses,
    favorites::FavoriteRepository,
    model::{Card, Category, ExpiryNotice, MatchResult},
    ranking::find_best_cards,
    store::RewardsStore,
    types::{CategoryId, UserId},
    validation::ensure_valid_card,
};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Cards and categories as read at the start of a request.
#[derive(Debug, Clone)]
pub struct WalletSnapshot {
    pub cards:      Vec<Card>,
    pub catalog:    CategoryCatalog,
    /// Custom categories created by this load from unmatched bonus names.
    pub discovered: Vec<Category>,
}

pub struct WalletBuilder {
    user_id: UserId,
    store:   RewardsStore,
    config:  RewardsConfig,
    clock:   Option<Box<dyn Clock>>,
}

impl WalletBuilder {
    pub fn config(mut self, config: RewardsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Fails with MissingClock when no clock was supplied.
    pub fn build(self) -> RewardsResult<Wallet> {
        let clock = self.clock.ok_or(RewardsError::MissingClock)?;
        Ok(Wallet {
            user_id: self.user_id,
            store:   self.store,
            config:  self.config,
            clock,
        })
    }
}

pub struct Wallet {
    user_id: UserId,
    store:   RewardsStore,
    config:  RewardsConfig,
    clock:   Box<dyn Clock>,
}

impl Wallet {
    /// Start building a wallet for `user_id` over a migrated store.
    /// Config defaults to the built-in catalog; a clock is required.
    pub fn builder(user_id: impl Into<UserId>, store: RewardsStore) -> WalletBuilder {
        WalletBuilder {
            user_id: user_id.into(),
            store,
            config: RewardsConfig::builtin(),
            clock: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn store(&self) -> &RewardsStore {
        &self.store
    }

    /// Give the store back, e.g. to rebuild the wallet with another clock.
    pub fn into_store(self) -> RewardsStore {
        self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Read cards and categories, promoting unmatched bonus category names
    /// to custom categories. A second load with unchanged data creates nothing.
    pub fn load(&self) -> RewardsResult<WalletSnapshot> {
        let cards = self.store.list_cards(&self.user_id)?;
        let custom = self.store.list_custom_categories(&self.user_id)?;
        let mut catalog = CategoryCatalog::new(&self.config, custom);

        let names = discover_category_names(&catalog, &cards);
        let discovered = catalog.absorb_discovered(
            &names,
            &self.config.custom_icon,
            &self.config.custom_color,
        );
        if !discovered.is_empty() {
            self.store.insert_custom_categories(&self.user_id, &discovered)?;
            log::info!(
                "wallet: user={} discovered {} custom categories from bonus data",
                self.user_id,
                discovered.len()
            );
        }

        Ok(WalletSnapshot { cards, catalog, discovered })
    }

    // ── Cards ──────────────────────────────────────────────────

    pub fn cards(&self) -> RewardsResult<Vec<Card>> {
        self.store.list_cards(&self.user_id)
    }

    pub fn card(&self, card_id: &str) -> RewardsResult<Card> {
        self.store
            .get_card(&self.user_id, card_id)?
            .ok_or_else(|| RewardsError::CardNotFound { card_id: card_id.to_string() })
    }

    pub fn add_card(&self, card: Card) -> RewardsResult<Card> {
        ensure_valid_card(&card)?;
        self.store.insert_card(&self.user_id, &card)?;
        log::info!(
            "wallet: user={} added card {} ({} bonuses)",
            self.user_id, card.id, card.bonuses.len()
        );
        Ok(card)
    }

    /// Validate every card, then store them all in one transaction.
    /// Nothing is stored if any card is invalid or any insert fails.
    pub fn add_cards(&self, cards: Vec<Card>) -> RewardsResult<Vec<Card>> {
        for card in &cards {
            ensure_valid_card(card)?;
        }
        self.store.insert_cards(&self.user_id, &cards)?;
        log::info!("wallet: user={} added {} cards", self.user_id, cards.len());
        Ok(cards)
    }

    pub fn update_card(&self, card: &Card) -> RewardsResult<()> {
        ensure_valid_card(card)?;
        if !self.store.update_card(&self.user_id, card)? {
            return Err(RewardsError::CardNotFound { card_id: card.id.clone() });
        }
        log::debug!("wallet: user={} updated card {}", self.user_id, card.id);
        Ok(())
    }

    pub fn delete_card(&self, card_id: &str) -> RewardsResult<()> {
        if !self.store.delete_card(&self.user_id, card_id)? {
            return Err(RewardsError::CardNotFound { card_id: card_id.to_string() });
        }
        log::info!("wallet: user={} deleted card {card_id}", self.user_id);
        Ok(())
    }

    // ── Ranking and expiry ─────────────────────────────────────

    /// Rank every card for a category as of today. A name that matches a
    /// known category is resolved to its canonical spelling first; any
    /// other name is used as given.
    pub fn best_cards(&self, category: &str) -> RewardsResult<Vec<MatchResult>> {
        let snapshot = self.load()?;
        let requested = snapshot
            .catalog
            .resolve(category)
            .map(|c| c.name.as_str())
            .unwrap_or(category);
        Ok(find_best_cards(&snapshot.cards, requested, self.today()))
    }

    /// Bonuses ending today or tomorrow. With `deliver_once`, notices
    /// already recorded for this user are dropped and the rest recorded.
    pub fn expiring_notices(&self, deliver_once: bool) -> RewardsResult<Vec<ExpiryNotice>> {
        let today = self.today();
        let cards = self.store.list_cards(&self.user_id)?;
        let notices = find_expiring_bonuses(&cards, today);
        if !deliver_once {
            return Ok(notices);
        }

        let mut fresh = Vec::with_capacity(notices.len());
        for notice in notices {
            if self.store.record_notification(&self.user_id, &notice.dedupe_key(), today)? {
                fresh.push(notice);
            } else {
                log::debug!(
                    "wallet: user={} notice {} already delivered",
                    self.user_id,
                    notice.dedupe_key()
                );
            }
        }
        Ok(fresh)
    }

    // ── Categories ─────────────────────────────────────────────

    /// All known categories, favorites first.
    pub fn categories(&self) -> RewardsResult<Vec<Category>> {
        let snapshot = self.load()?;
        let favorites = self.favorites()?;
        Ok(snapshot.catalog.ordered(&favorites).into_iter().cloned().collect())
    }

    pub fn add_category(&self, name: &str, icon: Option<&str>, color: Option<&str>) -> RewardsResult<Category> {
        let mut catalog = self.load()?.catalog;
        let category = catalog.add_custom(
            name,
            icon.unwrap_or(&self.config.custom_icon),
            color.unwrap_or(&self.config.custom_color),
        )?;
        self.store.insert_custom_category(&self.user_id, &category)?;
        Ok(category)
    }

    pub fn rename_category(&self, category_id: &str, new_name: &str) -> RewardsResult<Category> {
        let mut catalog = self.load()?.catalog;
        let category = catalog.rename_custom(category_id, new_name)?;
        self.store.update_custom_category(&self.user_id, &category)?;
        Ok(category)
    }

    /// Remove a custom category. If bonuses still use its name, the next
    /// load discovers it again under a new id.
    pub fn delete_category(&self, category_id: &str) -> RewardsResult<Category> {
        let mut catalog = self.load()?.catalog;
        let category = catalog.remove_custom(category_id)?;
        self.store.delete_custom_category(&self.user_id, category_id)?;
        Ok(category)
    }

    pub fn favorites(&self) -> RewardsResult<HashSet<CategoryId>> {
        self.store.favorites(&self.user_id)
    }

    /// Flip a known category's favorite status. Returns the new status.
    pub fn toggle_favorite(&mut self, category_id: &str) -> RewardsResult<bool> {
        let catalog = self.load()?.catalog;
        if catalog.get(category_id).is_none() {
            return Err(RewardsError::CategoryNotFound { category_id: category_id.to_string() });
        }
        let user_id = self.user_id.clone();
        self.store.toggle_favorite(&user_id, category_id)
    }
}
