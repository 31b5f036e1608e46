//! Domain entities: cards, their bonus rules, categories, and the
//! values the engine hands back to callers.

use crate::types::{BonusId, CardId, CategoryId, Rate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
    #[default]
    Percentage,
    Points,
}

impl RewardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardType::Percentage => "percentage",
            RewardType::Points     => "points",
        }
    }

    /// Render a rate the way it is shown to the user: "5%" or "3x points".
    pub fn format_rate(&self, rate: Rate) -> String {
        match self {
            RewardType::Percentage => format!("{}%", trim_rate(rate)),
            RewardType::Points     => format!("{}x points", trim_rate(rate)),
        }
    }
}

impl fmt::Display for RewardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" => Ok(RewardType::Percentage),
            "points"     => Ok(RewardType::Points),
            other        => Err(format!("unknown reward type: {other}")),
        }
    }
}

fn trim_rate(rate: Rate) -> String {
    if rate.fract() == 0.0 {
        format!("{rate:.0}")
    } else {
        format!("{rate}")
    }
}

/// Fresh opaque id for cards, bonuses and custom categories. Also fills
/// ids missing from deserialized input.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A category-scoped, optionally time-bounded reward rule on a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bonus {
    #[serde(default = "new_id")]
    pub id:          BonusId,
    pub category:    String,
    pub rate:        Rate,
    #[serde(default)]
    pub reward_type: RewardType,
    #[serde(default)]
    pub start_date:  Option<NaiveDate>,
    #[serde(default)]
    pub end_date:    Option<NaiveDate>,
    /// Informational only. Never consulted by ranking.
    #[serde(default)]
    pub rotating:    bool,
    #[serde(default)]
    pub notes:       String,
}

impl Bonus {
    /// An always-active percentage bonus with a fresh id.
    pub fn new(category: impl Into<String>, rate: Rate) -> Self {
        Self {
            id:          new_id(),
            category:    category.into(),
            rate,
            reward_type: RewardType::Percentage,
            start_date:  None,
            end_date:    None,
            rotating:    false,
            notes:       String::new(),
        }
    }

    pub fn with_window(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_reward_type(mut self, reward_type: RewardType) -> Self {
        self.reward_type = reward_type;
        self
    }

    pub fn rotating(mut self, rotating: bool) -> Self {
        self.rotating = rotating;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    #[serde(default = "new_id")]
    pub id:           CardId,
    pub name:         String,
    #[serde(default)]
    pub issuer:       Option<String>,
    /// Earned on every purchase not covered by an active bonus.
    pub default_rate: Rate,
    #[serde(default)]
    pub image_url:    Option<String>,
    #[serde(default)]
    pub bonuses:      Vec<Bonus>,
}

impl Card {
    pub fn new(name: impl Into<String>, default_rate: Rate) -> Self {
        Self {
            id:           new_id(),
            name:         name.into(),
            issuer:       None,
            default_rate,
            image_url:    None,
            bonuses:      Vec::new(),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_bonus(mut self, bonus: Bonus) -> Self {
        self.bonuses.push(bonus);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id:        CategoryId,
    pub name:      String,
    pub icon:      String,
    pub color:     String,
    #[serde(default)]
    pub is_custom: bool,
}

impl Category {
    /// A user-defined category with a fresh id.
    pub fn custom(name: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id:        new_id(),
            name:      name.into(),
            icon:      icon.into(),
            color:     color.into(),
            is_custom: true,
        }
    }
}

/// One ranked entry: a card and the best rate it earns for the request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub card_id:     CardId,
    pub card_name:   String,
    /// True when no active bonus matched and the card's default rate applies.
    pub is_default:  bool,
    pub rate:        Rate,
    pub reward_type: RewardType,
    pub bonus_id:    Option<BonusId>,
    pub category:    Option<String>,
    pub start_date:  Option<NaiveDate>,
    pub end_date:    Option<NaiveDate>,
}

impl MatchResult {
    pub(crate) fn from_bonus(card: &Card, bonus: &Bonus) -> Self {
        Self {
            card_id:     card.id.clone(),
            card_name:   card.name.clone(),
            is_default:  false,
            rate:        bonus.rate,
            reward_type: bonus.reward_type,
            bonus_id:    Some(bonus.id.clone()),
            category:    Some(bonus.category.clone()),
            start_date:  bonus.start_date,
            end_date:    bonus.end_date,
        }
    }

    pub(crate) fn from_default(card: &Card) -> Self {
        Self {
            card_id:     card.id.clone(),
            card_name:   card.name.clone(),
            is_default:  true,
            rate:        card.default_rate,
            reward_type: RewardType::Percentage,
            bonus_id:    None,
            category:    None,
            start_date:  None,
            end_date:    None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryWindow {
    Today,
    Tomorrow,
}

impl ExpiryWindow {
    pub fn from_days(days: i64) -> Option<Self> {
        match days {
            0 => Some(ExpiryWindow::Today),
            1 => Some(ExpiryWindow::Tomorrow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryWindow::Today    => "today",
            ExpiryWindow::Tomorrow => "tomorrow",
        }
    }
}

/// Everything a delivery layer needs to show an expiry notification and
/// route a tap back to the card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpiryNotice {
    pub card_id:     CardId,
    pub card_name:   String,
    pub bonus_id:    BonusId,
    pub category:    String,
    pub rate:        Rate,
    pub reward_type: RewardType,
    pub end_date:    NaiveDate,
    pub window:      ExpiryWindow,
}

impl ExpiryNotice {
    pub fn title(&self) -> String {
        match self.window {
            ExpiryWindow::Today    => "Bonus expires today".to_string(),
            ExpiryWindow::Tomorrow => "Bonus expires tomorrow".to_string(),
        }
    }

    pub fn body(&self) -> String {
        format!(
            "{} bonus on {} ({}) expires {}",
            self.category,
            self.card_name,
            self.reward_type.format_rate(self.rate),
            self.window.as_str(),
        )
    }

    /// Stable across repeated scans of the same data on the same day.
    pub fn dedupe_key(&self) -> String {
        format!("{}:{}:{}:{}", self.card_id, self.bonus_id, self.end_date, self.window.as_str())
    }
}
