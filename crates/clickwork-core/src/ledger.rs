//! Economy log: the append-only record of balance-affecting events
//!
//! Entries are immutable once written; the persistence layer inserts them
//! and never updates or deletes. Aggregate analytics over the log live in
//! the audit crate.

use crate::PlayerId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a balance-affecting event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Reward paid for a completed order
    OrderReward,
    /// Boost purchase or level-up
    BoostPurchase,
    /// Equipment purchase
    ItemPurchase,
    /// Team member hire or level-up
    TeamUpgrade,
    /// Lazily accrued offline/idle income
    PassiveIncome,
    /// Daily bonus claim
    DailyBonus,
}

impl EntryKind {
    /// Stable tag used in storage and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::OrderReward => "order_reward",
            EntryKind::BoostPurchase => "boost_purchase",
            EntryKind::ItemPurchase => "item_purchase",
            EntryKind::TeamUpgrade => "team_upgrade",
            EntryKind::PassiveIncome => "passive_income",
            EntryKind::DailyBonus => "daily_bonus",
        }
    }

    /// Parse a stored tag
    pub fn parse(s: &str) -> Option<EntryKind> {
        match s {
            "order_reward" => Some(EntryKind::OrderReward),
            "boost_purchase" => Some(EntryKind::BoostPurchase),
            "item_purchase" => Some(EntryKind::ItemPurchase),
            "team_upgrade" => Some(EntryKind::TeamUpgrade),
            "passive_income" => Some(EntryKind::PassiveIncome),
            "daily_bonus" => Some(EntryKind::DailyBonus),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Free-form entry metadata: order code, level reached, elapsed seconds, ...
pub type MetaMap = IndexMap<String, String>;

/// One balance-affecting event. Credits carry positive amounts, purchases
/// negative ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyEntry {
    pub player: PlayerId,
    pub kind: EntryKind,
    pub amount: i64,
    pub meta: MetaMap,
    pub at: DateTime<Utc>,
}

impl EconomyEntry {
    /// Create an entry with empty metadata
    pub fn new(player: PlayerId, kind: EntryKind, amount: i64, at: DateTime<Utc>) -> Self {
        Self {
            player,
            kind,
            amount,
            meta: IndexMap::new(),
            at,
        }
    }

    /// Attach one metadata key
    pub fn with_meta(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.meta.insert(key.into(), value.to_string());
        self
    }

    /// Whether this entry credits the balance
    pub fn is_income(&self) -> bool {
        self.amount > 0
    }
}
