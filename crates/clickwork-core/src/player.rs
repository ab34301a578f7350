//! Player state: the single aggregate every action reads and mutates

use crate::catalog::Slot;
use crate::order::OrderAssignment;
use crate::stats::StatBonus;
use crate::{formula, DefId, PlayerId};
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Monotonic lifetime counters, the authoritative inputs for achievements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeStats {
    /// Click actions performed
    pub clicks: u64,
    /// Orders brought to completion
    pub orders_completed: u64,
    /// Passive income ever credited
    pub passive_collected: i64,
    /// Daily bonuses claimed
    pub daily_claims: u64,
}

/// A time-bounded stat bonus. Expiry is lazy: expired buffs are purged the
/// next time stats are computed, not by a timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub code: DefId,
    pub bonus: StatBonus,
    pub expires_at: DateTime<Utc>,
}

/// Per-achievement bookkeeping.
///
/// `progress` is recomputed from lifetime state on every evaluation;
/// `unlocked_at` is set exactly once and never cleared; `notified` lets the
/// caller surface each unlock exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub progress: i64,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub notified: bool,
}

/// A player and everything they own.
///
/// Invariants upheld by the engine:
/// - `balance >= 0` (debits are guarded, never blind)
/// - `level >= 1` and `xp < xp_required(level)` (rollover is normalized
///   immediately inside [`Player::grant_xp`])
/// - at most one [`OrderAssignment`] in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub balance: i64,
    pub click_power_base: i64,
    /// Base reward-multiplier offset, before modifier contributions
    pub reward_offset: f64,
    /// Base passive-multiplier offset, before modifier contributions
    pub passive_offset: f64,
    pub level: u32,
    pub xp: i64,
    /// Permanent prestige percentage (earning it is outside the engine)
    pub prestige_pct: f64,
    /// Last touchpoint; drives offline passive accrual
    pub last_seen: DateTime<Utc>,
    pub daily_bonus_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub lifetime: LifetimeStats,
    /// Owned boost levels (absent = level 0)
    pub boosts: IndexMap<DefId, u32>,
    /// Items ever purchased
    pub inventory: IndexSet<DefId>,
    /// Equipped item per slot (at most one)
    pub equipped: IndexMap<Slot, DefId>,
    /// Hired team member levels (absent = not hired)
    pub team: IndexMap<DefId, u32>,
    /// Trained skill levels
    pub skills: IndexMap<DefId, u32>,
    /// Live time-bounded buffs
    pub buffs: Vec<Buff>,
    /// Current or most recent order assignment
    pub order: Option<OrderAssignment>,
    /// Achievement bookkeeping per definition code
    pub achievements: IndexMap<DefId, AchievementProgress>,
    /// Next economy-log sequence number for this player
    pub log_seq: u64,
}

impl Player {
    /// Create a fresh player with the configured starting balance
    pub fn new(id: PlayerId, name: impl Into<String>, starting_balance: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            balance: starting_balance,
            click_power_base: 1,
            reward_offset: 0.0,
            passive_offset: 0.0,
            level: 1,
            xp: 0,
            prestige_pct: 0.0,
            last_seen: now,
            daily_bonus_at: None,
            created_at: now,
            lifetime: LifetimeStats::default(),
            boosts: IndexMap::new(),
            inventory: IndexSet::new(),
            equipped: IndexMap::new(),
            team: IndexMap::new(),
            skills: IndexMap::new(),
            buffs: Vec::new(),
            order: None,
            achievements: IndexMap::new(),
            log_seq: 0,
        }
    }

    /// Add XP and roll levels over while thresholds are crossed.
    ///
    /// Loops rather than branching once: a single large grant can cross
    /// several levels. Returns the number of levels gained.
    pub fn grant_xp(&mut self, amount: i64) -> u32 {
        self.xp += amount;
        let before = self.level;
        while self.xp >= formula::xp_required(self.level) {
            self.xp -= formula::xp_required(self.level);
            self.level += 1;
        }
        self.level - before
    }

    /// XP accumulated toward the next level and the threshold to reach it
    pub fn xp_progress(&self) -> (i64, i64) {
        (self.xp, formula::xp_required(self.level))
    }

    /// Owned level of a boost (0 = not purchased)
    pub fn boost_level(&self, code: &DefId) -> u32 {
        self.boosts.get(code).copied().unwrap_or(0)
    }

    /// Hired level of a team member (0 = not hired)
    pub fn team_level(&self, code: &DefId) -> u32 {
        self.team.get(code).copied().unwrap_or(0)
    }

    /// Trained level of a skill (0 = untrained)
    pub fn skill_level(&self, code: &DefId) -> u32 {
        self.skills.get(code).copied().unwrap_or(0)
    }

    /// Whether the item has ever been purchased
    pub fn owns_item(&self, code: &DefId) -> bool {
        self.inventory.contains(code)
    }

    /// The item equipped in a slot, if any
    pub fn equipped_in(&self, slot: Slot) -> Option<&DefId> {
        self.equipped.get(&slot)
    }

    /// The in-progress order assignment, if any
    pub fn active_order(&self) -> Option<&OrderAssignment> {
        self.order.as_ref().filter(|o| o.is_active())
    }

    /// Mutable access to the in-progress order assignment
    pub fn active_order_mut(&mut self) -> Option<&mut OrderAssignment> {
        self.order.as_mut().filter(|o| o.is_active())
    }

    /// Whether an order is currently in progress
    pub fn has_active_order(&self) -> bool {
        self.active_order().is_some()
    }

    /// Guarded debit: subtracts `cost` only when the balance covers it.
    /// Returns false (and leaves the balance untouched) otherwise.
    pub fn try_debit(&mut self, cost: i64) -> bool {
        if self.balance < cost {
            return false;
        }
        self.balance -= cost;
        true
    }

    /// Credit the balance
    pub fn credit(&mut self, amount: i64) {
        self.balance += amount;
    }

    /// Attach a time-bounded buff
    pub fn add_buff(&mut self, buff: Buff) {
        self.buffs.push(buff);
    }

    /// Drop buffs whose expiry is at or before `now`
    pub fn purge_expired_buffs(&mut self, now: DateTime<Utc>) {
        self.buffs.retain(|b| b.expires_at > now);
    }
}
