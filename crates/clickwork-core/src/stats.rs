//! Stat aggregation: folding every modifier source into one stat vector
//!
//! Boosts, equipped items, skills, buffs, and prestige all speak the same
//! language: a [`StatBonus`] contribution that lowers into a typed
//! [`StatDelta`]. The aggregator merges deltas field by field and then
//! applies the combination rules (floors included) to produce the
//! [`StatVector`] the rest of the engine reads.

use crate::catalog::{BoostKind, Catalog};
use crate::player::Player;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single modifier contribution, as carried by catalog definitions and
/// buffs. The set is closed: adding a new kind of bonus means adding a
/// variant here, not a new dictionary key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatBonus {
    /// Flat addition to click power
    ClickAdd(f64),
    /// Percentage addition to click power
    ClickPct(f64),
    /// Percentage addition to the reward multiplier
    RewardPct(f64),
    /// Percentage addition to the passive multiplier
    PassivePct(f64),
    /// Percentage reduction of an order's click requirement
    RequirementPct(f64),
    /// Flat addition to the per-second click limit
    RateLimitAdd(i64),
    /// Percentage addition to XP gained from orders
    XpPct(f64),
}

impl StatBonus {
    /// Lower this contribution into a partial stat delta
    pub fn delta(&self) -> StatDelta {
        let mut delta = StatDelta::default();
        match *self {
            StatBonus::ClickAdd(v) => delta.click_add = v,
            StatBonus::ClickPct(v) => delta.click_pct = v,
            StatBonus::RewardPct(v) => delta.reward_pct = v,
            StatBonus::PassivePct(v) => delta.passive_pct = v,
            StatBonus::RequirementPct(v) => delta.requirement_pct = v,
            StatBonus::RateLimitAdd(v) => delta.rate_limit_add = v,
            StatBonus::XpPct(v) => delta.xp_pct = v,
        }
        delta
    }
}

/// Typed accumulator for modifier contributions.
///
/// Folding is plain per-field addition; there is no ordering sensitivity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatDelta {
    pub click_add: f64,
    pub click_pct: f64,
    pub reward_pct: f64,
    pub passive_pct: f64,
    pub requirement_pct: f64,
    pub rate_limit_add: i64,
    pub xp_pct: f64,
}

impl StatDelta {
    /// Merge another delta into this one
    pub fn merge(&mut self, other: StatDelta) {
        self.click_add += other.click_add;
        self.click_pct += other.click_pct;
        self.reward_pct += other.reward_pct;
        self.passive_pct += other.passive_pct;
        self.requirement_pct += other.requirement_pct;
        self.rate_limit_add += other.rate_limit_add;
        self.xp_pct += other.xp_pct;
    }

    /// Scale every field by a factor (used for per-level contributions)
    pub fn scaled(mut self, factor: f64) -> Self {
        self.click_add *= factor;
        self.click_pct *= factor;
        self.reward_pct *= factor;
        self.passive_pct *= factor;
        self.requirement_pct *= factor;
        self.rate_limit_add = (self.rate_limit_add as f64 * factor) as i64;
        self.xp_pct *= factor;
        self
    }
}

/// The derived stats of a player at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatVector {
    /// Progress units added to an active order per click. Always >= 1.
    pub click_power: i64,
    /// Multiplier applied to order rewards. Never negative.
    pub reward_multiplier: f64,
    /// Multiplier applied to passive team income. Never negative; unlike the
    /// reward multiplier it has no floor at 1.0 and can legitimately be 0.
    pub passive_multiplier: f64,
    /// Fractional reduction of new orders' click requirements. Never
    /// negative: a negative reduction would inflate requirements and is
    /// clamped out.
    pub requirement_reduction: f64,
    /// Flat addition to the per-second click limit
    pub rate_limit_bonus: i64,
    /// Fractional bonus to XP gained from orders
    pub xp_bonus: f64,
}

/// Compute a player's effective stats from every owned modifier source.
///
/// Read-with-cleanup: buffs that expired before `now` are removed from the
/// player as a side effect of this call. There is no background scheduler,
/// so this lazy purge is the only expiry path; callers must expect the
/// mutation.
pub fn compute_stats(player: &mut Player, catalog: &Catalog, now: DateTime<Utc>) -> StatVector {
    player.purge_expired_buffs(now);

    let mut acc = StatDelta::default();

    // Boosts: level * step, typed by the boost kind.
    for (code, &level) in &player.boosts {
        let Some(boost) = catalog.boost(code) else {
            continue;
        };
        let step = boost.step_value * level as f64;
        let bonus = match boost.kind {
            BoostKind::ClickPower => StatBonus::ClickAdd(step),
            BoostKind::Reward => StatBonus::RewardPct(step),
            BoostKind::Passive => StatBonus::PassivePct(step),
        };
        acc.merge(bonus.delta());
    }

    // Equipment: only equipped items contribute; owning is not enough.
    for item_code in player.equipped.values() {
        if let Some(item) = catalog.item(item_code) {
            acc.merge(item.bonus.delta());
        }
    }

    // Skills: per-level bonus scaled by the trained level.
    for (code, &level) in &player.skills {
        if let Some(skill) = catalog.skill(code) {
            acc.merge(skill.bonus_per_level.delta().scaled(level as f64));
        }
    }

    // Buffs: already pruned, everything left is live.
    for buff in &player.buffs {
        acc.merge(buff.bonus.delta());
    }

    // Prestige: a permanent percentage on both income paths.
    if player.prestige_pct != 0.0 {
        acc.merge(StatBonus::RewardPct(player.prestige_pct).delta());
        acc.merge(StatBonus::PassivePct(player.prestige_pct).delta());
    }

    let click_power = crate::formula::round_i64(
        (player.click_power_base as f64 + acc.click_add) * (1.0 + acc.click_pct),
    );

    StatVector {
        click_power: click_power.max(1),
        reward_multiplier: (1.0 + player.reward_offset + acc.reward_pct).max(0.0),
        passive_multiplier: (1.0 + player.passive_offset + acc.passive_pct).max(0.0),
        requirement_reduction: acc.requirement_pct.max(0.0),
        rate_limit_bonus: acc.rate_limit_add,
        xp_bonus: acc.xp_pct.max(0.0),
    }
}
