//! The engine facade: one method per player action
//!
//! Each operation reads the player aggregate, computes derived values
//! through the formula library and stat aggregator, applies the mutation,
//! and reports what happened as an [`ActionResult`]: the business outcome
//! plus the economy-log entries produced and the achievements newly
//! unlocked. Persisting the mutated player and the entries together is the
//! caller's job (one write per action, all-or-nothing).
//!
//! Expected business outcomes (insufficient funds, nothing active, ...) are
//! enum variants, never errors. `Err` is reserved for faults: a definition
//! code that does not exist in the catalog.

use crate::achievements;
use crate::catalog::{Catalog, Metric, Slot};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::formula;
use crate::ledger::{EconomyEntry, EntryKind};
use crate::order::{OrderAssignment, OrderPhase};
use crate::passive;
use crate::player::{Buff, Player};
use crate::ratelimit;
use crate::stats::{compute_stats, StatBonus, StatVector};
use crate::{DefId, PlayerId};
use chrono::{DateTime, Duration, Utc};

/// Outcome of an action together with its side artifacts
#[derive(Debug, Clone)]
pub struct ActionResult<T> {
    pub outcome: T,
    /// Economy-log entries this action produced, in order
    pub entries: Vec<EconomyEntry>,
    /// Achievement codes newly unlocked by this action
    pub unlocked: Vec<DefId>,
}

impl<T> ActionResult<T> {
    /// Wrap an outcome with no side artifacts
    pub fn new(outcome: T) -> Self {
        Self {
            outcome,
            entries: Vec::new(),
            unlocked: Vec::new(),
        }
    }

    /// Append a log entry
    pub fn with_entry(mut self, entry: EconomyEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Fold another action's artifacts into this one, returning its outcome.
    ///
    /// Used by callers that run a touchpoint accrual and the action proper
    /// as one unit.
    pub fn absorb<U>(&mut self, other: ActionResult<U>) -> U {
        self.entries.extend(other.entries);
        self.unlocked.extend(other.unlocked);
        other.outcome
    }
}

/// Result of taking an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    Assigned { required_clicks: i64 },
    /// An assignment is already in progress
    AlreadyActive,
    /// The player has not reached the template's minimum level
    LevelTooLow { required: u32 },
}

/// Result of a click action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    NoActiveOrder,
    Progressed {
        progress: i64,
        required: i64,
        /// Whether the shell should surface a progress message (tens-bucket
        /// thresholding; purely anti-flood)
        notify: bool,
    },
    Completed {
        reward: i64,
        xp_gained: i64,
        levels_gained: u32,
    },
}

/// Result of canceling an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    Canceled,
    NoActiveOrder,
}

/// Result of a levelable purchase (boost or team member)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased { level: u32, cost: i64 },
    InsufficientFunds { cost: i64 },
}

/// Result of buying an equipment item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPurchaseOutcome {
    Purchased { cost: i64 },
    AlreadyOwned,
    InsufficientFunds { cost: i64 },
    LevelTooLow { required: u32 },
}

/// Result of equipping an owned item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipOutcome {
    Equipped { slot: Slot },
    NotOwned,
}

/// Result of claiming the daily bonus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyOutcome {
    Granted { amount: i64 },
    AlreadyClaimed { next_at: DateTime<Utc> },
}

/// The progression/economy engine.
///
/// Borrows the read-only catalog; owns its tunables. Stateless across
/// actions — all player state lives in the [`Player`] aggregate the caller
/// passes in.
pub struct Engine<'c> {
    catalog: &'c Catalog,
    config: EngineConfig,
}

impl<'c> Engine<'c> {
    /// Create an engine with default tunables
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    /// Create an engine with explicit tunables
    pub fn with_config(catalog: &'c Catalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// The catalog this engine reads
    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// The engine tunables
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a fresh player with the configured starting balance
    pub fn create_player(
        &self,
        id: PlayerId,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Player {
        Player::new(id, name, self.config.starting_balance, now)
    }

    /// Player touchpoint: settle passive income for the elapsed window.
    ///
    /// Call once per inbound action, before the action proper. The outcome
    /// is the accrued amount (zero when the window produced nothing);
    /// `last_seen` always advances.
    pub fn touch(&self, player: &mut Player, now: DateTime<Utc>) -> ActionResult<i64> {
        let stats = compute_stats(player, self.catalog, now);
        let entry = passive::accrue(
            player,
            self.catalog,
            stats.passive_multiplier,
            self.config.offline_cap(),
            now,
        );

        let mut result = ActionResult::new(0);
        if let Some(entry) = entry {
            result.outcome = entry.amount;
            result.entries.push(entry);
            result.unlocked = achievements::evaluate(
                player,
                self.catalog,
                &[Metric::PassiveCollected, Metric::Balance],
                now,
            );
        }
        result
    }

    /// Current effective stats.
    ///
    /// Read-with-cleanup: expired buffs are purged as a side effect (see
    /// [`compute_stats`]).
    pub fn compute_stats(&self, player: &mut Player, now: DateTime<Utc>) -> StatVector {
        compute_stats(player, self.catalog, now)
    }

    /// Take an order. The click requirement and reward multiplier are
    /// snapshotted from the player's current level and stats and frozen for
    /// the life of the assignment.
    pub fn assign_order(
        &self,
        player: &mut Player,
        order_code: &DefId,
        now: DateTime<Utc>,
    ) -> Result<ActionResult<AssignOutcome>> {
        let template = self
            .catalog
            .order(order_code)
            .ok_or_else(|| Error::DefinitionNotFound(order_code.clone()))?;

        if player.has_active_order() {
            return Ok(ActionResult::new(AssignOutcome::AlreadyActive));
        }
        if player.level < template.min_level {
            return Ok(ActionResult::new(AssignOutcome::LevelTooLow {
                required: template.min_level,
            }));
        }

        let stats = compute_stats(player, self.catalog, now);
        let required_clicks = formula::snapshot_required_clicks(
            template.base_clicks,
            player.level,
            stats.requirement_reduction,
        );
        player.order = Some(OrderAssignment::new(
            order_code.clone(),
            required_clicks,
            stats.reward_multiplier,
            now,
        ));

        Ok(ActionResult::new(AssignOutcome::Assigned { required_clicks }))
    }

    /// Apply one click to the active order.
    ///
    /// Completion happens in the same action as the crossing click: reward
    /// from the *snapshotted* multiplier, XP with multi-level rollover, the
    /// log entry, and achievement evaluation all land here.
    pub fn apply_click(&self, player: &mut Player, now: DateTime<Utc>) -> ActionResult<ClickOutcome> {
        let stats = compute_stats(player, self.catalog, now);

        let Some(assignment) = player.active_order_mut() else {
            return ActionResult::new(ClickOutcome::NoActiveOrder);
        };
        let notify = assignment.advance(stats.click_power);
        let progress = assignment.progress_clicks;
        let required = assignment.required_clicks;
        let reward_multiplier = assignment.reward_multiplier;
        let order_code = assignment.order.clone();
        let completed = assignment.is_complete();
        if completed {
            assignment.phase = OrderPhase::Finished;
        }

        player.lifetime.clicks += 1;

        if !completed {
            let mut result = ActionResult::new(ClickOutcome::Progressed {
                progress,
                required,
                notify,
            });
            result.unlocked =
                achievements::evaluate(player, self.catalog, &[Metric::LifetimeClicks], now);
            return result;
        }

        // The crossing click finishes the order.
        let reward = formula::reward_from_requirement(required, reward_multiplier);
        let xp_gained = formula::order_xp(required, stats.xp_bonus);
        player.credit(reward);
        let levels_gained = player.grant_xp(xp_gained);
        player.lifetime.orders_completed += 1;

        let entry = EconomyEntry::new(player.id, EntryKind::OrderReward, reward, now)
            .with_meta("order", &order_code)
            .with_meta("xp", xp_gained);

        let mut result = ActionResult::new(ClickOutcome::Completed {
            reward,
            xp_gained,
            levels_gained,
        })
        .with_entry(entry);
        result.unlocked = achievements::evaluate(
            player,
            self.catalog,
            &[
                Metric::LifetimeClicks,
                Metric::OrdersCompleted,
                Metric::Balance,
                Metric::Level,
            ],
            now,
        );
        result
    }

    /// Cancel the active order. Progress is discarded; nothing is refunded.
    pub fn cancel_order(&self, player: &mut Player) -> ActionResult<CancelOutcome> {
        match player.active_order_mut() {
            Some(assignment) => {
                assignment.phase = OrderPhase::Canceled;
                ActionResult::new(CancelOutcome::Canceled)
            }
            None => ActionResult::new(CancelOutcome::NoActiveOrder),
        }
    }

    /// Buy the next level of a boost
    pub fn purchase_boost(
        &self,
        player: &mut Player,
        boost_code: &DefId,
        now: DateTime<Utc>,
    ) -> Result<ActionResult<PurchaseOutcome>> {
        let boost = self
            .catalog
            .boost(boost_code)
            .ok_or_else(|| Error::DefinitionNotFound(boost_code.clone()))?;

        let next_level = player.boost_level(boost_code) + 1;
        let cost = formula::upgrade_cost(boost.base_cost, boost.growth, next_level);
        if !player.try_debit(cost) {
            return Ok(ActionResult::new(PurchaseOutcome::InsufficientFunds { cost }));
        }
        player.boosts.insert(boost_code.clone(), next_level);

        let entry = EconomyEntry::new(player.id, EntryKind::BoostPurchase, -cost, now)
            .with_meta("boost", boost_code)
            .with_meta("lvl", next_level);
        let mut result = ActionResult::new(PurchaseOutcome::Purchased {
            level: next_level,
            cost,
        })
        .with_entry(entry);
        result.unlocked = achievements::evaluate(player, self.catalog, &[Metric::Balance], now);
        Ok(result)
    }

    /// Buy an equipment item. Buying does not equip it.
    pub fn purchase_item(
        &self,
        player: &mut Player,
        item_code: &DefId,
        now: DateTime<Utc>,
    ) -> Result<ActionResult<ItemPurchaseOutcome>> {
        let item = self
            .catalog
            .item(item_code)
            .ok_or_else(|| Error::DefinitionNotFound(item_code.clone()))?;

        if player.owns_item(item_code) {
            return Ok(ActionResult::new(ItemPurchaseOutcome::AlreadyOwned));
        }
        if player.level < item.min_level {
            return Ok(ActionResult::new(ItemPurchaseOutcome::LevelTooLow {
                required: item.min_level,
            }));
        }
        if !player.try_debit(item.price) {
            return Ok(ActionResult::new(ItemPurchaseOutcome::InsufficientFunds {
                cost: item.price,
            }));
        }
        player.inventory.insert(item_code.clone());

        let entry = EconomyEntry::new(player.id, EntryKind::ItemPurchase, -item.price, now)
            .with_meta("item", item_code);
        let mut result =
            ActionResult::new(ItemPurchaseOutcome::Purchased { cost: item.price }).with_entry(entry);
        result.unlocked = achievements::evaluate(player, self.catalog, &[Metric::Balance], now);
        Ok(result)
    }

    /// Equip an owned item into its slot, replacing whatever was there
    pub fn equip_item(
        &self,
        player: &mut Player,
        item_code: &DefId,
    ) -> Result<ActionResult<EquipOutcome>> {
        let item = self
            .catalog
            .item(item_code)
            .ok_or_else(|| Error::DefinitionNotFound(item_code.clone()))?;

        if !player.owns_item(item_code) {
            return Ok(ActionResult::new(EquipOutcome::NotOwned));
        }
        player.equipped.insert(item.slot, item_code.clone());
        Ok(ActionResult::new(EquipOutcome::Equipped { slot: item.slot }))
    }

    /// Hire a team member, or raise their level if already hired
    pub fn upgrade_team_member(
        &self,
        player: &mut Player,
        member_code: &DefId,
        now: DateTime<Utc>,
    ) -> Result<ActionResult<PurchaseOutcome>> {
        let member = self
            .catalog
            .team_member(member_code)
            .ok_or_else(|| Error::DefinitionNotFound(member_code.clone()))?;

        let next_level = player.team_level(member_code) + 1;
        let cost = formula::upgrade_cost(member.base_cost, member.growth, next_level);
        if !player.try_debit(cost) {
            return Ok(ActionResult::new(PurchaseOutcome::InsufficientFunds { cost }));
        }
        player.team.insert(member_code.clone(), next_level);

        let entry = EconomyEntry::new(player.id, EntryKind::TeamUpgrade, -cost, now)
            .with_meta("member", member_code)
            .with_meta("lvl", next_level);
        let mut result = ActionResult::new(PurchaseOutcome::Purchased {
            level: next_level,
            cost,
        })
        .with_entry(entry);
        result.unlocked = achievements::evaluate(player, self.catalog, &[Metric::Balance], now);
        Ok(result)
    }

    /// Claim the daily bonus, once per 24 hours
    pub fn claim_daily_bonus(&self, player: &mut Player, now: DateTime<Utc>) -> ActionResult<DailyOutcome> {
        if let Some(claimed_at) = player.daily_bonus_at {
            let next_at = claimed_at + Duration::hours(24);
            if now < next_at {
                return ActionResult::new(DailyOutcome::AlreadyClaimed { next_at });
            }
        }

        let amount = self.config.daily_bonus;
        player.daily_bonus_at = Some(now);
        player.credit(amount);
        player.lifetime.daily_claims += 1;

        let entry = EconomyEntry::new(player.id, EntryKind::DailyBonus, amount, now);
        let mut result = ActionResult::new(DailyOutcome::Granted { amount }).with_entry(entry);
        result.unlocked = achievements::evaluate(
            player,
            self.catalog,
            &[Metric::DailyClaims, Metric::Balance],
            now,
        );
        result
    }

    /// Attach a time-bounded buff. Expiry is lazy: the buff drops out the
    /// first time stats are computed past `expires_at`.
    pub fn grant_buff(
        &self,
        player: &mut Player,
        code: DefId,
        bonus: StatBonus,
        duration: Duration,
        now: DateTime<Utc>,
    ) {
        player.add_buff(Buff {
            code,
            bonus,
            expires_at: now + duration,
        });
    }

    /// Re-evaluate achievements for the given changed metrics
    pub fn evaluate_achievements(
        &self,
        player: &mut Player,
        metrics: &[Metric],
        now: DateTime<Utc>,
    ) -> Vec<DefId> {
        achievements::evaluate(player, self.catalog, metrics, now)
    }

    /// Effective per-second click limit under the current stats
    pub fn click_limit(&self, stats: &StatVector) -> u32 {
        ratelimit::click_limit(
            self.config.click_rate_base,
            self.config.click_rate_max,
            stats.rate_limit_bonus,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn setup() -> (Catalog, DateTime<Utc>) {
        (Catalog::builtin(), fixed_now())
    }

    #[test]
    fn test_new_player_scenario_end_to_end() {
        // New player, balance 200, level 1. Assign the 100-click order,
        // click it down at power 1, and check every number along the way.
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "Nova", now);
        assert_eq!(player.balance, 200);

        let assigned = engine
            .assign_order(&mut player, &"business_card".into(), now)
            .unwrap();
        assert_eq!(
            assigned.outcome,
            AssignOutcome::Assigned { required_clicks: 100 }
        );

        let mut completed = None;
        for _ in 0..100 {
            let result = engine.apply_click(&mut player, now);
            if matches!(result.outcome, ClickOutcome::Completed { .. }) {
                completed = Some(result);
                break;
            }
        }
        let result = completed.expect("order completes");
        assert_eq!(
            result.outcome,
            ClickOutcome::Completed { reward: 60, xp_gained: 10, levels_gained: 0 }
        );
        assert_eq!(player.balance, 260);
        assert_eq!(player.level, 1);
        assert_eq!(player.xp, 10);
        assert_eq!(player.lifetime.orders_completed, 1);
        assert_eq!(player.lifetime.clicks, 100);

        // One reward entry, and the click/order achievements fired.
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].kind, EntryKind::OrderReward);
        assert!(result.unlocked.contains(&DefId::new("hundred_clicks")));
        assert!(result.unlocked.contains(&DefId::new("first_order")));
    }

    #[test]
    fn test_assign_rejects_second_active_order() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);

        engine
            .assign_order(&mut player, &"business_card".into(), now)
            .unwrap();
        let second = engine
            .assign_order(&mut player, &"social_cover".into(), now)
            .unwrap();
        assert_eq!(second.outcome, AssignOutcome::AlreadyActive);
    }

    #[test]
    fn test_assign_enforces_level_gate() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);

        let gated = engine
            .assign_order(&mut player, &"brand_book".into(), now)
            .unwrap();
        assert_eq!(gated.outcome, AssignOutcome::LevelTooLow { required: 5 });
    }

    #[test]
    fn test_assign_unknown_order_is_a_fault() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        assert!(engine
            .assign_order(&mut player, &"ghost_order".into(), now)
            .is_err());
    }

    #[test]
    fn test_snapshots_survive_stat_changes() {
        // Equipment bought after assignment must not alter the frozen
        // requirement or the multiplier used at completion.
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 10_000;

        engine
            .assign_order(&mut player, &"business_card".into(), now)
            .unwrap();
        let frozen_required = player.active_order().unwrap().required_clicks;
        let frozen_mul = player.active_order().unwrap().reward_multiplier;

        // Reward +9% monitor and requirement -5% tablet, bought and equipped
        // mid-order.
        for code in ["monitor_t1", "tablet_t1"] {
            engine
                .purchase_item(&mut player, &code.into(), now)
                .unwrap();
            engine.equip_item(&mut player, &code.into()).unwrap();
        }

        let assignment = player.active_order().unwrap();
        assert_eq!(assignment.required_clicks, frozen_required);
        assert_eq!(assignment.reward_multiplier, frozen_mul);

        // Complete it; reward uses the frozen multiplier (1.0 -> floor).
        let reward = loop {
            if let ClickOutcome::Completed { reward, .. } =
                engine.apply_click(&mut player, now).outcome
            {
                break reward;
            }
        };
        assert_eq!(reward, formula::reward_from_requirement(frozen_required, frozen_mul));
    }

    #[test]
    fn test_requirement_reduction_applies_at_assignment() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 10_000;

        engine
            .purchase_item(&mut player, &"tablet_t1".into(), now)
            .unwrap();
        engine.equip_item(&mut player, &"tablet_t1".into()).unwrap();

        let assigned = engine
            .assign_order(&mut player, &"business_card".into(), now)
            .unwrap();
        assert_eq!(
            assigned.outcome,
            AssignOutcome::Assigned { required_clicks: 95 }
        );
    }

    #[test]
    fn test_click_without_order() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);

        let result = engine.apply_click(&mut player, now);
        assert_eq!(result.outcome, ClickOutcome::NoActiveOrder);
        assert_eq!(player.lifetime.clicks, 0);
    }

    #[test]
    fn test_cancel_discards_progress_without_refund() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);

        engine
            .assign_order(&mut player, &"business_card".into(), now)
            .unwrap();
        engine.apply_click(&mut player, now);
        let balance_before = player.balance;

        let canceled = engine.cancel_order(&mut player);
        assert_eq!(canceled.outcome, CancelOutcome::Canceled);
        assert_eq!(player.balance, balance_before);
        assert!(!player.has_active_order());

        // Nothing left to cancel.
        let again = engine.cancel_order(&mut player);
        assert_eq!(again.outcome, CancelOutcome::NoActiveOrder);

        // And a new order can be taken.
        let assigned = engine
            .assign_order(&mut player, &"social_cover".into(), now)
            .unwrap();
        assert!(matches!(assigned.outcome, AssignOutcome::Assigned { .. }));
    }

    #[test]
    fn test_boost_purchase_cost_curve() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 1_000;

        let first = engine
            .purchase_boost(&mut player, &"click_plus_one".into(), now)
            .unwrap();
        assert_eq!(first.outcome, PurchaseOutcome::Purchased { level: 1, cost: 100 });

        let second = engine
            .purchase_boost(&mut player, &"click_plus_one".into(), now)
            .unwrap();
        assert_eq!(second.outcome, PurchaseOutcome::Purchased { level: 2, cost: 125 });

        assert_eq!(player.balance, 775);
        assert_eq!(first.entries[0].amount, -100);

        // The boost now raises click power.
        let stats = engine.compute_stats(&mut player, now);
        assert_eq!(stats.click_power, 3);
    }

    #[test]
    fn test_purchase_insufficient_funds_leaves_state_alone() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 50;

        let result = engine
            .purchase_boost(&mut player, &"click_plus_one".into(), now)
            .unwrap();
        assert_eq!(result.outcome, PurchaseOutcome::InsufficientFunds { cost: 100 });
        assert_eq!(player.balance, 50);
        assert_eq!(player.boost_level(&"click_plus_one".into()), 0);
        assert!(result.entries.is_empty());
    }

    #[test]
    fn test_item_purchase_and_repurchase() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 1_000;

        let bought = engine
            .purchase_item(&mut player, &"laptop_t1".into(), now)
            .unwrap();
        assert_eq!(bought.outcome, ItemPurchaseOutcome::Purchased { cost: 250 });

        let again = engine
            .purchase_item(&mut player, &"laptop_t1".into(), now)
            .unwrap();
        assert_eq!(again.outcome, ItemPurchaseOutcome::AlreadyOwned);
        assert_eq!(player.balance, 750);
    }

    #[test]
    fn test_item_purchase_level_gate() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 10_000;

        let gated = engine
            .purchase_item(&mut player, &"laptop_t3".into(), now)
            .unwrap();
        assert_eq!(gated.outcome, ItemPurchaseOutcome::LevelTooLow { required: 3 });
    }

    #[test]
    fn test_equip_requires_ownership() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 1_000;

        let refused = engine.equip_item(&mut player, &"laptop_t1".into()).unwrap();
        assert_eq!(refused.outcome, EquipOutcome::NotOwned);

        engine
            .purchase_item(&mut player, &"laptop_t1".into(), now)
            .unwrap();
        let equipped = engine.equip_item(&mut player, &"laptop_t1".into()).unwrap();
        assert_eq!(equipped.outcome, EquipOutcome::Equipped { slot: Slot::Laptop });
        assert_eq!(player.equipped_in(Slot::Laptop), Some(&DefId::new("laptop_t1")));
    }

    #[test]
    fn test_equip_replaces_slot_occupant() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 10_000;
        player.level = 2;

        for code in ["laptop_t1", "laptop_t2"] {
            engine.purchase_item(&mut player, &code.into(), now).unwrap();
        }
        engine.equip_item(&mut player, &"laptop_t1".into()).unwrap();
        engine.equip_item(&mut player, &"laptop_t2".into()).unwrap();

        assert_eq!(player.equipped_in(Slot::Laptop), Some(&DefId::new("laptop_t2")));
        assert_eq!(player.equipped.len(), 1);
        // Both remain owned.
        assert!(player.owns_item(&"laptop_t1".into()));
    }

    #[test]
    fn test_team_hire_then_upgrade() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 1_000;

        let hired = engine
            .upgrade_team_member(&mut player, &"junior".into(), now)
            .unwrap();
        assert_eq!(hired.outcome, PurchaseOutcome::Purchased { level: 1, cost: 100 });

        let upgraded = engine
            .upgrade_team_member(&mut player, &"junior".into(), now)
            .unwrap();
        assert_eq!(upgraded.outcome, PurchaseOutcome::Purchased { level: 2, cost: 122 });
        assert_eq!(player.team_level(&"junior".into()), 2);
    }

    #[test]
    fn test_daily_bonus_cooldown() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);

        let granted = engine.claim_daily_bonus(&mut player, now);
        assert_eq!(granted.outcome, DailyOutcome::Granted { amount: 100 });
        assert_eq!(player.balance, 300);
        assert_eq!(player.lifetime.daily_claims, 1);

        // 23h59m later: still on cooldown.
        let early = engine.claim_daily_bonus(&mut player, now + Duration::hours(24) - Duration::minutes(1));
        assert_eq!(
            early.outcome,
            DailyOutcome::AlreadyClaimed { next_at: now + Duration::hours(24) }
        );

        // Exactly 24h later: available again.
        let again = engine.claim_daily_bonus(&mut player, now + Duration::hours(24));
        assert_eq!(again.outcome, DailyOutcome::Granted { amount: 100 });
        assert_eq!(player.lifetime.daily_claims, 2);
    }

    #[test]
    fn test_touch_accrues_and_unlocks() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 1_000;
        engine
            .upgrade_team_member(&mut player, &"senior".into(), now)
            .unwrap();

        // Away for 100 hours; the 12-hour cap bounds the credit.
        let later = now + Duration::hours(100);
        let touched = engine.touch(&mut player, later);
        // 22/min * 720 min = 15840.
        assert_eq!(touched.outcome, 15_840);
        assert_eq!(touched.entries.len(), 1);
        assert!(touched.unlocked.contains(&DefId::new("passive_five_k")));
        assert!(touched.unlocked.contains(&DefId::new("ten_k_balance")));

        // Touching again immediately accrues nothing.
        let again = engine.touch(&mut player, later);
        assert_eq!(again.outcome, 0);
        assert!(again.entries.is_empty());
    }

    #[test]
    fn test_buff_boosts_then_expires() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);

        engine.grant_buff(
            &mut player,
            "deadline_rush".into(),
            StatBonus::ClickPct(1.0),
            Duration::minutes(30),
            now,
        );
        assert_eq!(engine.compute_stats(&mut player, now).click_power, 2);

        // Past expiry the buff is gone, and the read purged it.
        let later = now + Duration::minutes(31);
        assert_eq!(engine.compute_stats(&mut player, later).click_power, 1);
        assert!(player.buffs.is_empty());
    }

    #[test]
    fn test_click_limit_from_chair() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.balance = 1_000;

        let stats = engine.compute_stats(&mut player, now);
        assert_eq!(engine.click_limit(&stats), 10);

        engine
            .purchase_item(&mut player, &"chair_t1".into(), now)
            .unwrap();
        engine.equip_item(&mut player, &"chair_t1".into()).unwrap();
        let stats = engine.compute_stats(&mut player, now);
        assert_eq!(engine.click_limit(&stats), 11);
    }

    #[test]
    fn test_absorb_merges_artifacts() {
        let (catalog, now) = setup();
        let engine = Engine::new(&catalog);
        let mut player = engine.create_player(PlayerId::new(1), "A", now);
        player.team.insert("junior".into(), 1);
        player.last_seen = now - Duration::hours(1);

        let mut action = ActionResult::new(());
        let accrued = action.absorb(engine.touch(&mut player, now));
        assert_eq!(accrued, 240);
        assert_eq!(action.entries.len(), 1);
    }
}
