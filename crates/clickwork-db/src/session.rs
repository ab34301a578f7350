//! Game session: catalog + config + store behind the transport-facing verbs
//!
//! Each method is one logical player action: load the aggregate, settle the
//! passive-income touchpoint, run the engine operation, and commit the
//! mutated aggregate together with every log entry the action produced in a
//! single write transaction. The surrounding transport is expected to
//! serialize actions per player; the session adds no locking of its own.

use crate::error::{Error, Result};
use crate::store::GameStore;
use chrono::{DateTime, Utc};
use clickwork_core::{
    ActionResult, AssignOutcome, CancelOutcome, Catalog, ClickOutcome, DailyOutcome, DefId,
    EconomyEntry, Engine, EngineConfig, EquipOutcome, ItemPurchaseOutcome, Player, PlayerId,
    PurchaseOutcome, StatVector,
};

/// The engine bound to its catalog, tunables, and store.
pub struct GameSession {
    store: GameStore,
    catalog: Catalog,
    config: EngineConfig,
}

impl GameSession {
    /// Create a session with default tunables.
    pub fn new(store: GameStore, catalog: Catalog) -> Self {
        Self::with_config(store, catalog, EngineConfig::default())
    }

    /// Create a session with explicit tunables.
    pub fn with_config(store: GameStore, catalog: Catalog, config: EngineConfig) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    /// The underlying store (for audit reads).
    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// The catalog this session serves.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn engine(&self) -> Engine<'_> {
        Engine::with_config(&self.catalog, self.config.clone())
    }

    /// Fetch or create a player. Idempotent; an existing player gets their
    /// passive income settled as a side effect.
    pub fn get_or_create_player(
        &self,
        id: PlayerId,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Player> {
        let engine = self.engine();
        let mut player = match self.store.load_player(id)? {
            Some(player) => player,
            None => engine.create_player(id, name, now),
        };
        let touched = engine.touch(&mut player, now);
        self.store.commit_action(&mut player, &touched.entries)?;
        Ok(player)
    }

    /// Current effective stats for an existing player. Commits, since the
    /// stat read settles accrual and may purge expired buffs.
    pub fn compute_stats(&self, id: PlayerId, now: DateTime<Utc>) -> Result<StatVector> {
        let engine = self.engine();
        let mut player = self.load_existing(id)?;
        let touched = engine.touch(&mut player, now);
        let stats = engine.compute_stats(&mut player, now);
        self.store.commit_action(&mut player, &touched.entries)?;
        Ok(stats)
    }

    /// Take an order.
    pub fn assign_order(
        &self,
        id: PlayerId,
        order_code: &DefId,
        now: DateTime<Utc>,
    ) -> Result<ActionResult<AssignOutcome>> {
        self.run(id, now, |engine, player| {
            engine.assign_order(player, order_code, now).map_err(Error::from)
        })
    }

    /// Apply one click to the active order.
    pub fn apply_click(&self, id: PlayerId, now: DateTime<Utc>) -> Result<ActionResult<ClickOutcome>> {
        self.run(id, now, |engine, player| Ok(engine.apply_click(player, now)))
    }

    /// Cancel the active order.
    pub fn cancel_order(&self, id: PlayerId, now: DateTime<Utc>) -> Result<ActionResult<CancelOutcome>> {
        self.run(id, now, |engine, player| Ok(engine.cancel_order(player)))
    }

    /// Buy the next level of a boost.
    pub fn purchase_boost(
        &self,
        id: PlayerId,
        boost_code: &DefId,
        now: DateTime<Utc>,
    ) -> Result<ActionResult<PurchaseOutcome>> {
        self.run(id, now, |engine, player| {
            engine.purchase_boost(player, boost_code, now).map_err(Error::from)
        })
    }

    /// Buy an equipment item.
    pub fn purchase_item(
        &self,
        id: PlayerId,
        item_code: &DefId,
        now: DateTime<Utc>,
    ) -> Result<ActionResult<ItemPurchaseOutcome>> {
        self.run(id, now, |engine, player| {
            engine.purchase_item(player, item_code, now).map_err(Error::from)
        })
    }

    /// Equip an owned item.
    pub fn equip_item(
        &self,
        id: PlayerId,
        item_code: &DefId,
        now: DateTime<Utc>,
    ) -> Result<ActionResult<EquipOutcome>> {
        self.run(id, now, |engine, player| {
            engine.equip_item(player, item_code).map_err(Error::from)
        })
    }

    /// Hire or level up a team member.
    pub fn upgrade_team_member(
        &self,
        id: PlayerId,
        member_code: &DefId,
        now: DateTime<Utc>,
    ) -> Result<ActionResult<PurchaseOutcome>> {
        self.run(id, now, |engine, player| {
            engine
                .upgrade_team_member(player, member_code, now)
                .map_err(Error::from)
        })
    }

    /// Claim the daily bonus.
    pub fn claim_daily_bonus(&self, id: PlayerId, now: DateTime<Utc>) -> Result<ActionResult<DailyOutcome>> {
        self.run(id, now, |engine, player| {
            Ok(engine.claim_daily_bonus(player, now))
        })
    }

    /// Unlocked achievements not yet surfaced to the player. Marks them
    /// notified, so each unlock is reported exactly once.
    pub fn take_unnotified_achievements(&self, id: PlayerId) -> Result<Vec<DefId>> {
        let mut player = self.load_existing(id)?;
        let pending = clickwork_core::achievements::take_unnotified(&mut player);
        if !pending.is_empty() {
            self.store.commit_action(&mut player, &[])?;
        }
        Ok(pending)
    }

    /// Economy-log entries for one player, oldest first.
    pub fn logs_for_player(&self, id: PlayerId) -> Result<Vec<EconomyEntry>> {
        self.store.logs_for_player(id)
    }

    fn load_existing(&self, id: PlayerId) -> Result<Player> {
        self.store.load_player(id)?.ok_or(Error::PlayerNotFound(id))
    }

    /// Run one action: touch, operate, commit everything together.
    fn run<T>(
        &self,
        id: PlayerId,
        now: DateTime<Utc>,
        op: impl FnOnce(&Engine<'_>, &mut Player) -> Result<ActionResult<T>>,
    ) -> Result<ActionResult<T>> {
        let engine = self.engine();
        let mut player = self.load_existing(id)?;

        let mut combined = ActionResult::new(());
        combined.absorb(engine.touch(&mut player, now));
        let outcome = combined.absorb(op(&engine, &mut player)?);

        let mut result = ActionResult::new(outcome);
        result.entries = combined.entries;
        result.unlocked = combined.unlocked;

        self.store.commit_action(&mut player, &result.entries)?;
        Ok(result)
    }
}
