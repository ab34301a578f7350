//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use clickwork_core::{EconomyEntry, Player, PlayerId, Slot};
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredPlayer>().unwrap();
    models.define::<StoredBoostLevel>().unwrap();
    models.define::<StoredOwnedItem>().unwrap();
    models.define::<StoredEquippedSlot>().unwrap();
    models.define::<StoredTeamLevel>().unwrap();
    models.define::<StoredSkillLevel>().unwrap();
    models.define::<StoredAchievement>().unwrap();
    models.define::<StoredOrder>().unwrap();
    models.define::<StoredLogEntry>().unwrap();
    models
});

/// Persistent store for player aggregates and the economy log.
pub struct GameStore {
    pub(crate) db: Database<'static>,
}

impl GameStore {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Load a player aggregate: the scalar record plus every relation row.
    pub fn load_player(&self, id: PlayerId) -> Result<Option<Player>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredPlayer> = r.get().primary(id.raw())?;
        let Some(stored) = stored else {
            return Ok(None);
        };
        let mut player = stored.to_player();

        let boosts = {
            let scan = r.scan().secondary::<StoredBoostLevel>(StoredBoostLevelKey::player_id)?;
            let iter = scan.start_with(id.raw())?;
            let rows: std::result::Result<Vec<StoredBoostLevel>, _> = iter.collect();
            rows.map_err(|e| Error::Database(e.to_string()))?
        };
        for row in boosts {
            player.boosts.insert(row.code.into(), row.level);
        }

        let items = {
            let scan = r.scan().secondary::<StoredOwnedItem>(StoredOwnedItemKey::player_id)?;
            let iter = scan.start_with(id.raw())?;
            let rows: std::result::Result<Vec<StoredOwnedItem>, _> = iter.collect();
            rows.map_err(|e| Error::Database(e.to_string()))?
        };
        for row in items {
            player.inventory.insert(row.code.into());
        }

        let slots = {
            let scan = r
                .scan()
                .secondary::<StoredEquippedSlot>(StoredEquippedSlotKey::player_id)?;
            let iter = scan.start_with(id.raw())?;
            let rows: std::result::Result<Vec<StoredEquippedSlot>, _> = iter.collect();
            rows.map_err(|e| Error::Database(e.to_string()))?
        };
        for row in slots {
            if let (Some(slot), Some(item)) = (Slot::parse(&row.slot), row.item) {
                player.equipped.insert(slot, item.into());
            }
        }

        let team = {
            let scan = r.scan().secondary::<StoredTeamLevel>(StoredTeamLevelKey::player_id)?;
            let iter = scan.start_with(id.raw())?;
            let rows: std::result::Result<Vec<StoredTeamLevel>, _> = iter.collect();
            rows.map_err(|e| Error::Database(e.to_string()))?
        };
        for row in team {
            player.team.insert(row.code.into(), row.level);
        }

        let skills = {
            let scan = r.scan().secondary::<StoredSkillLevel>(StoredSkillLevelKey::player_id)?;
            let iter = scan.start_with(id.raw())?;
            let rows: std::result::Result<Vec<StoredSkillLevel>, _> = iter.collect();
            rows.map_err(|e| Error::Database(e.to_string()))?
        };
        for row in skills {
            player.skills.insert(row.code.into(), row.level);
        }

        let achievements = {
            let scan = r.scan().secondary::<StoredAchievement>(StoredAchievementKey::player_id)?;
            let iter = scan.start_with(id.raw())?;
            let rows: std::result::Result<Vec<StoredAchievement>, _> = iter.collect();
            rows.map_err(|e| Error::Database(e.to_string()))?
        };
        for row in achievements {
            let progress = row.to_progress();
            player.achievements.insert(row.code.into(), progress);
        }

        let order: Option<StoredOrder> = r.get().primary(id.raw())?;
        player.order = order.map(|o| o.to_assignment());

        Ok(Some(player))
    }

    /// Commit one action: the player's full row set plus its log entries,
    /// in a single write transaction.
    ///
    /// Log entries are sequenced from the player's `log_seq` cursor and
    /// *inserted* — an already-used sequence number aborts the whole
    /// transaction rather than silently overwriting history.
    pub fn commit_action(&self, player: &mut Player, entries: &[EconomyEntry]) -> Result<()> {
        let rw = self.db.rw_transaction()?;

        for entry in entries {
            let stored = StoredLogEntry::from_entry(player.log_seq, entry);
            player.log_seq += 1;
            rw.insert(stored)?;
        }

        rw.upsert(StoredPlayer::from_player(player))?;

        for (code, &level) in &player.boosts {
            rw.upsert(StoredBoostLevel::new(player.id, code.as_str(), level))?;
        }
        for code in &player.inventory {
            rw.upsert(StoredOwnedItem::new(player.id, code.as_str()))?;
        }
        for slot in Slot::ALL {
            let item = player.equipped_in(slot).map(|code| code.as_str());
            rw.upsert(StoredEquippedSlot::new(player.id, slot, item))?;
        }
        for (code, &level) in &player.team {
            rw.upsert(StoredTeamLevel::new(player.id, code.as_str(), level))?;
        }
        for (code, &level) in &player.skills {
            rw.upsert(StoredSkillLevel::new(player.id, code.as_str(), level))?;
        }
        for (code, record) in &player.achievements {
            rw.upsert(StoredAchievement::new(player.id, code.as_str(), record))?;
        }
        if let Some(assignment) = &player.order {
            rw.upsert(StoredOrder::from_assignment(player.id, assignment))?;
        }

        rw.commit()?;
        Ok(())
    }

    /// Economy-log entries for one player, in insertion order.
    pub fn logs_for_player(&self, id: PlayerId) -> Result<Vec<EconomyEntry>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().secondary::<StoredLogEntry>(StoredLogEntryKey::player_id)?;
        let iter = scan.start_with(id.raw())?;
        let rows: std::result::Result<Vec<StoredLogEntry>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.iter().filter_map(StoredLogEntry::to_entry).collect())
    }

    /// Every economy-log entry in the store.
    pub fn all_logs(&self) -> Result<Vec<EconomyEntry>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredLogEntry>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredLogEntry>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.iter().filter_map(StoredLogEntry::to_entry).collect())
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use clickwork_core::{EntryKind, OrderAssignment};

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_missing_player_is_none() {
        let store = GameStore::in_memory().unwrap();
        assert!(store.load_player(PlayerId::new(404)).unwrap().is_none());
    }

    #[test]
    fn test_aggregate_roundtrip() {
        let store = GameStore::in_memory().unwrap();
        let now = fixed_now();

        let mut player = Player::new(PlayerId::new(1), "Nova", 200, now);
        player.boosts.insert("click_plus_one".into(), 2);
        player.inventory.insert("laptop_t1".into());
        player.equipped.insert(Slot::Laptop, "laptop_t1".into());
        player.team.insert("junior".into(), 1);
        player.skills.insert("fast_hands".into(), 3);
        player.order = Some(OrderAssignment::new("business_card".into(), 100, 1.0, now));
        player.lifetime.clicks = 17;

        store.commit_action(&mut player, &[]).unwrap();
        let loaded = store.load_player(PlayerId::new(1)).unwrap().unwrap();
        assert_eq!(loaded, player);
    }

    #[test]
    fn test_log_entries_sequence_across_commits() {
        let store = GameStore::in_memory().unwrap();
        let now = fixed_now();
        let mut player = Player::new(PlayerId::new(1), "Nova", 200, now);

        let first = EconomyEntry::new(player.id, EntryKind::DailyBonus, 100, now);
        store.commit_action(&mut player, &[first]).unwrap();
        assert_eq!(player.log_seq, 1);

        let later = now + Duration::hours(1);
        let second = EconomyEntry::new(player.id, EntryKind::OrderReward, 60, later)
            .with_meta("order", "business_card");
        let third = EconomyEntry::new(player.id, EntryKind::BoostPurchase, -100, later);
        store.commit_action(&mut player, &[second, third]).unwrap();
        assert_eq!(player.log_seq, 3);

        let logs = store.logs_for_player(player.id).unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].kind, EntryKind::DailyBonus);
        assert_eq!(logs[1].kind, EntryKind::OrderReward);
        assert_eq!(logs[2].kind, EntryKind::BoostPurchase);
        assert_eq!(logs[1].meta.get("order").unwrap(), "business_card");
    }

    #[test]
    fn test_logs_are_per_player() {
        let store = GameStore::in_memory().unwrap();
        let now = fixed_now();

        let mut alice = Player::new(PlayerId::new(1), "Alice", 200, now);
        let mut bob = Player::new(PlayerId::new(2), "Bob", 200, now);
        let alice_id = alice.id;
        let bob_id = bob.id;
        store
            .commit_action(
                &mut alice,
                &[EconomyEntry::new(alice_id, EntryKind::DailyBonus, 100, now)],
            )
            .unwrap();
        store
            .commit_action(
                &mut bob,
                &[
                    EconomyEntry::new(bob_id, EntryKind::DailyBonus, 100, now),
                    EconomyEntry::new(bob_id, EntryKind::BoostPurchase, -100, now),
                ],
            )
            .unwrap();

        assert_eq!(store.logs_for_player(alice.id).unwrap().len(), 1);
        assert_eq!(store.logs_for_player(bob.id).unwrap().len(), 2);
        assert_eq!(store.all_logs().unwrap().len(), 3);
    }

    #[test]
    fn test_one_order_row_per_player() {
        let store = GameStore::in_memory().unwrap();
        let now = fixed_now();
        let mut player = Player::new(PlayerId::new(1), "Nova", 200, now);

        player.order = Some(OrderAssignment::new("business_card".into(), 100, 1.0, now));
        store.commit_action(&mut player, &[]).unwrap();

        // A replacement assignment overwrites the row; the store never holds
        // two assignments for one player.
        player.order = Some(OrderAssignment::new("social_cover".into(), 180, 1.0, now));
        store.commit_action(&mut player, &[]).unwrap();

        let loaded = store.load_player(player.id).unwrap().unwrap();
        assert_eq!(loaded.order.unwrap().order.as_str(), "social_cover");
    }
}
