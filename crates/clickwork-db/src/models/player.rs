//! The stored player record.

use chrono::{DateTime, Utc};
use clickwork_core::{Buff, LifetimeStats, Player, PlayerId};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Stored player scalar state. Relations (boosts, items, team, skills,
/// achievements, the order assignment) live in their own rows; buffs are
/// transient and travel as a serialized blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredPlayer {
    /// Primary key - external player identity.
    #[primary_key]
    pub id: i64,
    pub name: String,
    pub balance: i64,
    pub click_power_base: i64,
    pub reward_offset: f64,
    pub passive_offset: f64,
    pub level: u32,
    pub xp: i64,
    pub prestige_pct: f64,
    pub last_seen: DateTime<Utc>,
    pub daily_bonus_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub lifetime_clicks: u64,
    pub lifetime_orders: u64,
    pub lifetime_passive: i64,
    pub lifetime_daily_claims: u64,
    /// Serialized live buffs.
    pub buffs: Vec<u8>,
    /// Next economy-log sequence number.
    pub log_seq: u64,
}

impl StoredPlayer {
    /// Capture the scalar part of a player aggregate.
    pub fn from_player(player: &Player) -> Self {
        let buffs = bincode::serialize(&player.buffs).unwrap_or_default();
        Self {
            id: player.id.raw(),
            name: player.name.clone(),
            balance: player.balance,
            click_power_base: player.click_power_base,
            reward_offset: player.reward_offset,
            passive_offset: player.passive_offset,
            level: player.level,
            xp: player.xp,
            prestige_pct: player.prestige_pct,
            last_seen: player.last_seen,
            daily_bonus_at: player.daily_bonus_at,
            created_at: player.created_at,
            lifetime_clicks: player.lifetime.clicks,
            lifetime_orders: player.lifetime.orders_completed,
            lifetime_passive: player.lifetime.passive_collected,
            lifetime_daily_claims: player.lifetime.daily_claims,
            buffs,
            log_seq: player.log_seq,
        }
    }

    /// Rebuild the scalar part of a player aggregate. Relations are filled
    /// in by the store from their own rows.
    pub fn to_player(&self) -> Player {
        let buffs: Vec<Buff> = bincode::deserialize(&self.buffs).unwrap_or_default();
        let mut player = Player::new(PlayerId::new(self.id), self.name.clone(), 0, self.created_at);
        player.balance = self.balance;
        player.click_power_base = self.click_power_base;
        player.reward_offset = self.reward_offset;
        player.passive_offset = self.passive_offset;
        player.level = self.level;
        player.xp = self.xp;
        player.prestige_pct = self.prestige_pct;
        player.last_seen = self.last_seen;
        player.daily_bonus_at = self.daily_bonus_at;
        player.lifetime = LifetimeStats {
            clicks: self.lifetime_clicks,
            orders_completed: self.lifetime_orders,
            passive_collected: self.lifetime_passive,
            daily_claims: self.lifetime_daily_claims,
        };
        player.buffs = buffs;
        player.log_seq = self.log_seq;
        player
    }
}
