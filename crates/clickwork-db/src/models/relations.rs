//! Per-player relation rows: owned boosts, items, equipped slots, team
//! members, skills, and achievement progress.

use super::relation_key;
use chrono::{DateTime, Utc};
use clickwork_core::{AchievementProgress, PlayerId, Slot};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Owned boost level for one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredBoostLevel {
    /// Primary key - `"{player}:{boost}"`.
    #[primary_key]
    pub key: String,
    #[secondary_key]
    pub player_id: i64,
    pub code: String,
    pub level: u32,
}

impl StoredBoostLevel {
    pub fn new(player: PlayerId, code: &str, level: u32) -> Self {
        Self {
            key: relation_key(player, code),
            player_id: player.raw(),
            code: code.to_string(),
            level,
        }
    }
}

/// A purchased item for one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredOwnedItem {
    /// Primary key - `"{player}:{item}"`.
    #[primary_key]
    pub key: String,
    #[secondary_key]
    pub player_id: i64,
    pub code: String,
}

impl StoredOwnedItem {
    pub fn new(player: PlayerId, code: &str) -> Self {
        Self {
            key: relation_key(player, code),
            player_id: player.raw(),
            code: code.to_string(),
        }
    }
}

/// The item equipped in one slot for one player (nullable).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 4, version = 1)]
#[native_db]
pub struct StoredEquippedSlot {
    /// Primary key - `"{player}:{slot}"`.
    #[primary_key]
    pub key: String,
    #[secondary_key]
    pub player_id: i64,
    pub slot: String,
    pub item: Option<String>,
}

impl StoredEquippedSlot {
    pub fn new(player: PlayerId, slot: Slot, item: Option<&str>) -> Self {
        Self {
            key: relation_key(player, slot.as_str()),
            player_id: player.raw(),
            slot: slot.as_str().to_string(),
            item: item.map(str::to_string),
        }
    }
}

/// Hired team member level for one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 5, version = 1)]
#[native_db]
pub struct StoredTeamLevel {
    /// Primary key - `"{player}:{member}"`.
    #[primary_key]
    pub key: String,
    #[secondary_key]
    pub player_id: i64,
    pub code: String,
    pub level: u32,
}

impl StoredTeamLevel {
    pub fn new(player: PlayerId, code: &str, level: u32) -> Self {
        Self {
            key: relation_key(player, code),
            player_id: player.raw(),
            code: code.to_string(),
            level,
        }
    }
}

/// Trained skill level for one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 6, version = 1)]
#[native_db]
pub struct StoredSkillLevel {
    /// Primary key - `"{player}:{skill}"`.
    #[primary_key]
    pub key: String,
    #[secondary_key]
    pub player_id: i64,
    pub code: String,
    pub level: u32,
}

impl StoredSkillLevel {
    pub fn new(player: PlayerId, code: &str, level: u32) -> Self {
        Self {
            key: relation_key(player, code),
            player_id: player.raw(),
            code: code.to_string(),
            level,
        }
    }
}

/// Achievement progress record for one (player, achievement) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 7, version = 1)]
#[native_db]
pub struct StoredAchievement {
    /// Primary key - `"{player}:{achievement}"`.
    #[primary_key]
    pub key: String,
    #[secondary_key]
    pub player_id: i64,
    pub code: String,
    pub progress: i64,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub notified: bool,
}

impl StoredAchievement {
    pub fn new(player: PlayerId, code: &str, record: &AchievementProgress) -> Self {
        Self {
            key: relation_key(player, code),
            player_id: player.raw(),
            code: code.to_string(),
            progress: record.progress,
            unlocked_at: record.unlocked_at,
            notified: record.notified,
        }
    }

    pub fn to_progress(&self) -> AchievementProgress {
        AchievementProgress {
            progress: self.progress,
            unlocked_at: self.unlocked_at,
            notified: self.notified,
        }
    }
}
