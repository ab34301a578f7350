//! The stored economy-log row.

use super::log_key;
use chrono::{DateTime, Utc};
use clickwork_core::{EconomyEntry, EntryKind, MetaMap, PlayerId};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// One append-only economy-log row. Inserted, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 9, version = 1)]
#[native_db]
pub struct StoredLogEntry {
    /// Primary key - `"{player}:{seq}"`, zero-padded so key order is
    /// insertion order.
    #[primary_key]
    pub key: String,
    #[secondary_key]
    pub player_id: i64,
    pub kind: String,
    pub amount: i64,
    /// Serialized metadata map.
    pub meta: Vec<u8>,
    pub at: DateTime<Utc>,
}

impl StoredLogEntry {
    /// Capture an entry under the given per-player sequence number.
    pub fn from_entry(seq: u64, entry: &EconomyEntry) -> Self {
        Self {
            key: log_key(entry.player, seq),
            player_id: entry.player.raw(),
            kind: entry.kind.as_str().to_string(),
            amount: entry.amount,
            meta: bincode::serialize(&entry.meta).unwrap_or_default(),
            at: entry.at,
        }
    }

    /// Rebuild the entry. Returns `None` for an unknown kind tag.
    pub fn to_entry(&self) -> Option<EconomyEntry> {
        let kind = EntryKind::parse(&self.kind)?;
        let meta: MetaMap = bincode::deserialize(&self.meta).unwrap_or_default();
        let mut entry = EconomyEntry::new(PlayerId::new(self.player_id), kind, self.amount, self.at);
        entry.meta = meta;
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_roundtrip() {
        let now = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let entry = EconomyEntry::new(PlayerId::new(3), EntryKind::PassiveIncome, 240, now)
            .with_meta("sec", 3600)
            .with_meta("raw_sec", 3600);

        let stored = StoredLogEntry::from_entry(0, &entry);
        assert_eq!(stored.kind, "passive_income");
        assert_eq!(stored.to_entry().unwrap(), entry);
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let now = Utc::now();
        let entry = EconomyEntry::new(PlayerId::new(3), EntryKind::DailyBonus, 100, now);
        let mut stored = StoredLogEntry::from_entry(0, &entry);
        stored.kind = "mystery".to_string();
        assert!(stored.to_entry().is_none());
    }
}
