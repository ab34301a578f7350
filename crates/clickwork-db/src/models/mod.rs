//! Database models for persistent storage.
//!
//! One stored struct per logical relation: the player record, one row per
//! (player, definition) relation, one row per achievement progress record,
//! one row per active-or-last order assignment (primary-keyed by player id,
//! which doubles as the storage-level uniqueness backstop for the
//! single-active-order rule), and one append-only row per economy-log
//! entry.

mod log;
mod order;
mod player;
mod relations;

pub use log::*;
pub use order::*;
pub use player::*;
pub use relations::*;

use clickwork_core::PlayerId;

/// Composite key for (player, code) relation rows.
pub fn relation_key(player: PlayerId, code: &str) -> String {
    format!("{}:{}", player.raw(), code)
}

/// Composite key for economy-log rows. The sequence is zero-padded so the
/// lexicographic key order matches insertion order.
pub fn log_key(player: PlayerId, seq: u64) -> String {
    format!("{}:{:020}", player.raw(), seq)
}
