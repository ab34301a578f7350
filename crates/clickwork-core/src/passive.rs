//! Passive income accrual
//!
//! There is no ticking clock: income accumulates lazily, computed from the
//! wall-clock time elapsed since the player was last observed. Every
//! touchpoint settles the elapsed window and moves `last_seen` forward,
//! whether or not anything was credited, so time is never counted twice.

use crate::catalog::Catalog;
use crate::formula;
use crate::ledger::{EconomyEntry, EntryKind};
use crate::player::Player;
use chrono::{DateTime, Duration, Utc};

/// Passive income per second from the hired team, before the passive
/// multiplier
pub fn team_rate_per_second(player: &Player, catalog: &Catalog) -> f64 {
    let per_minute: f64 = player
        .team
        .iter()
        .filter_map(|(code, &level)| {
            catalog
                .team_member(code)
                .map(|m| formula::team_income_per_minute(m.base_income_per_minute, level))
        })
        .sum();
    per_minute / 60.0
}

/// Settle passive income for the window since `last_seen`.
///
/// Elapsed time is clamped to `cap` so long-dormant accounts do not accrue
/// without bound. The credited amount is truncated toward zero. Returns the
/// log entry when anything was credited; `last_seen` advances to `now`
/// either way.
pub fn accrue(
    player: &mut Player,
    catalog: &Catalog,
    passive_multiplier: f64,
    cap: Duration,
    now: DateTime<Utc>,
) -> Option<EconomyEntry> {
    let raw_secs = (now - player.last_seen).num_seconds().max(0);
    let capped_secs = raw_secs.min(cap.num_seconds().max(0));
    player.last_seen = now;

    let rate = team_rate_per_second(player, catalog) * passive_multiplier;
    let amount = (rate * capped_secs as f64) as i64;
    if amount <= 0 {
        return None;
    }

    player.credit(amount);
    player.lifetime.passive_collected += amount;
    Some(
        EconomyEntry::new(player.id, EntryKind::PassiveIncome, amount, now)
            .with_meta("sec", capped_secs)
            .with_meta("raw_sec", raw_secs),
    )
}
