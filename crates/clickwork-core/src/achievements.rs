//! Achievement evaluation
//!
//! Progress is recomputed from authoritative lifetime state every time a
//! relevant metric changes; nothing is incremented from deltas, so a missed
//! event can never leave a counter permanently behind. Unlocks are
//! monotonic: `unlocked_at` is set exactly once and survives any later
//! regression of the underlying metric.

use crate::catalog::{Catalog, Metric};
use crate::player::{AchievementProgress, Player};
use crate::DefId;
use chrono::{DateTime, Utc};

/// Current authoritative value of a metric for a player
pub fn metric_value(player: &Player, metric: Metric) -> i64 {
    match metric {
        Metric::LifetimeClicks => player.lifetime.clicks as i64,
        Metric::OrdersCompleted => player.lifetime.orders_completed as i64,
        Metric::Balance => player.balance,
        Metric::Level => player.level as i64,
        Metric::PassiveCollected => player.lifetime.passive_collected,
        Metric::DailyClaims => player.lifetime.daily_claims as i64,
    }
}

/// Re-evaluate every achievement watching one of the changed metrics.
///
/// Creates missing progress records, refreshes progress counters, and sets
/// the unlock timestamp the first time a threshold is reached. Returns the
/// codes unlocked by this call; re-running after an unlock only keeps the
/// progress numbers fresh.
pub fn evaluate(
    player: &mut Player,
    catalog: &Catalog,
    metrics: &[Metric],
    now: DateTime<Utc>,
) -> Vec<DefId> {
    let mut newly_unlocked = Vec::new();

    for def in catalog.achievements_for(metrics) {
        let current = metric_value(player, def.metric);
        let record = player
            .achievements
            .entry(def.code.clone())
            .or_insert_with(AchievementProgress::default);

        record.progress = current;
        if record.unlocked_at.is_none() && current >= def.threshold {
            record.unlocked_at = Some(now);
            newly_unlocked.push(def.code.clone());
        }
    }

    newly_unlocked
}

/// Unlocked achievements the caller has not surfaced yet.
///
/// Marks them notified, so each unlock is presented exactly once even when
/// evaluation ran several times before the player next interacted.
pub fn take_unnotified(player: &mut Player) -> Vec<DefId> {
    let mut pending = Vec::new();
    for (code, record) in player.achievements.iter_mut() {
        if record.unlocked_at.is_some() && !record.notified {
            record.notified = true;
            pending.push(code.clone());
        }
    }
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerId;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn new_player() -> Player {
        Player::new(PlayerId::new(1), "A", 200, fixed_now())
    }

    #[test]
    fn test_unlock_on_threshold() {
        let catalog = Catalog::builtin();
        let mut player = new_player();
        player.lifetime.clicks = 1;

        let unlocked = evaluate(&mut player, &catalog, &[Metric::LifetimeClicks], fixed_now());
        assert_eq!(unlocked, vec![DefId::new("first_click")]);

        let record = &player.achievements[&DefId::new("first_click")];
        assert_eq!(record.progress, 1);
        assert!(record.unlocked_at.is_some());
        assert!(!record.notified);
    }

    #[test]
    fn test_unlock_happens_once() {
        let catalog = Catalog::builtin();
        let mut player = new_player();
        player.lifetime.clicks = 150;

        let first = evaluate(&mut player, &catalog, &[Metric::LifetimeClicks], fixed_now());
        assert_eq!(first.len(), 2); // first_click and hundred_clicks

        let second = evaluate(&mut player, &catalog, &[Metric::LifetimeClicks], fixed_now());
        assert!(second.is_empty());
        // Progress still refreshed on the repeat run.
        player.lifetime.clicks = 200;
        evaluate(&mut player, &catalog, &[Metric::LifetimeClicks], fixed_now());
        assert_eq!(player.achievements[&DefId::new("first_click")].progress, 200);
    }

    #[test]
    fn test_unlock_is_monotonic_under_regression() {
        let catalog = Catalog::builtin();
        let mut player = new_player();
        player.balance = 10_000;
        let unlocked = evaluate(&mut player, &catalog, &[Metric::Balance], fixed_now());
        assert_eq!(unlocked, vec![DefId::new("ten_k_balance")]);

        // Balance drops back below the threshold; the unlock stays.
        player.balance = 50;
        let again = evaluate(&mut player, &catalog, &[Metric::Balance], fixed_now());
        assert!(again.is_empty());
        let record = &player.achievements[&DefId::new("ten_k_balance")];
        assert!(record.unlocked_at.is_some());
        assert_eq!(record.progress, 50);
    }

    #[test]
    fn test_only_watched_metrics_are_touched() {
        let catalog = Catalog::builtin();
        let mut player = new_player();
        player.lifetime.orders_completed = 1;

        let unlocked = evaluate(&mut player, &catalog, &[Metric::Balance], fixed_now());
        assert!(unlocked.is_empty());
        assert!(!player.achievements.contains_key(&DefId::new("first_order")));
    }

    #[test]
    fn test_take_unnotified_flips_flag() {
        let catalog = Catalog::builtin();
        let mut player = new_player();
        player.lifetime.clicks = 1;
        evaluate(&mut player, &catalog, &[Metric::LifetimeClicks], fixed_now());

        let pending = take_unnotified(&mut player);
        assert_eq!(pending, vec![DefId::new("first_click")]);
        assert!(take_unnotified(&mut player).is_empty());
    }

    #[test]
    fn test_progress_record_created_below_threshold() {
        let catalog = Catalog::builtin();
        let mut player = new_player();
        player.lifetime.clicks = 40;
        evaluate(&mut player, &catalog, &[Metric::LifetimeClicks], fixed_now());

        let record = &player.achievements[&DefId::new("hundred_clicks")];
        assert_eq!(record.progress, 40);
        assert!(record.unlocked_at.is_none());
    }
}
