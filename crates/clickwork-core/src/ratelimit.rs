//! Click rate limiting
//!
//! The engine itself never rejects a click; policing spam is the shell's
//! job. This module supplies the pieces: the effective per-second limit
//! (base limit plus equipment bonus, under a hard ceiling) and a sliding
//! one-second window per player.

use crate::PlayerId;
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Effective per-second click limit for a player
pub fn click_limit(base: u32, max: u32, rate_limit_bonus: i64) -> u32 {
    let bonus = rate_limit_bonus.max(0) as u32;
    (base + bonus).min(max)
}

/// Per-player sliding-window limiter over a one-second horizon
#[derive(Debug)]
pub struct ClickRateLimiter {
    events: IndexMap<PlayerId, VecDeque<DateTime<Utc>>>,
    max_events: usize,
}

impl ClickRateLimiter {
    /// Create a limiter; `max_events` bounds the per-player history
    pub fn new(max_events: usize) -> Self {
        Self {
            events: IndexMap::new(),
            max_events,
        }
    }

    /// Record an attempt and report whether it is within the limit.
    ///
    /// Attempts over the limit are not recorded, so a burst of rejections
    /// does not extend the lockout.
    pub fn allow(&mut self, player: PlayerId, limit_per_sec: u32, now: DateTime<Utc>) -> bool {
        let events = self.events.entry(player).or_default();
        let horizon = now - Duration::seconds(1);
        while events.front().is_some_and(|&t| t <= horizon) {
            events.pop_front();
        }
        if events.len() >= limit_per_sec as usize {
            return false;
        }
        if events.len() < self.max_events {
            events.push_back(now);
        }
        true
    }
}

impl Default for ClickRateLimiter {
    fn default() -> Self {
        Self::new(100)
    }
}
