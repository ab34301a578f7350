//! Order assignments and their lifecycle
//!
//! An assignment is stamped from an [`OrderTemplate`](crate::catalog::OrderTemplate)
//! with two frozen snapshots: the click requirement and the reward
//! multiplier, both computed from the player's stats at assignment time.
//! Later stat changes never touch an assignment already underway.

use crate::DefId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of an assignment. The phases are mutually exclusive and
/// the terminal ones are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderPhase {
    /// Accepted and being clicked through
    InProgress,
    /// Progress reached the requirement; reward paid out
    Finished,
    /// Abandoned; progress discarded, nothing refunded
    Canceled,
}

/// One player's work on one order template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAssignment {
    /// The template this assignment was stamped from
    pub order: DefId,
    /// Frozen click requirement, computed once at assignment time
    pub required_clicks: i64,
    /// Frozen reward multiplier, computed once at assignment time
    pub reward_multiplier: f64,
    /// Clicks accumulated so far; never exceeds `required_clicks`
    pub progress_clicks: i64,
    pub started_at: DateTime<Utc>,
    pub phase: OrderPhase,
}

impl OrderAssignment {
    /// Start a new assignment with frozen snapshots
    pub fn new(
        order: DefId,
        required_clicks: i64,
        reward_multiplier: f64,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order,
            required_clicks,
            reward_multiplier,
            progress_clicks: 0,
            started_at,
            phase: OrderPhase::InProgress,
        }
    }

    /// Whether this assignment is still being worked
    pub fn is_active(&self) -> bool {
        self.phase == OrderPhase::InProgress
    }

    /// Whether progress has reached the requirement
    pub fn is_complete(&self) -> bool {
        self.progress_clicks >= self.required_clicks
    }

    /// Percentage complete, for rendering
    pub fn percent_complete(&self) -> u32 {
        if self.required_clicks <= 0 {
            return 100;
        }
        (100 * self.progress_clicks / self.required_clicks) as u32
    }

    /// Add click power to progress, clamped at the requirement.
    ///
    /// Returns true when the surrounding shell should emit a progress
    /// notice: the tens bucket of the progress count changed, or the order
    /// just completed. The thresholding only exists to keep a chatty
    /// transport from sending a message per click.
    pub fn advance(&mut self, click_power: i64) -> bool {
        let previous = self.progress_clicks;
        self.progress_clicks = (self.progress_clicks + click_power).min(self.required_clicks);
        (self.progress_clicks / 10) > (previous / 10) || self.is_complete()
    }
}
