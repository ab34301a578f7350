//! The stored order assignment.

use chrono::{DateTime, Utc};
use clickwork_core::{OrderAssignment, OrderPhase, PlayerId};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// A player's current (or most recent) order assignment.
///
/// Primary-keyed by the player id: the storage layer itself cannot hold two
/// assignments for one player, which backs up the engine's state-machine
/// guard on the single-active-order invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 8, version = 1)]
#[native_db]
pub struct StoredOrder {
    /// Primary key - the owning player.
    #[primary_key]
    pub player_id: i64,
    pub order_code: String,
    pub required_clicks: i64,
    pub reward_multiplier: f64,
    pub progress_clicks: i64,
    pub started_at: DateTime<Utc>,
    /// 0 = in progress, 1 = finished, 2 = canceled.
    pub phase: u8,
}

impl StoredOrder {
    /// Capture an assignment.
    pub fn from_assignment(player: PlayerId, assignment: &OrderAssignment) -> Self {
        let phase = match assignment.phase {
            OrderPhase::InProgress => 0,
            OrderPhase::Finished => 1,
            OrderPhase::Canceled => 2,
        };
        Self {
            player_id: player.raw(),
            order_code: assignment.order.as_str().to_string(),
            required_clicks: assignment.required_clicks,
            reward_multiplier: assignment.reward_multiplier,
            progress_clicks: assignment.progress_clicks,
            started_at: assignment.started_at,
            phase,
        }
    }

    /// Rebuild the assignment.
    pub fn to_assignment(&self) -> OrderAssignment {
        let phase = match self.phase {
            0 => OrderPhase::InProgress,
            1 => OrderPhase::Finished,
            _ => OrderPhase::Canceled,
        };
        let mut assignment = OrderAssignment::new(
            self.order_code.as_str().into(),
            self.required_clicks,
            self.reward_multiplier,
            self.started_at,
        );
        assignment.progress_clicks = self.progress_clicks;
        assignment.phase = phase;
        assignment
    }
}
