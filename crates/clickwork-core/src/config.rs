//! Engine configuration
//!
//! Tunables the surrounding shell may want to override without touching the
//! catalog. Loaded once at startup (defaults or a RON document) and passed
//! into the engine; never ambient global state.

use crate::error::{Error, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Engine-wide tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Balance granted to a freshly created player
    pub starting_balance: i64,
    /// Amount of the daily bonus
    pub daily_bonus: i64,
    /// Per-second click limit before equipment bonuses
    pub click_rate_base: u32,
    /// Hard ceiling on the per-second click limit
    pub click_rate_max: u32,
    /// Maximum hours of passive income a dormant account can accrue
    pub offline_cap_hours: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_balance: 200,
            daily_bonus: 100,
            click_rate_base: 10,
            click_rate_max: 15,
            offline_cap_hours: 12,
        }
    }
}

impl EngineConfig {
    /// Load from a RON document
    pub fn from_ron_str(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// The offline accrual cap as a duration
    pub fn offline_cap(&self) -> Duration {
        Duration::hours(self.offline_cap_hours)
    }
}
