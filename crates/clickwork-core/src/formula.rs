//! Formula library: the pure functions behind every derived number
//!
//! No state, no I/O. All rounding goes through [`round_i64`] (half away
//! from zero) so every curve is deterministic and testable.

/// Round a float to the nearest integer, half away from zero.
///
/// Single rounding rule for the whole engine.
pub fn round_i64(value: f64) -> i64 {
    value.round() as i64
}

/// XP required to advance past `level`.
///
/// Monotonically increasing; used both to test level-up eligibility and to
/// render progress bars.
pub fn xp_required(level: u32) -> i64 {
    100 * (level as i64) * (level as i64)
}

/// Cost of a geometric-growth upgrade.
///
/// `next_level` is 1-indexed: the cost to go from level N to N+1 uses
/// exponent N.
pub fn upgrade_cost(base_cost: i64, growth: f64, next_level: u32) -> i64 {
    round_i64(base_cost as f64 * growth.powi(next_level as i32 - 1))
}

/// Required clicks for an order at a player level.
///
/// Step function: every 5 levels adds a flat 15% to the base requirement.
pub fn required_clicks(base_clicks: i64, level: u32) -> i64 {
    round_i64(base_clicks as f64 * (1.0 + 0.15 * (level / 5) as f64))
}

/// Required clicks with the requirement-reduction stat applied, floored at 1.
///
/// Computed once at assignment time and frozen on the assignment.
pub fn snapshot_required_clicks(base_clicks: i64, level: u32, reduction_pct: f64) -> i64 {
    let base_required = required_clicks(base_clicks, level);
    let reduced = round_i64(base_required as f64 * (1.0 - reduction_pct));
    reduced.max(1)
}

/// Reward for finishing an order from its frozen requirement.
///
/// The multiplier is floored at 1.0: a reward multiplier below 1.0 never
/// drags the reward under the 60%-of-requirement baseline. The passive
/// multiplier has no such floor; the asymmetry is intentional.
pub fn reward_from_requirement(required: i64, reward_multiplier: f64) -> i64 {
    round_i64(required as f64 * 0.6 * reward_multiplier.max(1.0))
}

/// XP granted for finishing an order, scaled by the XP-percentage stat.
pub fn order_xp(required: i64, xp_bonus: f64) -> i64 {
    round_i64(required as f64 * 0.1 * (1.0 + xp_bonus))
}

/// Income per minute for a hired team member at `level` (0 = not hired).
pub fn team_income_per_minute(base_per_minute: f64, level: u32) -> f64 {
    if level == 0 {
        return 0.0;
    }
    base_per_minute * (1.0 + 0.25 * (level - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_required() {
        assert_eq!(xp_required(1), 100);
        assert_eq!(xp_required(2), 400);
        assert_eq!(xp_required(10), 10_000);
    }

    #[test]
    fn test_upgrade_cost_growth() {
        // Boost at base 100, growth 1.25: 100, 125, 156 (156.25 rounded).
        assert_eq!(upgrade_cost(100, 1.25, 1), 100);
        assert_eq!(upgrade_cost(100, 1.25, 2), 125);
        assert_eq!(upgrade_cost(100, 1.25, 3), 156);
    }

    #[test]
    fn test_upgrade_cost_team_curve() {
        assert_eq!(upgrade_cost(100, 1.22, 1), 100);
        assert_eq!(upgrade_cost(100, 1.22, 2), 122);
        assert_eq!(upgrade_cost(800, 1.22, 3), round_i64(800.0 * 1.22 * 1.22));
    }

    #[test]
    fn test_required_clicks_step() {
        // The +15% step lands at level 5, 10, 15, ...
        assert_eq!(required_clicks(100, 1), 100);
        assert_eq!(required_clicks(100, 4), 100);
        assert_eq!(required_clicks(100, 5), 115);
        assert_eq!(required_clicks(100, 9), 115);
        assert_eq!(required_clicks(100, 10), 130);
    }

    #[test]
    fn test_snapshot_required_clicks() {
        assert_eq!(snapshot_required_clicks(100, 1, 0.0), 100);
        assert_eq!(snapshot_required_clicks(100, 1, 0.05), 95);
        assert_eq!(snapshot_required_clicks(100, 5, 0.09), round_i64(115.0 * 0.91));
        // Reduction can never push the requirement below one click.
        assert_eq!(snapshot_required_clicks(1, 1, 0.99), 1);
    }

    #[test]
    fn test_reward_floor() {
        // Multipliers below 1.0 are clamped up before the reward is computed.
        assert_eq!(reward_from_requirement(100, 0.0), 60);
        assert_eq!(reward_from_requirement(100, 1.0), 60);
        assert_eq!(reward_from_requirement(100, 1.5), 90);
    }

    #[test]
    fn test_order_xp() {
        assert_eq!(order_xp(100, 0.0), 10);
        assert_eq!(order_xp(100, 0.2), 12);
        assert_eq!(order_xp(115, 0.0), 12);
    }

    #[test]
    fn test_team_income_per_minute() {
        assert_eq!(team_income_per_minute(4.0, 0), 0.0);
        assert_eq!(team_income_per_minute(4.0, 1), 4.0);
        assert_eq!(team_income_per_minute(4.0, 3), 6.0);
        assert_eq!(team_income_per_minute(10.0, 2), 12.5);
    }
}
