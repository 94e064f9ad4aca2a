//! Scoring module - line-clear points and the gravity schedule
//!
//! Only row clears score. The engine uses exactly one [`ScoreRule`], fixed at
//! construction:
//! - `Quadratic` (default): `cleared² × 100`, so simultaneous clears pay more.
//! - `Linear`: `cleared × 10`.

use crate::config::EngineConfig;
use crate::types::{LINEAR_POINTS_PER_ROW, QUADRATIC_POINTS_BASE};

/// How cleared rows turn into points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScoreRule {
    #[default]
    Quadratic,
    Linear,
}

impl ScoreRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreRule::Quadratic => "quadratic",
            ScoreRule::Linear => "linear",
        }
    }
}

/// Points for clearing `lines` rows at once
pub fn calculate_line_score(rule: ScoreRule, lines: usize) -> u32 {
    let lines = u32::try_from(lines).unwrap_or(u32::MAX);
    match rule {
        ScoreRule::Quadratic => lines
            .saturating_mul(lines)
            .saturating_mul(QUADRATIC_POINTS_BASE),
        ScoreRule::Linear => lines.saturating_mul(LINEAR_POINTS_PER_ROW),
    }
}

/// Fall interval after `play_ms` of play
///
/// Starts at `initial_fall_ms`, loses `speedup_step_ms` for every full
/// `speedup_period_ms`, and bottoms out at `min_fall_ms`.
pub fn get_fall_interval_ms(config: &EngineConfig, play_ms: u64) -> u32 {
    if config.speedup_period_ms == 0 || config.speedup_step_ms == 0 {
        return config.initial_fall_ms;
    }
    let periods = play_ms / config.speedup_period_ms as u64;
    let reduction = periods.saturating_mul(config.speedup_step_ms as u64);
    let interval = (config.initial_fall_ms as u64).saturating_sub(reduction);
    interval.max(config.min_fall_ms as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_score() {
        assert_eq!(calculate_line_score(ScoreRule::Quadratic, 0), 0);
        assert_eq!(calculate_line_score(ScoreRule::Quadratic, 1), 100);
        assert_eq!(calculate_line_score(ScoreRule::Quadratic, 2), 400);
        assert_eq!(calculate_line_score(ScoreRule::Quadratic, 3), 900);
        assert_eq!(calculate_line_score(ScoreRule::Quadratic, 4), 1600);
    }

    #[test]
    fn test_linear_score() {
        assert_eq!(calculate_line_score(ScoreRule::Linear, 0), 0);
        assert_eq!(calculate_line_score(ScoreRule::Linear, 1), 10);
        assert_eq!(calculate_line_score(ScoreRule::Linear, 4), 40);
    }

    #[test]
    fn test_default_rule_is_quadratic() {
        assert_eq!(ScoreRule::default(), ScoreRule::Quadratic);
    }

    #[test]
    fn test_fall_interval_schedule() {
        let config = EngineConfig::default();
        assert_eq!(get_fall_interval_ms(&config, 0), 500);
        assert_eq!(get_fall_interval_ms(&config, 59_999), 500);
        assert_eq!(get_fall_interval_ms(&config, 60_000), 495);
        assert_eq!(get_fall_interval_ms(&config, 10 * 60_000), 450);
    }

    #[test]
    fn test_fall_interval_floor() {
        let config = EngineConfig::default();
        // 80 periods would take 400ms off; the floor holds at 100
        assert_eq!(get_fall_interval_ms(&config, 80 * 60_000), 100);
        assert_eq!(get_fall_interval_ms(&config, u64::MAX), 100);
    }

    #[test]
    fn test_fall_interval_without_speedup() {
        let config = EngineConfig::default().with_fall_schedule(300, 100, 0, 60_000);
        assert_eq!(get_fall_interval_ms(&config, 10 * 60_000), 300);

        let config = EngineConfig::default().with_fall_schedule(300, 100, 5, 0);
        assert_eq!(get_fall_interval_ms(&config, 10 * 60_000), 300);
    }
}
