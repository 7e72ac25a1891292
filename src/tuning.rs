//! Data-driven game balance
//!
//! `Tuning::default()` is the shipped game: 70 levels of 20 appearances each,
//! with the visible window and the gap between appearances shrinking linearly
//! per level down to fixed floors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("cannot read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Level timing curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingTuning {
    /// Visible window at level 1 (ms)
    pub visible_start_ms: u32,
    /// Visible window lost per level (ms)
    pub visible_step_ms: f64,
    /// Shortest visible window (ms)
    pub visible_floor_ms: u32,
    /// Gap after the visible window at level 1 (ms)
    pub gap_start_ms: u32,
    /// Gap lost per level (ms, floored)
    pub gap_step_ms: f64,
    /// Shortest gap (ms)
    pub gap_floor_ms: u32,
}

impl Default for TimingTuning {
    fn default() -> Self {
        Self {
            visible_start_ms: 1000,
            visible_step_ms: 10.0,
            visible_floor_ms: 300,
            gap_start_ms: 500,
            gap_step_ms: 5.0,
            gap_floor_ms: 150,
        }
    }
}

/// Points and streak multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    /// Points for a catch before the level bonus
    pub base_points: u32,
    /// Bonus points per level (floored)
    pub level_bonus: f64,
    /// Consecutive catches needed per multiplier step
    pub streak_step: u32,
    /// Multiplier gained per step
    pub multiplier_step: f64,
    /// Maximum number of steps
    pub max_multiplier_steps: u32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            base_points: 10,
            level_bonus: 1.5,
            streak_step: 3,
            multiplier_step: 0.5,
            max_multiplier_steps: 4,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Last playable level
    pub max_level: u32,
    /// Appearances per level
    pub appearances_per_level: u32,
    /// A difficulty notice is shown on every level divisible by this
    pub milestone_interval: u32,
    pub timing: TimingTuning,
    pub scoring: ScoringTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_level: 70,
            appearances_per_level: 20,
            milestone_interval: 10,
            timing: TimingTuning::default(),
            scoring: ScoringTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file (native demo `--tuning`)
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values that would stall or break the level loop
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_level == 0 {
            return Err(TuningError::Invalid("max_level must be at least 1"));
        }
        if self.appearances_per_level == 0 {
            return Err(TuningError::Invalid("appearances_per_level must be at least 1"));
        }
        if self.milestone_interval == 0 {
            return Err(TuningError::Invalid("milestone_interval must be at least 1"));
        }
        let t = &self.timing;
        if t.visible_floor_ms == 0 || t.gap_floor_ms == 0 {
            return Err(TuningError::Invalid("timing floors must be positive"));
        }
        if t.visible_start_ms < t.visible_floor_ms || t.gap_start_ms < t.gap_floor_ms {
            return Err(TuningError::Invalid("timing starts below their floors"));
        }
        if t.visible_step_ms < 0.0 || t.gap_step_ms < 0.0 {
            return Err(TuningError::Invalid("timing steps must not be negative"));
        }
        let s = &self.scoring;
        if s.streak_step == 0 {
            return Err(TuningError::Invalid("streak_step must be at least 1"));
        }
        if s.multiplier_step < 0.0 || s.level_bonus < 0.0 {
            return Err(TuningError::Invalid("scoring factors must not be negative"));
        }
        Ok(())
    }

    /// True when `level` shows the "difficulty increased" notice
    pub fn is_milestone(&self, level: u32) -> bool {
        level % self.milestone_interval == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("pizza_tuning_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "appearances_per_level": 7 }"#).unwrap();
        let tuning = Tuning::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(tuning.appearances_per_level, 7);
        assert_eq!(tuning.max_level, 70);

        assert!(matches!(
            Tuning::from_file(std::env::temp_dir().join("pizza_tuning_missing.json")),
            Err(TuningError::Io(_))
        ));
    }

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_level": 5, "timing": { "gap_floor_ms": 200 } }"#)
            .unwrap();
        assert_eq!(tuning.max_level, 5);
        assert_eq!(tuning.appearances_per_level, 20);
        assert_eq!(tuning.timing.gap_floor_ms, 200);
        assert_eq!(tuning.timing.visible_start_ms, 1000);
    }

    #[test]
    fn test_rejects_zero_appearances() {
        let err = Tuning::from_json(r#"{ "appearances_per_level": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_milestones() {
        let tuning = Tuning::default();
        assert!(tuning.is_milestone(10));
        assert!(tuning.is_milestone(70));
        assert!(!tuning.is_milestone(1));
        assert!(!tuning.is_milestone(15));
    }
}
