//! Streak, multiplier and points
//!
//! A catch extends the streak and is scored at the multiplier the new streak
//! earns. A miss drops the streak and multiplier back to their base values.

use crate::persistence::HighScoreStore;
use crate::tuning::ScoringTuning;

/// Multiplier earned by a streak: `1 + min(max_steps, floor(streak / step)) * mult_step`
pub fn multiplier_for_streak(tuning: &ScoringTuning, streak: u32) -> f64 {
    let steps = (streak / tuning.streak_step).min(tuning.max_multiplier_steps);
    1.0 + steps as f64 * tuning.multiplier_step
}

/// Base points for a catch at `level`: `base + floor(level * bonus)`
pub fn base_points(tuning: &ScoringTuning, level: u32) -> u32 {
    tuning.base_points + (level as f64 * tuning.level_bonus).floor() as u32
}

/// Points awarded for one catch, rounded half away from zero
pub fn award_points(tuning: &ScoringTuning, level: u32, multiplier: f64) -> u32 {
    (base_points(tuning, level) as f64 * multiplier).round() as u32
}

/// Score state for a session
#[derive(Debug, Clone)]
pub struct ScoreTracker {
    tuning: ScoringTuning,
    score: u64,
    high_score: u64,
    streak: u32,
    multiplier: f64,
    points_this_level: u64,
}

impl ScoreTracker {
    pub fn new(tuning: ScoringTuning) -> Self {
        Self {
            tuning,
            score: 0,
            high_score: 0,
            streak: 0,
            multiplier: 1.0,
            points_this_level: 0,
        }
    }

    /// Seed the high score from the store. Read failures start from 0.
    pub fn load_high_score(&mut self, store: &dyn HighScoreStore) {
        match store.load() {
            Ok(score) => {
                self.high_score = score;
                log::info!("Loaded high score {}", score);
            }
            Err(e) => {
                log::warn!("Could not load high score: {}", e);
                self.high_score = 0;
            }
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn points_this_level(&self) -> u64 {
        self.points_this_level
    }

    /// Score a catch at `level` and return the points awarded.
    ///
    /// A new high score is persisted immediately; a failed write is logged and
    /// otherwise ignored.
    pub fn on_catch(&mut self, level: u32, store: &mut dyn HighScoreStore) -> u32 {
        self.streak += 1;
        self.multiplier = multiplier_for_streak(&self.tuning, self.streak);
        let points = award_points(&self.tuning, level, self.multiplier);
        self.score += points as u64;
        self.points_this_level += points as u64;

        if self.score > self.high_score {
            self.high_score = self.score;
            if let Err(e) = store.save(self.high_score) {
                log::warn!("High score {} not saved: {}", self.high_score, e);
            }
        }

        log::debug!(
            "Catch at level {}: +{} (streak {}, x{:.1})",
            level,
            points,
            self.streak,
            self.multiplier
        );
        points
    }

    /// A target expired without a catch
    pub fn on_miss(&mut self) {
        if self.streak > 0 {
            log::debug!("Miss - streak of {} lost", self.streak);
        }
        self.streak = 0;
        self.multiplier = 1.0;
    }

    /// Start of a level: only the per-level points reset
    pub fn reset_level(&mut self) {
        self.points_this_level = 0;
    }

    /// Back to the menu: everything but the high score resets
    pub fn reset_game(&mut self) {
        self.score = 0;
        self.streak = 0;
        self.multiplier = 1.0;
        self.points_this_level = 0;
    }
}
