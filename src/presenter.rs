//! Presentation boundary
//!
//! The simulation pushes everything the player sees or hears through
//! `Presenter`. Implementations never report state back.

use crate::sim::Position;

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Successful catch (short water drop)
    Drop,
    /// Level finished without a single hit
    Zero,
}

/// HUD contents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub multiplier: f64,
    pub high_score: u64,
}

impl Hud {
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn level_text(&self) -> String {
        format!("Level: {}", self.level)
    }

    pub fn combo_text(&self) -> String {
        format!("Combo: x{:.2}", self.multiplier)
    }

    pub fn high_score_text(&self) -> String {
        format!("High: {}", self.high_score)
    }
}

/// End-of-level summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelResults {
    pub level: u32,
    pub hits: u32,
    /// Lifetime score for the run
    pub score: u64,
    /// Points earned during this level
    pub points: u64,
}

/// Everything the game shows or plays
pub trait Presenter {
    fn show_target(&mut self, position: &Position);
    fn hide_target(&mut self);
    fn update_hud(&mut self, hud: &Hud);
    fn show_results(&mut self, results: &LevelResults);
    fn hide_results(&mut self);
    fn show_difficulty_notice(&mut self, level: u32);
    fn play_cue(&mut self, cue: Cue);

    /// Floating "+N" after a catch
    fn show_points(&mut self, _points: u32) {}

    fn show_menu(&mut self, _visible: bool) {}

    /// Every level cleared
    fn show_finished(&mut self) {}
}

/// Presenter that writes to the log (native demo)
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn show_target(&mut self, position: &Position) {
        log::debug!("Pizza at {}", position.name.as_str());
    }

    fn hide_target(&mut self) {}

    fn update_hud(&mut self, hud: &Hud) {
        log::debug!(
            "{} | {} | {} | {}",
            hud.score_text(),
            hud.level_text(),
            hud.combo_text(),
            hud.high_score_text()
        );
    }

    fn show_results(&mut self, results: &LevelResults) {
        log::info!(
            "Level {} results: {} hits, {} points, score {}",
            results.level,
            results.hits,
            results.points,
            results.score
        );
    }

    fn hide_results(&mut self) {}

    fn show_difficulty_notice(&mut self, level: u32) {
        log::info!("Level {}! Difficulty increased!", level);
    }

    fn play_cue(&mut self, cue: Cue) {
        if cue == Cue::Zero {
            log::info!("Zero hits this level");
        }
    }

    fn show_finished(&mut self) {
        log::info!("Congratulations! You finished all levels!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_text() {
        let hud = Hud {
            score: 120,
            level: 3,
            multiplier: 1.5,
            high_score: 900,
        };
        assert_eq!(hud.score_text(), "Score: 120");
        assert_eq!(hud.level_text(), "Level: 3");
        assert_eq!(hud.combo_text(), "Combo: x1.50");
        assert_eq!(hud.high_score_text(), "High: 900");
    }
}
