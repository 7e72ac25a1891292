//! Game session state machine
//!
//! `Menu -> Running(level) -> AwaitingContinue(level, hits) -> Running(level + 1) | Menu`
//!
//! The session owns all game state. The host feeds it elapsed time and input;
//! calls that are not valid in the current phase are ignored.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::input::CatchAttempt;
use super::scheduler::{AppearanceEvent, AppearanceScheduler};
use super::score::ScoreTracker;
use crate::persistence::HighScoreStore;
use crate::presenter::{Cue, Hud, LevelResults, Presenter};
use crate::tuning::Tuning;

/// Top-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start menu, nothing scheduled
    Menu,
    /// Appearances are running
    Running,
    /// Level results shown, waiting for continue or quit
    AwaitingContinue,
}

/// One player's game, from the menu through up to `max_level` levels
pub struct GameSession<R: Rng = Pcg32> {
    tuning: Tuning,
    phase: GamePhase,
    paused: bool,
    level: u32,
    pending_next: Option<u32>,
    score: ScoreTracker,
    scheduler: AppearanceScheduler,
    rng: R,
    store: Box<dyn HighScoreStore>,
}

impl GameSession<Pcg32> {
    /// Session with the shipped tuning and a seeded PCG generator
    pub fn with_seed(seed: u64, store: Box<dyn HighScoreStore>) -> Self {
        Self::new(Tuning::default(), Pcg32::seed_from_u64(seed), store)
    }
}

impl<R: Rng> GameSession<R> {
    /// Create a session in the menu. `tuning` is expected to be validated.
    pub fn new(tuning: Tuning, rng: R, store: Box<dyn HighScoreStore>) -> Self {
        let mut score = ScoreTracker::new(tuning.scoring);
        score.load_high_score(store.as_ref());
        Self {
            scheduler: AppearanceScheduler::new(tuning.timing, tuning.appearances_per_level),
            tuning,
            phase: GamePhase::Menu,
            paused: false,
            level: 1,
            pending_next: None,
            score,
            rng,
            store,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pending_next(&self) -> Option<u32> {
        self.pending_next
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn scheduler(&self) -> &AppearanceScheduler {
        &self.scheduler
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score.score(),
            level: self.level,
            multiplier: self.score.multiplier(),
            high_score: self.score.high_score(),
        }
    }

    /// Leave the menu and begin level 1. Ignored outside the menu.
    pub fn start(&mut self, presenter: &mut dyn Presenter) {
        if self.phase != GamePhase::Menu {
            log::debug!("start() ignored in {:?}", self.phase);
            return;
        }
        self.score.reset_game();
        self.score.reset_level();
        self.level = 1;
        self.pending_next = None;
        self.paused = false;
        self.phase = GamePhase::Running;

        presenter.show_menu(false);
        presenter.hide_results();
        self.begin_level(presenter);
    }

    /// Advance to the next level, or back to the menu after the last one.
    /// Ignored unless level results are showing.
    pub fn continue_game(&mut self, presenter: &mut dyn Presenter) {
        if self.phase != GamePhase::AwaitingContinue {
            log::debug!("continue ignored in {:?}", self.phase);
            return;
        }
        presenter.hide_results();

        let next = self.pending_next.take().unwrap_or(self.level + 1);
        if next > self.tuning.max_level {
            log::info!("All {} levels finished, score {}", self.tuning.max_level, self.score.score());
            presenter.show_finished();
            self.reset_to_menu(presenter);
            return;
        }

        self.level = next;
        self.score.reset_level();
        self.phase = GamePhase::Running;
        self.begin_level(presenter);
    }

    /// Abandon the run and return to the menu
    pub fn quit(&mut self, presenter: &mut dyn Presenter) {
        match self.phase {
            GamePhase::Running | GamePhase::AwaitingContinue => {}
            GamePhase::Menu => {
                log::debug!("quit() ignored in menu");
                return;
            }
        }
        log::info!("Quit at level {} with score {}", self.level, self.score.score());
        presenter.hide_results();
        presenter.hide_target();
        self.reset_to_menu(presenter);
    }

    /// Freeze the clock. Only meaningful while running.
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running || self.paused {
            return false;
        }
        self.paused = true;
        log::info!("Paused at level {}", self.level);
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        log::info!("Resumed");
        true
    }

    /// Feed elapsed wall time into the level
    pub fn advance(&mut self, elapsed_ms: u64, presenter: &mut dyn Presenter) {
        if self.phase != GamePhase::Running || self.paused {
            return;
        }
        let events = self.scheduler.advance(elapsed_ms, &mut self.rng);
        for event in events {
            self.apply(event, presenter);
        }
    }

    /// Handle a click or key press. Returns the points awarded, if any.
    pub fn catch_attempt(
        &mut self,
        attempt: CatchAttempt,
        presenter: &mut dyn Presenter,
    ) -> Option<u32> {
        if self.phase != GamePhase::Running || self.paused {
            return None;
        }
        let event = self.scheduler.attempt_catch(attempt.hint)?;
        self.apply(event, presenter)
    }

    fn begin_level(&mut self, presenter: &mut dyn Presenter) {
        if self.tuning.is_milestone(self.level) {
            presenter.show_difficulty_notice(self.level);
        }
        presenter.update_hud(&self.hud());
        self.scheduler.start(self.level);
        let timing = self.scheduler.timing();
        log::info!(
            "Level {} started (visible {}ms, gap {}ms)",
            self.level,
            timing.visible_ms,
            timing.gap_ms
        );
    }

    fn apply(&mut self, event: AppearanceEvent, presenter: &mut dyn Presenter) -> Option<u32> {
        match event {
            AppearanceEvent::Shown(position) => {
                presenter.show_target(&position);
                None
            }
            AppearanceEvent::Caught(_) => {
                let points = self.score.on_catch(self.level, self.store.as_mut());
                presenter.show_points(points);
                presenter.hide_target();
                presenter.play_cue(Cue::Drop);
                presenter.update_hud(&self.hud());
                Some(points)
            }
            AppearanceEvent::Expired(position) => {
                log::debug!("Missed pizza at {}", position.name.as_str());
                self.score.on_miss();
                presenter.hide_target();
                presenter.update_hud(&self.hud());
                None
            }
            AppearanceEvent::LevelComplete { hits, .. } => {
                self.on_level_complete(hits, presenter);
                None
            }
        }
    }

    fn on_level_complete(&mut self, hits: u32, presenter: &mut dyn Presenter) {
        self.phase = GamePhase::AwaitingContinue;
        self.pending_next = Some(self.level + 1);
        log::info!("Level {} complete: {} hits, score {}", self.level, hits, self.score.score());
        presenter.hide_target();
        presenter.show_results(&LevelResults {
            level: self.level,
            hits,
            score: self.score.score(),
            points: self.score.points_this_level(),
        });
        if hits == 0 {
            presenter.play_cue(Cue::Zero);
        }
    }

    fn reset_to_menu(&mut self, presenter: &mut dyn Presenter) {
        self.scheduler.stop();
        self.phase = GamePhase::Menu;
        self.paused = false;
        self.level = 1;
        self.pending_next = None;
        self.score.reset_game();
        presenter.show_menu(true);
        presenter.update_hud(&self.hud());
    }
}
