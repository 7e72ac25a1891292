// Whole-session tests for the `pizza-catch` crate.
// These drive the public API with a recording presenter and seeded RNGs, so
// they run on the host without a browser.

use pizza_catch::sim::{CatchAttempt, GamePhase, GameSession, Position, SchedulerState};
use pizza_catch::{Cue, Hud, LevelResults, MemoryStore, Presenter, Tuning};
use rand::SeedableRng;
use rand_pcg::Pcg32;

#[derive(Default)]
struct Counts {
    shown: u32,
    hidden: u32,
    results: Vec<LevelResults>,
    zero_cues: u32,
    drop_cues: u32,
    notices: Vec<u32>,
    finished: u32,
    last_hud: Option<Hud>,
}

impl Presenter for Counts {
    fn show_target(&mut self, _position: &Position) {
        self.shown += 1;
    }
    fn hide_target(&mut self) {
        self.hidden += 1;
    }
    fn update_hud(&mut self, hud: &Hud) {
        self.last_hud = Some(*hud);
    }
    fn show_results(&mut self, results: &LevelResults) {
        self.results.push(*results);
    }
    fn hide_results(&mut self) {}
    fn show_difficulty_notice(&mut self, level: u32) {
        self.notices.push(level);
    }
    fn play_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Drop => self.drop_cues += 1,
            Cue::Zero => self.zero_cues += 1,
        }
    }
    fn show_finished(&mut self) {
        self.finished += 1;
    }
}

/// Step a running level in 10ms frames, catching every `catch_every`-th
/// appearance (0 = never). Returns once the level has ended.
fn play_level(session: &mut GameSession, p: &mut Counts, catch_every: u32) {
    while session.phase() == GamePhase::Running {
        session.advance(10, p);
        if catch_every == 0 || session.scheduler().state() != SchedulerState::Showing {
            continue;
        }
        let index = session.scheduler().current().map(|a| a.index).unwrap_or(0);
        if index % catch_every == 0 {
            session.catch_attempt(CatchAttempt::pointer(), p);
        }
    }
}

#[test]
fn every_level_shows_exactly_twenty_targets() {
    for (seed, catch_every) in [(1, 0), (2, 1), (3, 3)] {
        let mut session = GameSession::with_seed(seed, Box::new(MemoryStore::new()));
        let mut p = Counts::default();
        session.start(&mut p);
        play_level(&mut session, &mut p, catch_every);

        assert_eq!(p.shown, 20, "seed {}", seed);
        assert_eq!(p.results.len(), 1);
        let expected_hits = match catch_every {
            0 => 0,
            n => 20 / n,
        };
        assert_eq!(p.results[0].hits, expected_hits);
    }
}

#[test]
fn perfect_level_one_score() {
    let mut session = GameSession::with_seed(77, Box::new(MemoryStore::new()));
    let mut p = Counts::default();
    session.start(&mut p);
    play_level(&mut session, &mut p, 1);

    // Streaks 1-2 at x1, 3-5 x1.5, 6-8 x2, 9-11 x2.5, 12-20 x3 with base 11
    let expected = 2 * 11 + 3 * 17 + 3 * 22 + 3 * 28 + 9 * 33;
    assert_eq!(
        p.results[0],
        LevelResults {
            level: 1,
            hits: 20,
            score: expected,
            points: expected
        }
    );
    assert_eq!(p.drop_cues, 20);
    assert_eq!(p.zero_cues, 0);
    assert_eq!(session.score().multiplier(), 3.0);
}

#[test]
fn full_run_stops_at_last_level() {
    let mut session = GameSession::with_seed(5, Box::new(MemoryStore::new()));
    let mut p = Counts::default();
    session.start(&mut p);

    let mut highest = 0;
    while session.phase() != GamePhase::Menu {
        highest = highest.max(session.level());
        play_level(&mut session, &mut p, 2);
        assert_eq!(session.phase(), GamePhase::AwaitingContinue);
        session.continue_game(&mut p);
    }

    assert_eq!(highest, 70);
    assert_eq!(p.results.len(), 70);
    assert_eq!(p.finished, 1);
    assert_eq!(p.notices, vec![10, 20, 30, 40, 50, 60, 70]);
    assert_eq!(session.level(), 1);
    assert_eq!(session.score().score(), 0);
    // The high score outlives the run
    assert!(session.score().high_score() > 0);
    assert_eq!(p.last_hud.map(|h| h.score), Some(0));
}

#[test]
fn zero_hit_level_twenty_plays_zero_cue_once() {
    let tuning = Tuning::default();
    let mut session = GameSession::new(tuning, Pcg32::seed_from_u64(20), Box::new(MemoryStore::new()));
    let mut p = Counts::default();
    session.start(&mut p);
    for _ in 1..20 {
        play_level(&mut session, &mut p, 1);
        session.continue_game(&mut p);
    }
    assert_eq!(session.level(), 20);
    assert_eq!(p.zero_cues, 0);

    play_level(&mut session, &mut p, 0);
    assert_eq!(p.results.last().map(|r| (r.level, r.hits)), Some((20, 0)));
    assert_eq!(p.zero_cues, 1);
}

#[test]
fn quit_mid_level_leaves_no_timers() {
    let mut session = GameSession::with_seed(8, Box::new(MemoryStore::new()));
    let mut p = Counts::default();
    session.start(&mut p);
    session.advance(4_000, &mut p);
    let shown = p.shown;
    assert!(shown > 0);

    session.quit(&mut p);
    assert_eq!(session.scheduler().pending_timers(), 0);
    for _ in 0..1_000 {
        session.advance(1_000, &mut p);
    }
    assert_eq!(p.shown, shown);
    assert!(p.results.is_empty());
}

#[test]
fn high_score_survives_failing_store() {
    let mut session = GameSession::with_seed(3, Box::new(MemoryStore::failing()));
    let mut p = Counts::default();
    session.start(&mut p);
    play_level(&mut session, &mut p, 1);
    assert_eq!(session.phase(), GamePhase::AwaitingContinue);
    assert_eq!(session.score().high_score(), session.score().score());
}

#[test]
fn custom_tuning_shortens_levels() {
    let tuning = Tuning::from_json(r#"{ "max_level": 2, "appearances_per_level": 5 }"#).unwrap();
    let mut session = GameSession::new(tuning, Pcg32::seed_from_u64(4), Box::new(MemoryStore::new()));
    let mut p = Counts::default();
    session.start(&mut p);
    play_level(&mut session, &mut p, 0);
    assert_eq!(p.shown, 5);
    session.continue_game(&mut p);
    play_level(&mut session, &mut p, 0);
    session.continue_game(&mut p);
    assert_eq!(session.phase(), GamePhase::Menu);
    assert_eq!(p.finished, 1);
}
