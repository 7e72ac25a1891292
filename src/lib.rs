//! Pizza Catch - a reaction-timing browser game
//!
//! Core modules:
//! - `sim`: Deterministic game core (timers, appearances, scoring, level flow)
//! - `presenter`: What the core shows and plays, as a trait
//! - `persistence`: High score storage
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod persistence;
pub mod platform;
pub mod presenter;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use persistence::{HighScoreStore, MemoryStore, StoreError};
pub use presenter::{Cue, Hud, LevelResults, LogPresenter, Presenter};
pub use settings::Settings;
pub use sim::{CatchAttempt, GamePhase, GameSession};
pub use tuning::{Tuning, TuningError};

/// Host-side constants
pub mod consts {
    /// Longest frame fed into the simulation (ms); longer stalls are dropped
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// How long the "+N" pop stays on screen (ms)
    pub const POINTS_POP_MS: i32 = 800;
    /// Simulation step for the native demo (ms)
    pub const DEMO_STEP_MS: u64 = 10;
}
