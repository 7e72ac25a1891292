//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Virtual clock only, advanced by the host
//! - Seeded or injected RNG only
//! - No DOM, audio or storage access (those go through traits)

pub mod input;
pub mod position;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod timer;

pub use input::{CatchAttempt, InputSource};
pub use position::{POSITIONS, Position, PositionName, position, random_position};
pub use scheduler::{
    AppearanceEvent, AppearanceScheduler, AppearanceState, LevelState, LevelTiming, Outcome,
    SchedulerState,
};
pub use score::{ScoreTracker, award_points, base_points, multiplier_for_streak};
pub use session::{GamePhase, GameSession};
pub use timer::{TimerHandle, TimerKind, Timers};
