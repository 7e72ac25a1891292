//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (animation-frame timestamps into simulation milliseconds)
//! - DOM presentation and input wiring (web only)
//! - Storage (LocalStorage on web, see `persistence`)

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;

use crate::consts::MAX_FRAME_MS;

/// Run `f` on shared game state unless another handler already holds it.
///
/// Browser callbacks (focus, blur, animation frames) can be dispatched while a
/// handler is blocked in `alert`; those are dropped instead of panicking.
pub fn try_with<T>(cell: &RefCell<T>, f: impl FnOnce(&mut T)) -> bool {
    match cell.try_borrow_mut() {
        Ok(mut value) => {
            f(&mut value);
            true
        }
        Err(_) => {
            log::debug!("Game busy, dropping event");
            false
        }
    }
}

/// Turns animation-frame timestamps into whole elapsed milliseconds.
///
/// Long stalls (hidden tab, blocking dialog) are clamped to `MAX_FRAME_MS`.
/// Sub-millisecond remainders carry over to the next frame.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    carry_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed whole milliseconds since the previous call
    pub fn tick(&mut self, now_ms: f64) -> u64 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0;
        };
        let dt = (now_ms - last).clamp(0.0, MAX_FRAME_MS) + self.carry_ms;
        let whole = dt.floor();
        self.carry_ms = dt - whole;
        whole as u64
    }

    /// Forget the previous timestamp (after a pause or restart)
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.carry_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_with_skips_when_borrowed() {
        let cell = RefCell::new(0u32);
        {
            let _held = cell.borrow_mut();
            assert!(!try_with(&cell, |n| *n += 1));
        }
        assert!(try_with(&cell, |n| *n += 1));
        assert_eq!(*cell.borrow(), 1);
    }

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(5000.0), 0);
        assert_eq!(clock.tick(5016.0), 16);
    }

    #[test]
    fn test_fractions_carry_over() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        let total: u64 = (1..=60).map(|i| clock.tick(i as f64 * 16.666_666)).sum();
        assert!((999..=1000).contains(&total));
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        assert_eq!(clock.tick(30_000.0), MAX_FRAME_MS as u64);
    }

    #[test]
    fn test_time_going_backwards() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(50.0), 0);
        assert_eq!(clock.tick(60.0), 10);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.reset();
        assert_eq!(clock.tick(10_000.0), 0);
    }
}
