//! Button auto-repeat.
//!
//! A held button should act like a stream of presses: one right away, a
//! pause, then a steady drumroll. [`RepeatGate`] produces that stream from
//! nothing but the raw "is held" sample and a millisecond clock, one
//! button at a time.

use log::debug;

use crate::input::Button;

/// Pause between the first fire and the first repeat.
pub const INITIAL_DELAY_MS: u32 = 250;

/// Pace of repeats once a button is drumrolling.
pub const REPEAT_INTERVAL_MS: u32 = 50;

/// Per-button press/hold/repeat classifier.
///
/// Timing state is one schedule slot per button: the earliest instant the
/// button may fire again, or `None` when the button has not been
/// continuously held since its last release. Slots only ever hold a value
/// while the button is sampled as held.
pub struct RepeatGate {
    next_fire: [Option<u32>; Button::COUNT],
}

impl RepeatGate {
    pub const fn new() -> Self {
        Self {
            next_fire: [None; Button::COUNT],
        }
    }

    /// Forget all hold timing, as if every button had just been released.
    pub fn reset(&mut self) {
        self.next_fire = [None; Button::COUNT];
        debug!("repeat gate cleared");
    }

    /// Classify one button for this frame: does it count as pressed?
    ///
    /// `now_ms` must be monotonically non-decreasing across calls. Poll
    /// each button at most once per frame; a second poll with the same
    /// `now_ms` perturbs the repeat pacing.
    // TODO: make repeated polls within a frame idempotent
    pub fn classify(&mut self, button: Button, is_held_now: bool, now_ms: u32) -> bool {
        let slot = &mut self.next_fire[button.idx()];

        if !is_held_now {
            *slot = None;
            return false;
        }

        match *slot {
            // Fresh hold: fire now, repeat after the long delay.
            None => {
                *slot = Some(now_ms + INITIAL_DELAY_MS);
                true
            }
            // Drumroll: fire and re-arm at the short interval.
            Some(next) if now_ms >= next => {
                *slot = Some(now_ms + REPEAT_INTERVAL_MS);
                true
            }
            Some(_) => false,
        }
    }
}

impl Default for RepeatGate {
    fn default() -> Self {
        Self::new()
    }
}
