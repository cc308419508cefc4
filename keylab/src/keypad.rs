//! Terminal keys to pad-button samples.
//!
//! A pad reports held levels every frame; a terminal reports discrete
//! key events. Each mapped event counts as a short hold, long enough to
//! bridge the gap until OS auto-repeat kicks in, so the widget reads the
//! same held-sample stream it would read from a controller register.

use padkey_core::{Button, Buttons};
use ratatui::crossterm::event::KeyCode;

/// How long a single key event keeps its button held.
pub const HOLD_WINDOW_MS: u32 = 150;

/// Sticky-hold state, one expiry instant per button.
pub struct Keypad {
    held_until: [u32; Button::COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self {
            held_until: [0; Button::COUNT],
        }
    }

    /// The pad button a terminal key stands for, if any.
    pub fn button_for(code: KeyCode) -> Option<Button> {
        match code {
            KeyCode::Up => Some(Button::Up),
            KeyCode::Down => Some(Button::Down),
            KeyCode::Left => Some(Button::Left),
            KeyCode::Right => Some(Button::Right),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('a') => Some(Button::A),
            KeyCode::Backspace | KeyCode::Char('b') => Some(Button::B),
            _ => None,
        }
    }

    pub fn press(&mut self, button: Button, now_ms: u32) {
        self.held_until[button.idx()] = now_ms + HOLD_WINDOW_MS;
    }

    /// Packed held sample for this frame.
    pub fn held(&self, now_ms: u32) -> Buttons {
        let mut held = Buttons::empty();
        for button in Button::ALL {
            if now_ms < self.held_until[button.idx()] {
                held |= button.flag();
            }
        }
        held
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
