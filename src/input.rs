//! Device-independent input types
//!
//! Screens never see SDL2 events. The host translates them (see
//! `input_system`) into two things per frame:
//! - a list of discrete `InputEvent`s (key presses, mouse, quit)
//! - an `InputSnapshot` of the keys currently held down
//!
//! This keeps every screen's `update` testable without a window.

/// Logical keys the game reacts to on key-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Space
    Jump,
    /// W or the up arrow: jump in gameplay, move up in menus
    Up,
    /// S or the down arrow
    Down,
    /// A or the left arrow
    Left,
    /// D or the right arrow
    Right,
    /// Return
    Confirm,
    Escape,
    /// R
    Restart,
    /// F11
    Fullscreen,
}

impl Key {
    /// Keys that start a jump in gameplay
    pub fn is_jump(self) -> bool {
        matches!(self, Key::Jump | Key::Up)
    }

    /// Keys that skip the intro
    pub fn is_skip(self) -> bool {
        matches!(self, Key::Jump | Key::Confirm | Key::Escape)
    }
}

/// Discrete input events, in logical (unscaled) screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    MouseMove { x: i32, y: i32 },
    MouseDown { x: i32, y: i32 },
    MouseUp,
    Quit,
}

/// Keys held down this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl InputSnapshot {
    /// Horizontal input axis: -1, 0 or 1. Left wins when both are held.
    pub fn horizontal(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }

    /// Vertical input axis: -1 (up), 0 or 1 (down). Up wins when both are held.
    pub fn vertical(&self) -> f32 {
        if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        }
    }
}
