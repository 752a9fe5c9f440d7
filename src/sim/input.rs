//! Logical input state
//!
//! The host flips actions on key-down/key-up; the simulation only reads them
//! at the start of each tick.

use glam::Vec2;

const ACTION_COUNT: usize = 7;

/// Logical actions the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    ZoomIn,
    ZoomOut,
    /// Fast-fall: multiplies gravity while held
    Boost,
}

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::ZoomIn,
        Action::ZoomOut,
        Action::Boost,
    ];

    /// Map a DOM `KeyboardEvent.code` to an action (arrows and WASD alias)
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Action::Up),
            "KeyS" | "ArrowDown" => Some(Action::Down),
            "KeyA" | "ArrowLeft" => Some(Action::Left),
            "KeyD" | "ArrowRight" => Some(Action::Right),
            "KeyE" => Some(Action::ZoomIn),
            "KeyQ" => Some(Action::ZoomOut),
            "Space" => Some(Action::Boost),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Held/released state for every action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    held: [bool; ACTION_COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release (last write wins)
    pub fn set(&mut self, action: Action, pressed: bool) {
        self.held[action.index()] = pressed;
    }

    /// Apply a raw key code; returns whether it mapped to an action
    pub fn set_key_code(&mut self, code: &str, pressed: bool) -> bool {
        match Action::from_key_code(code) {
            Some(action) => {
                self.set(action, pressed);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_down(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.held = [false; ACTION_COUNT];
    }

    /// Unit-step direction from the four directional actions (y-down)
    pub fn pan_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_down(Action::Up) {
            dir.y -= 1.0;
        }
        if self.is_down(Action::Down) {
            dir.y += 1.0;
        }
        if self.is_down(Action::Left) {
            dir.x -= 1.0;
        }
        if self.is_down(Action::Right) {
            dir.x += 1.0;
        }
        dir
    }

    /// +1 zooming in, -1 zooming out, 0 for neither or both
    pub fn zoom_direction(&self) -> f32 {
        let mut dir = 0.0;
        if self.is_down(Action::ZoomIn) {
            dir += 1.0;
        }
        if self.is_down(Action::ZoomOut) {
            dir -= 1.0;
        }
        dir
    }
}
