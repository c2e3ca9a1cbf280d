//! Per-frame input snapshot.
//!
//! The windowed shell (or the scripted demo driver) samples its input
//! devices once per frame and hands the simulation this snapshot; the
//! core never talks to a keyboard directly.

use glam::Vec2;

/// Input state for one simulation frame
#[derive(Debug, Clone, Copy)]
pub struct InputState {
    /// Movement axes, each in [-1, 1]
    pub move_x: f32,
    pub move_y: f32,
    /// Attack pressed this frame
    pub attack: bool,
    /// Cast-spell pressed this frame
    pub cast: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            move_x: 0.0,
            move_y: 0.0,
            attack: false,
            cast: false,
        }
    }

    /// Raw movement direction (not normalized)
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.move_x, self.move_y)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
