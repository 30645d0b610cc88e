//! Player input handling.
//!
//! This module converts raw held buttons (or an analog stick) into the
//! per-tick [`MoveInput`] the resolvers consume.

use glam::Vec2;
use ledge_physics::MoveInput;
use serde::{Deserialize, Serialize};

/// Raw button state for a single frame.
///
/// This is what an input backend reports and what replay tapes record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,

    /// Jump button currently held.
    pub jump: bool,
}

impl PlayerInput {
    /// Movement axis from the direction buttons, before normalization.
    ///
    /// Opposite buttons cancel out.
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.right {
            axis.x += 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.up {
            axis.y += 1.0;
        }
        if self.down {
            axis.y -= 1.0;
        }
        axis
    }

    /// Check if any direction button is held.
    pub fn has_movement(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Hold only the right button.
    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::default()
        }
    }

    /// Hold only the left button.
    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::default()
        }
    }

    /// Copy with the jump button held.
    pub fn with_jump(self) -> Self {
        Self { jump: true, ..self }
    }
}

/// Turns held buttons into per-tick movement input.
///
/// Jump is edge-triggered: `jump_triggered` is true only on the tick the
/// button goes from released to pressed, so holding it does not re-jump.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSampler {
    jump_was_held: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample digital buttons for this tick.
    pub fn sample(&mut self, input: &PlayerInput) -> MoveInput {
        self.sample_axis(input.axis(), input.jump)
    }

    /// Sample an analog axis for this tick.
    ///
    /// Axes longer than 1 (diagonals, noisy sticks) are scaled back to unit
    /// length. Non-finite components are dropped.
    pub fn sample_axis(&mut self, axis: Vec2, jump_held: bool) -> MoveInput {
        let jump_triggered = jump_held && !self.jump_was_held;
        self.jump_was_held = jump_held;

        let finite = |value: f32| if value.is_finite() { value } else { 0.0 };
        let axis = Vec2::new(finite(axis.x), finite(axis.y));
        let magnitude = axis.length();
        let axis = if magnitude > 1.0 { axis / magnitude } else { axis };

        MoveInput::new(axis, jump_triggered)
    }

    /// Forget the held jump state, e.g. on respawn.
    pub fn reset(&mut self) {
        self.jump_was_held = false;
    }
}
