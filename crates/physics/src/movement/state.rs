//! Actor state and per-step input structures.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Which sides of the actor touched geometry during the last step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactFlags(pub u8);

impl ContactFlags {
    /// Touching a ceiling.
    pub const ABOVE: u8 = 1 << 0;

    /// Standing on ground.
    pub const BELOW: u8 = 1 << 1;

    /// Touching a wall on the left.
    pub const LEFT: u8 = 1 << 2;

    /// Touching a wall on the right.
    pub const RIGHT: u8 = 1 << 3;

    /// Check if a flag is set.
    #[inline]
    pub fn has(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    /// Clear every flag.
    #[inline]
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    #[inline]
    pub fn above(self) -> bool {
        self.has(Self::ABOVE)
    }

    #[inline]
    pub fn below(self) -> bool {
        self.has(Self::BELOW)
    }

    #[inline]
    pub fn left(self) -> bool {
        self.has(Self::LEFT)
    }

    #[inline]
    pub fn right(self) -> bool {
        self.has(Self::RIGHT)
    }

    /// Touching a ceiling or the ground.
    #[inline]
    pub fn vertical(self) -> bool {
        self.has(Self::ABOVE | Self::BELOW)
    }

    /// Touching a wall on either side.
    #[inline]
    pub fn horizontal(self) -> bool {
        self.has(Self::LEFT | Self::RIGHT)
    }
}

/// Corner points of the actor's bounds, shrunk inward by the skin width.
///
/// Derived every step from position and half-extents; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeOrigins {
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub top_left: Vec2,
    pub top_right: Vec2,
}

impl ProbeOrigins {
    /// Compute the corners for a box centered at `center`.
    pub fn from_bounds(center: Vec2, half_extents: Vec2, skin_width: f32) -> Self {
        let (min, max) = Self::shrunk_bounds(center, half_extents, skin_width);

        Self {
            bottom_left: Vec2::new(min.x, min.y),
            bottom_right: Vec2::new(max.x, min.y),
            top_left: Vec2::new(min.x, max.y),
            top_right: Vec2::new(max.x, max.y),
        }
    }

    /// Width of the shrunk bounds.
    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.bottom_left.x
    }

    /// Height of the shrunk bounds.
    pub fn height(&self) -> f32 {
        self.top_left.y - self.bottom_left.y
    }

    fn shrunk_bounds(center: Vec2, half_extents: Vec2, skin_width: f32) -> (Vec2, Vec2) {
        // A skin wider than the box collapses it to its center line
        let inset = (half_extents - Vec2::splat(skin_width)).max(Vec2::ZERO);
        (center - inset, center + inset)
    }
}

/// Complete movement state for one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorState {
    /// Collider center in world space. `z` is render depth and never changes.
    pub position: Vec3,

    /// Velocity in world space (units/second).
    pub velocity: Vec2,

    /// Contacts found during the last step.
    pub contacts: ContactFlags,

    /// Normal of the last qualifying ground contact. Up when airborne.
    pub ground_normal: Vec2,

    /// Rate of change carried between steps by horizontal smoothing.
    pub velocity_x_smoothing: f32,

    /// `1.0` facing right, `-1.0` facing left.
    pub facing: f32,
}

impl Default for ActorState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec2::ZERO,
            contacts: ContactFlags::default(),
            ground_normal: Vec2::Y,
            velocity_x_smoothing: 0.0,
            facing: 1.0,
        }
    }
}

impl ActorState {
    /// Create a new actor state at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Collider center in the simulation plane.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position.truncate()
    }

    /// Move by a displacement in the simulation plane.
    #[inline]
    pub fn translate(&mut self, displacement: Vec2) {
        self.position += displacement.extend(0.0);
    }

    /// Check if the actor is standing on ground.
    #[inline]
    pub fn grounded(&self) -> bool {
        self.contacts.below()
    }

    /// Probe corners for this state.
    pub fn probe_origins(&self, half_extents: Vec2, skin_width: f32) -> ProbeOrigins {
        ProbeOrigins::from_bounds(self.center(), half_extents, skin_width)
    }

    /// Update facing from a horizontal input value. Zero keeps the old facing.
    pub fn face(&mut self, input_x: f32) {
        if input_x > 0.0 {
            self.facing = 1.0;
        } else if input_x < 0.0 {
            self.facing = -1.0;
        }
    }

    /// Check if the state holds only finite numbers.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.velocity_x_smoothing.is_finite()
    }
}

/// Movement input sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveInput {
    /// Movement axis, each component in [-1, 1].
    pub axis: Vec2,

    /// True only on the tick the jump button went down.
    pub jump_triggered: bool,
}

impl MoveInput {
    /// Build an input, clamping the axis and zeroing non-finite components.
    pub fn new(axis: Vec2, jump_triggered: bool) -> Self {
        Self {
            axis,
            jump_triggered,
        }
        .sanitized()
    }

    /// Copy with the axis clamped to [-1, 1] and NaN/infinite parts zeroed.
    pub fn sanitized(self) -> Self {
        let clean = |value: f32| {
            if value.is_finite() {
                value.clamp(-1.0, 1.0)
            } else {
                0.0
            }
        };

        Self {
            axis: Vec2::new(clean(self.axis.x), clean(self.axis.y)),
            jump_triggered: self.jump_triggered,
        }
    }
}
