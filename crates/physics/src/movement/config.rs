//! Movement tuning data and resolver configuration.
//!
//! [`MoveSpec`] holds every tunable movement constant and is the only place
//! they live. [`ResolverConfig`] holds collider geometry and probe settings.
//! Both are built once per session and passed by reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::LayerMask;
use crate::error::ConfigError;

/// Minimum number of rays cast along an edge.
pub const MIN_RAY_COUNT: usize = 2;

/// Tuning data for an actor's movement.
///
/// All values use world units and seconds unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveSpec {
    /// Maximum horizontal run speed (units/second).
    pub move_speed: f32,

    /// Vertical velocity applied when a jump is triggered (units/second).
    pub jump_velocity: f32,

    /// Steepest surface, in degrees from horizontal, that still counts as ground.
    pub max_slope_angle: f32,

    /// Signed vertical acceleration (units/second²). Negative pulls down.
    pub gravity_scale: f32,

    /// Time to reach the target run speed while grounded (seconds).
    ///
    /// Zero or negative snaps to the target instantly.
    pub acceleration_time_grounded: f32,

    /// Time to reach the target run speed while airborne (seconds).
    ///
    /// Zero or negative snaps to the target instantly.
    pub acceleration_time_airborne: f32,

    /// Impulse applied to interactable objects the actor pushes.
    pub push_force: f32,

    /// Reach of the interaction probe (units).
    pub interaction_ray_length: f32,
}

impl Default for MoveSpec {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            jump_velocity: 15.0,  // ~2.8 units of jump height with default gravity
            max_slope_angle: 70.0,
            gravity_scale: -40.0,
            acceleration_time_grounded: 0.1,
            acceleration_time_airborne: 0.2,
            push_force: 0.2,
            interaction_ray_length: 0.2,
        }
    }
}

impl MoveSpec {
    /// Snappy config: instant ground control, strong gravity.
    pub fn arcade() -> Self {
        Self {
            move_speed: 10.0,
            jump_velocity: 18.0,
            gravity_scale: -60.0,
            acceleration_time_grounded: 0.0,
            acceleration_time_airborne: 0.05,
            ..Default::default()
        }
    }

    /// Low-gravity config with sluggish air control.
    pub fn floaty() -> Self {
        Self {
            move_speed: 6.0,
            jump_velocity: 9.0,
            gravity_scale: -15.0,
            acceleration_time_grounded: 0.15,
            acceleration_time_airborne: 0.5,
            ..Default::default()
        }
    }

    /// Minimum `normal.y` for a surface to count as ground.
    ///
    /// This is `cos(max_slope_angle)`.
    pub fn min_ground_normal(&self) -> f32 {
        self.max_slope_angle.to_radians().cos()
    }

    /// Whether a surface with this normal is shallow enough to stand on.
    pub fn is_walkable(&self, normal: Vec2) -> bool {
        normal.y > 0.0 && crate::collision::slope_angle_degrees(normal) <= self.max_slope_angle
    }

    /// Smoothing time constant for the current contact state.
    pub fn acceleration_time(&self, grounded: bool) -> f32 {
        if grounded {
            self.acceleration_time_grounded
        } else {
            self.acceleration_time_airborne
        }
    }

    /// Reject non-finite or out-of-range values.
    ///
    /// Non-positive acceleration times are accepted; they mean an instant snap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("move_speed", self.move_speed),
            ("jump_velocity", self.jump_velocity),
            ("max_slope_angle", self.max_slope_angle),
            ("gravity_scale", self.gravity_scale),
            ("acceleration_time_grounded", self.acceleration_time_grounded),
            ("acceleration_time_airborne", self.acceleration_time_airborne),
            ("push_force", self.push_force),
            ("interaction_ray_length", self.interaction_ray_length),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let non_negative = [
            ("move_speed", self.move_speed),
            ("jump_velocity", self.jump_velocity),
            ("push_force", self.push_force),
            ("interaction_ray_length", self.interaction_ray_length),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if !(0.0..=90.0).contains(&self.max_slope_angle) {
            return Err(ConfigError::SlopeAngleOutOfRange(self.max_slope_angle));
        }

        Ok(())
    }
}

/// Collider and probe settings for a resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Half-size of the actor's box collider (units).
    pub half_extents: Vec2,

    /// Inward margin for ray origins (units).
    pub skin_width: f32,

    /// Gap kept between the swept collider and contacts (units).
    pub shell_radius: f32,

    /// Rays cast along the leading vertical edge. Clamped to at least 2.
    pub horizontal_ray_count: usize,

    /// Rays cast along the leading horizontal edge. Clamped to at least 2.
    pub vertical_ray_count: usize,

    /// Layers movement probes collide with.
    pub ground_mask: LayerMask,

    /// Layers the interaction probe looks for.
    pub interactable_mask: LayerMask,

    /// Maximum contacts returned by a single shape sweep.
    pub max_contacts: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(0.5, 1.0),
            skin_width: 0.015,
            shell_radius: 0.01,
            horizontal_ray_count: 4,
            vertical_ray_count: 4,
            ground_mask: LayerMask::MASK_MOVEMENT,
            interactable_mask: LayerMask::INTERACTABLE,
            max_contacts: 8,
        }
    }
}

impl ResolverConfig {
    /// Copy with ray counts raised to [`MIN_RAY_COUNT`].
    pub fn clamped(&self) -> Self {
        Self {
            horizontal_ray_count: self.horizontal_ray_count.max(MIN_RAY_COUNT),
            vertical_ray_count: self.vertical_ray_count.max(MIN_RAY_COUNT),
            max_contacts: self.max_contacts.max(1),
            ..self.clone()
        }
    }

    /// Reject collider geometry the probes cannot work with.
    ///
    /// Ray counts are not checked here; [`clamped`](Self::clamped) fixes them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("half_extents.x", self.half_extents.x),
            ("half_extents.y", self.half_extents.y),
            ("skin_width", self.skin_width),
            ("shell_radius", self.shell_radius),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        for (field, value) in [
            ("half_extents.x", self.half_extents.x),
            ("half_extents.y", self.half_extents.y),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [("skin_width", self.skin_width), ("shell_radius", self.shell_radius)] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }
}
