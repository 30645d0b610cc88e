//! Hit records returned by collision queries.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::flags::LayerMask;

/// Identifier of a brush inside a [`CollisionWorld`](super::CollisionWorld).
pub type BodyId = u32;

/// A single ray intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance from the ray origin to the impact point.
    pub distance: f32,

    /// Impact point in world space.
    pub point: Vec2,

    /// Surface normal at the impact point, pointing away from the surface.
    pub normal: Vec2,

    /// Brush that was hit.
    pub body: BodyId,

    /// Layers of the brush that was hit.
    pub layers: LayerMask,
}

/// A contact found while sweeping the actor's collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeHit {
    /// Distance the shape can travel before touching this brush.
    ///
    /// `0.0` when the shape already overlaps the brush at the start.
    pub distance: f32,

    /// Surface normal of the brush at the contact, pointing toward the actor.
    pub normal: Vec2,

    /// Brush that was hit.
    pub body: BodyId,

    /// Whether the shape was already overlapping the brush.
    pub penetrating: bool,
}

/// Per-probe result: hit or miss, with distance and surface normal.
///
/// A miss is a normal outcome (airborne actor), not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactSample {
    pub hit: bool,
    pub distance: f32,
    pub normal: Vec2,
}

impl ContactSample {
    /// A probe that found nothing within `max_distance`.
    pub fn miss(max_distance: f32) -> Self {
        Self {
            hit: false,
            distance: max_distance,
            normal: Vec2::ZERO,
        }
    }

    /// Angle between the hit normal and world up, in degrees.
    ///
    /// Returns `0.0` for a miss.
    pub fn slope_angle(&self) -> f32 {
        if !self.hit {
            return 0.0;
        }
        slope_angle_degrees(self.normal)
    }
}

/// Angle between `normal` and world up, in degrees.
pub fn slope_angle_degrees(normal: Vec2) -> f32 {
    normal
        .normalize_or_zero()
        .dot(Vec2::Y)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees()
}

impl From<Option<RayHit>> for ContactSample {
    fn from(hit: Option<RayHit>) -> Self {
        match hit {
            Some(hit) => Self {
                hit: true,
                distance: hit.distance,
                normal: hit.normal,
            },
            None => Self::miss(f32::INFINITY),
        }
    }
}
