//! The geometry query seam used by the resolvers.

use glam::Vec2;

use super::flags::LayerMask;
use super::trace::{RayHit, ShapeHit};

/// Synchronous ray and shape queries against static geometry.
///
/// Every query returns within the calling tick and never mutates the world.
/// Finding nothing is a normal result.
pub trait GeometryQuery {
    /// Every hit along the ray within `max_distance`, ordered by distance.
    fn raycast_all(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<RayHit>;

    /// Sweep an axis-aligned box centered at `position` along `direction`.
    ///
    /// Returns up to `max_hits` contacts within `max_distance`, ordered by
    /// distance.
    fn cast_shape(
        &self,
        half_extents: Vec2,
        position: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
        max_hits: usize,
    ) -> Vec<ShapeHit>;

    /// Nearest hit along the ray, if any.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.raycast_all(origin, direction, max_distance, mask)
            .into_iter()
            .next()
    }
}
