//! Collision world containing all static geometry.
//!
//! Brushes are parry2d shapes placed with a pure translation. Queries walk
//! the brush list in insertion order, which keeps results reproducible.

use glam::Vec2;
use parry2d::math::{Isometry, Point, Real, Vector};
use parry2d::query::{self, Ray, ShapeCastOptions, ShapeCastStatus};
use parry2d::shape::{Cuboid, SharedShape};

use super::flags::LayerMask;
use super::query::GeometryQuery;
use super::trace::{BodyId, RayHit, ShapeHit};
use crate::error::GeometryError;

/// A piece of collision geometry in the world.
#[derive(Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: BodyId,
    /// The collision shape, in local space.
    pub shape: SharedShape,
    /// Placement in world space.
    pub transform: Isometry<Real>,
    /// Layers this brush belongs to.
    pub layers: LayerMask,
}

impl std::fmt::Debug for CollisionBrush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionBrush")
            .field("id", &self.id)
            .field("shape", &self.shape.shape_type())
            .field("translation", &self.transform.translation.vector)
            .field("layers", &self.layers)
            .finish()
    }
}

/// The static environment an actor is resolved against.
///
/// Immutable during simulation; build it once when loading a level.
#[derive(Debug, Default, Clone)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
    next_id: BodyId,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the box in world space
    /// * `half_extents` - Half-size along x and y, both positive
    /// * `layers` - Layers used for query filtering
    pub fn add_box(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        layers: LayerMask,
    ) -> Result<BodyId, GeometryError> {
        if !center.is_finite() || !half_extents.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if half_extents.x <= 0.0 || half_extents.y <= 0.0 {
            return Err(GeometryError::NonPositiveExtents {
                x: half_extents.x,
                y: half_extents.y,
            });
        }

        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        let transform = Isometry::translation(center.x, center.y);
        Ok(self.push(shape, transform, layers))
    }

    /// Add an axis-aligned box from its min and max corners.
    pub fn add_box_min_max(
        &mut self,
        min: Vec2,
        max: Vec2,
        layers: LayerMask,
    ) -> Result<BodyId, GeometryError> {
        self.add_box((min + max) * 0.5, (max - min) * 0.5, layers)
    }

    /// Add a convex polygon given in world-space points (any winding).
    ///
    /// This is how slopes are built: a right triangle with its hypotenuse
    /// facing up.
    pub fn add_convex_polygon(
        &mut self,
        points: &[Vec2],
        layers: LayerMask,
    ) -> Result<BodyId, GeometryError> {
        if points.iter().any(|p| !p.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        if points.len() < 3 {
            return Err(GeometryError::DegenerateHull(points.len()));
        }

        let parry_points: Vec<Point<Real>> =
            points.iter().map(|p| Point::new(p.x, p.y)).collect();
        let shape = SharedShape::convex_hull(&parry_points)
            .ok_or(GeometryError::DegenerateHull(points.len()))?;

        Ok(self.push(shape, Isometry::identity(), layers))
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.brushes.clear();
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Look up a brush by id.
    pub fn brush(&self, id: BodyId) -> Option<&CollisionBrush> {
        self.brushes.iter().find(|b| b.id == id)
    }

    /// Check whether a box centered at `position` overlaps any brush in `mask`.
    pub fn overlaps(&self, half_extents: Vec2, position: Vec2, mask: LayerMask) -> bool {
        if !half_extents.is_finite() || !position.is_finite() {
            return false;
        }

        let probe = Cuboid::new(Vector::new(half_extents.x, half_extents.y));
        let probe_transform = Isometry::translation(position.x, position.y);

        self.brushes
            .iter()
            .filter(|brush| mask.intersects(brush.layers))
            .any(|brush| {
                matches!(
                    query::intersection_test(
                        &probe_transform,
                        &probe,
                        &brush.transform,
                        brush.shape.as_ref(),
                    ),
                    Ok(true)
                )
            })
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn push(&mut self, shape: SharedShape, transform: Isometry<Real>, layers: LayerMask) -> BodyId {
        let id = self.next_id;
        self.next_id += 1;

        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            layers,
        });

        id
    }
}

impl GeometryQuery for CollisionWorld {
    fn raycast_all(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Vec<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO || !origin.is_finite() || !(max_distance > 0.0) {
            return Vec::new();
        }

        let ray = Ray::new(Point::new(origin.x, origin.y), Vector::new(dir.x, dir.y));

        let mut hits: Vec<RayHit> = self
            .brushes
            .iter()
            .filter(|brush| mask.intersects(brush.layers))
            .filter_map(|brush| {
                let intersection =
                    brush
                        .shape
                        .cast_ray_and_get_normal(&brush.transform, &ray, max_distance, true)?;

                let distance = intersection.time_of_impact;
                if distance > max_distance {
                    return None;
                }

                // A ray starting inside a solid reports a zero normal
                let normal = Vec2::new(intersection.normal.x, intersection.normal.y);
                let normal = if normal.length_squared() > 1.0e-6 {
                    normal.normalize()
                } else {
                    -dir
                };

                Some(RayHit {
                    distance,
                    point: origin + dir * distance,
                    normal,
                    body: brush.id,
                    layers: brush.layers,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.body.cmp(&b.body)));
        hits
    }

    fn cast_shape(
        &self,
        half_extents: Vec2,
        position: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
        max_hits: usize,
    ) -> Vec<ShapeHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO
            || !position.is_finite()
            || !half_extents.is_finite()
            || !(max_distance > 0.0)
            || max_hits == 0
        {
            return Vec::new();
        }

        let shape = Cuboid::new(Vector::new(half_extents.x, half_extents.y));
        let shape_transform = Isometry::translation(position.x, position.y);
        let velocity = Vector::new(dir.x, dir.y);
        let still = Vector::zeros();

        let mut hits: Vec<ShapeHit> = self
            .brushes
            .iter()
            .filter(|brush| mask.intersects(brush.layers))
            .filter_map(|brush| {
                // Already-overlapping brushes only block motion that goes deeper
                let options = ShapeCastOptions {
                    stop_at_penetration: false,
                    compute_impact_geometry_on_penetration: true,
                    ..ShapeCastOptions::with_max_time_of_impact(max_distance)
                };
                let hit = query::cast_shapes(
                    &shape_transform,
                    &velocity,
                    &shape,
                    &brush.transform,
                    &still,
                    brush.shape.as_ref(),
                    options,
                )
                .ok()
                .flatten()?;

                if matches!(hit.status, ShapeCastStatus::Failed) {
                    return None;
                }

                // Brushes are translated only, so local normals are world normals
                let normal = Vec2::new(hit.normal2.x, hit.normal2.y).normalize_or_zero();
                let normal = if normal == Vec2::ZERO { -dir } else { normal };

                Some(ShapeHit {
                    distance: hit.time_of_impact,
                    normal,
                    body: brush.id,
                    penetrating: matches!(
                        hit.status,
                        ShapeCastStatus::PenetratingOrWithinTargetDist
                    ),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.body.cmp(&b.body)));
        hits.truncate(max_hits);
        hits
    }
}

// ============================================================================
// Tests
// ============================================================================
