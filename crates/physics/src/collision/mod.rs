//! Collision queries against static 2D geometry.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: The static environment, built from boxes and convex polygons
//! - [`GeometryQuery`]: The ray/shape query seam the resolvers are written against
//! - [`RayHit`] / [`ShapeHit`]: Hit records, ordered by distance
//! - [`LayerMask`]: Layer filtering so probes only see ground geometry

mod flags;
mod query;
mod trace;
mod world;

pub use flags::LayerMask;
pub use query::GeometryQuery;
pub use trace::{slope_angle_degrees, BodyId, ContactSample, RayHit, ShapeHit};
pub use world::{CollisionBrush, CollisionWorld};
