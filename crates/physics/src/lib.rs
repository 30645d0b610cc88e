//! Ledge Physics
//!
//! Deterministic 2D character motion for side-on platformers. An actor is an
//! axis-aligned box moved by a resolver against static geometry, one fixed
//! step at a time.
//!
//! # Architecture
//!
//! - **Collision**: Static brushes (boxes and convex polygons) answering ray
//!   and box-sweep queries through the [`GeometryQuery`] trait
//! - **Movement**: Resolvers that turn input and tuning into a new
//!   [`ActorState`] each step
//! - **Debug**: An optional sink receiving every ray and sweep cast
//!
//! # Determinism
//!
//! The same state, input, tuning and `delta_time` always give bit-identical
//! results. Queries walk brushes in insertion order and parry2d is built with
//! `enhanced-determinism`.

pub mod collision;
pub mod debug;
pub mod error;
pub mod movement;

// Re-export commonly used types
pub use collision::{BodyId, CollisionWorld, GeometryQuery, LayerMask, RayHit, ShapeHit};
pub use debug::{DebugColor, DebugLines, DebugSink, NoDebug};
pub use error::{ConfigError, GeometryError};
pub use movement::{
    probe_interaction, ActorState, ContactFlags, Interaction, MotionResolver, MoveInput, MoveSpec,
    RaycastController, ResolverConfig, ShapeCastController,
};
