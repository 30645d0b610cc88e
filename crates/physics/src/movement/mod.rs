//! Character motion resolution.
//!
//! Two interchangeable resolvers implement [`MotionResolver`]:
//!
//! - [`RaycastController`]: fans of short rays from the leading edges, with
//!   slope climbing on the lowest horizontal ray
//! - [`ShapeCastController`]: full-collider sweeps in a horizontal and a
//!   vertical sub-step, clipping velocity against every contact
//!
//! Both read tuning from an immutable [`MoveSpec`] and collider settings from
//! a [`ResolverConfig`]. All per-actor data lives in [`ActorState`], so one
//! resolver can drive any number of actors.

mod config;
mod interaction;
mod raycast;
mod resolver;
mod shape_cast;
mod smoothing;
mod state;

pub use config::{MoveSpec, ResolverConfig, MIN_RAY_COUNT};
pub use interaction::{probe_interaction, Interaction};
pub use raycast::RaycastController;
pub use resolver::MotionResolver;
pub use shape_cast::{clip_velocity, ShapeCastController};
pub use smoothing::smooth_damp;
pub use state::{ActorState, ContactFlags, MoveInput, ProbeOrigins};
