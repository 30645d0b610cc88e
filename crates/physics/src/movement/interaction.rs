//! Forward probe for pushable or usable objects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::{BodyId, GeometryQuery};
use crate::debug::{DebugColor, DebugSink};

use super::config::{MoveSpec, ResolverConfig};
use super::state::ActorState;

/// Something the actor is touching in the facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub body: BodyId,

    /// Distance from the actor's leading edge.
    pub distance: f32,

    pub point: Vec2,

    /// Push to hand to the other body, `facing * push_force` along x.
    pub impulse: Vec2,
}

/// Cast a short ray from the leading edge in the facing direction.
///
/// Only bodies on `config.interactable_mask` are considered.
pub fn probe_interaction(
    state: &ActorState,
    spec: &MoveSpec,
    config: &ResolverConfig,
    world: &dyn GeometryQuery,
    debug: &mut dyn DebugSink,
) -> Option<Interaction> {
    let direction = Vec2::X * state.facing.signum();
    let skin = config.skin_width;
    let inset = (config.half_extents.x - skin).max(0.0);
    let origin = state.center() + direction * inset;
    let length = spec.interaction_ray_length + skin;

    debug.ray(origin, direction, length, DebugColor::Yellow);

    let hit = world.raycast(origin, direction, length, config.interactable_mask)?;

    log::trace!("interaction probe hit body {} at {:.3}", hit.body, hit.distance);

    Some(Interaction {
        body: hit.body,
        distance: (hit.distance - skin).max(0.0),
        point: hit.point,
        impulse: direction * spec.push_force,
    })
}
