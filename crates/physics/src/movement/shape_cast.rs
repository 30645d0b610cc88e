//! Shape-sweep motion resolver.
//!
//! Sweeps the whole collider instead of probing with rays. Each step is split
//! into a horizontal and a vertical sub-step; every contact found by a sweep
//! clips the velocity and shortens the allowed travel.

use glam::Vec2;

use crate::collision::{GeometryQuery, ShapeHit};
use crate::debug::{DebugColor, DebugSink};

use super::config::{MoveSpec, ResolverConfig};
use super::resolver::{integrate_horizontal, valid_delta_time, MotionResolver};
use super::state::{ActorState, ContactFlags, MoveInput};

/// Remove the part of `velocity` that goes into a surface.
///
/// Velocity moving away from, or parallel to, the surface is returned as is.
pub fn clip_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    let backoff = velocity.dot(normal);
    if backoff < 0.0 {
        velocity - normal * backoff
    } else {
        velocity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubStep {
    Horizontal,
    Vertical,
}

/// Resolver that sweeps the collider box along each sub-step.
#[derive(Debug, Clone)]
pub struct ShapeCastController {
    spec: MoveSpec,
    config: ResolverConfig,
}

impl ShapeCastController {
    pub fn new(spec: MoveSpec, config: ResolverConfig) -> Self {
        Self {
            spec,
            config: config.clamped(),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(MoveSpec::default(), ResolverConfig::default())
    }

    /// Sweep along `displacement`, then move as far as the contacts allow.
    fn sweep(
        &self,
        state: &mut ActorState,
        displacement: Vec2,
        sub_step: SubStep,
        world: &dyn GeometryQuery,
        debug: &mut dyn DebugSink,
    ) {
        let distance = displacement.length();
        if !(distance > 0.0) || !distance.is_finite() {
            return;
        }

        let direction = displacement / distance;
        let shell = self.config.shell_radius;
        let center = state.center();
        let cast_distance = distance + shell;

        debug.ray(center, direction, cast_distance, DebugColor::Green);

        let hits = world.cast_shape(
            self.config.half_extents,
            center,
            direction,
            cast_distance,
            self.config.ground_mask,
            self.config.max_contacts,
        );

        let mut allowed = distance;
        let mut ground_recorded = false;
        for hit in &hits {
            self.classify(state, hit, sub_step, &mut ground_recorded);
            state.velocity = clip_velocity(state.velocity, hit.normal);
            allowed = allowed.min(hit.distance - shell);
        }
        let allowed = allowed.max(0.0);

        if !hits.is_empty() {
            log::trace!(
                "{:?} sweep: {} contacts, travel {:.4} of {:.4}",
                sub_step,
                hits.len(),
                allowed,
                distance
            );
        }

        state.translate(direction * allowed);
    }

    fn classify(&self, state: &mut ActorState, hit: &ShapeHit, sub_step: SubStep, ground_recorded: &mut bool) {
        let threshold = self.spec.min_ground_normal();
        let normal = hit.normal;

        if normal.y > threshold {
            state.contacts.set(ContactFlags::BELOW, true);
            // Hits are ordered by distance; the nearest ground wins
            if sub_step == SubStep::Vertical && !*ground_recorded {
                state.ground_normal = normal;
                *ground_recorded = true;
            }
        } else if normal.y < -threshold {
            state.contacts.set(ContactFlags::ABOVE, true);
        } else if normal.x > 0.0 {
            state.contacts.set(ContactFlags::LEFT, true);
            state.velocity_x_smoothing = 0.0;
        } else if normal.x < 0.0 {
            state.contacts.set(ContactFlags::RIGHT, true);
            state.velocity_x_smoothing = 0.0;
        }
    }
}

impl MotionResolver for ShapeCastController {
    fn resolve_step(
        &self,
        state: &ActorState,
        input: &MoveInput,
        world: &dyn GeometryQuery,
        delta_time: f32,
        debug: &mut dyn DebugSink,
    ) -> ActorState {
        let mut next = state.clone();
        if !valid_delta_time(delta_time) {
            log::debug!("skipping step with delta_time={delta_time}");
            return next;
        }
        let input = input.sanitized();

        let grounded = next.contacts.below();
        let ground_normal = next.ground_normal;

        if input.jump_triggered && grounded {
            next.velocity.y = self.spec.jump_velocity;
            log::trace!("jump from {:?}", next.position);
        }

        integrate_horizontal(&self.spec, &mut next, &input, grounded, delta_time);
        next.velocity.y += self.spec.gravity_scale * delta_time;

        next.contacts.reset();

        // Horizontal: follow the ground tangent while standing on something
        let mut horizontal = Vec2::new(next.velocity.x * delta_time, 0.0);
        if grounded && horizontal.x != 0.0 {
            let tangent = Vec2::new(ground_normal.y, -ground_normal.x).normalize_or_zero();
            if tangent != Vec2::ZERO {
                horizontal = tangent * horizontal.x;
            }
        }
        self.sweep(&mut next, horizontal, SubStep::Horizontal, world, debug);

        // Vertical: ground is re-evaluated from scratch
        next.contacts.set(ContactFlags::BELOW, false);
        next.ground_normal = Vec2::Y;
        let vertical = Vec2::new(0.0, next.velocity.y * delta_time);
        self.sweep(&mut next, vertical, SubStep::Vertical, world, debug);

        next
    }

    fn spec(&self) -> &MoveSpec {
        &self.spec
    }

    fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================
