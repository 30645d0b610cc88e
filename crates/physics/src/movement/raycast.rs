//! Ray-probe motion resolver.
//!
//! Casts a fan of short rays from the actor's leading edges and clamps this
//! step's displacement to the nearest hit on each axis.
//!
//! Velocity is stored in units/second; a step turns it into a displacement
//! with `velocity * delta_time`, resolves that displacement, and translates.

use glam::Vec2;

use crate::collision::{slope_angle_degrees, ContactSample, GeometryQuery, RayHit};
use crate::debug::{DebugColor, DebugSink};

use super::config::{MoveSpec, ResolverConfig};
use super::resolver::{integrate_horizontal, valid_delta_time, MotionResolver};
use super::state::{ActorState, ContactFlags, MoveInput, ProbeOrigins};

/// Resolver that probes with rays along the leading edges.
///
/// # Example
///
/// ```ignore
/// let controller = RaycastController::new(MoveSpec::default(), ResolverConfig::default());
/// let mut state = ActorState::new(spawn_position);
///
/// // Each fixed tick:
/// state = controller.step(&state, &input, &world, delta_time);
/// ```
#[derive(Debug, Clone)]
pub struct RaycastController {
    spec: MoveSpec,
    config: ResolverConfig,
    horizontal_ray_spacing: f32,
    vertical_ray_spacing: f32,
}

impl RaycastController {
    /// Create a controller. Ray counts below 2 are raised to 2.
    pub fn new(spec: MoveSpec, config: ResolverConfig) -> Self {
        let clamped = config.clamped();
        if clamped.horizontal_ray_count != config.horizontal_ray_count
            || clamped.vertical_ray_count != config.vertical_ray_count
        {
            log::debug!(
                "ray counts raised to {}x{} (asked for {}x{})",
                clamped.horizontal_ray_count,
                clamped.vertical_ray_count,
                config.horizontal_ray_count,
                config.vertical_ray_count
            );
        }

        // Spacing only depends on the collider size, which is fixed
        let origins = ProbeOrigins::from_bounds(Vec2::ZERO, clamped.half_extents, clamped.skin_width);
        let horizontal_ray_spacing = origins.height() / (clamped.horizontal_ray_count - 1) as f32;
        let vertical_ray_spacing = origins.width() / (clamped.vertical_ray_count - 1) as f32;

        Self {
            spec,
            config: clamped,
            horizontal_ray_spacing,
            vertical_ray_spacing,
        }
    }

    /// Create a controller with default tuning and collider.
    pub fn with_default_config() -> Self {
        Self::new(MoveSpec::default(), ResolverConfig::default())
    }

    /// Distance between neighbouring horizontal rays.
    pub fn horizontal_ray_spacing(&self) -> f32 {
        self.horizontal_ray_spacing
    }

    /// Distance between neighbouring vertical rays.
    pub fn vertical_ray_spacing(&self) -> f32 {
        self.vertical_ray_spacing
    }

    /// Probe corners for a state.
    pub fn probe_origins(&self, state: &ActorState) -> ProbeOrigins {
        state.probe_origins(self.config.half_extents, self.config.skin_width)
    }

    // ========================================================================
    // Vertical Collisions
    // ========================================================================

    fn vertical_collisions(
        &self,
        origins: &ProbeOrigins,
        state: &mut ActorState,
        displacement: &mut Vec2,
        world: &dyn GeometryQuery,
        debug: &mut dyn DebugSink,
    ) {
        let skin = self.config.skin_width;
        let direction_y = displacement.y.signum();
        let direction = Vec2::Y * direction_y;
        let mut ray_length = displacement.y.abs() + skin;

        let start = if direction_y < 0.0 {
            origins.bottom_left
        } else {
            origins.top_left
        };

        let mut nearest: Option<RayHit> = None;
        for i in 0..self.config.vertical_ray_count {
            // Probe where the horizontal motion will put this edge
            let origin = start + Vec2::X * (self.vertical_ray_spacing * i as f32 + displacement.x);
            debug.ray(origin, direction, ray_length, DebugColor::Red);

            // An origin shifted past the actor's edge can land inside a wall;
            // that only says the wall is in the way horizontally
            let shifted_out = origin.x < origins.bottom_left.x || origin.x > origins.bottom_right.x;
            let hit = world
                .raycast_all(origin, direction, ray_length, self.config.ground_mask)
                .into_iter()
                .find(|hit| !(shifted_out && hit.distance <= 0.0));

            if let Some(hit) = hit {
                // Later rays only see hits nearer than this one
                ray_length = hit.distance;
                nearest = Some(hit);
            }
        }

        let sample = ContactSample::from(nearest);
        if !sample.hit {
            return;
        }

        displacement.y = (sample.distance - skin) * direction_y;
        state.velocity.y = 0.0;

        if direction_y > 0.0 {
            state.contacts.set(ContactFlags::ABOVE, true);
        } else if self.spec.is_walkable(sample.normal) {
            state.contacts.set(ContactFlags::BELOW, true);
            state.ground_normal = sample.normal;
        } else {
            // Too steep to stand on
            state.velocity.x = 0.0;
            state.velocity_x_smoothing = 0.0;
            log::trace!("landed on steep ground, normal={:?}", sample.normal);
        }
    }

    // ========================================================================
    // Horizontal Collisions
    // ========================================================================

    fn horizontal_collisions(
        &self,
        origins: &ProbeOrigins,
        state: &mut ActorState,
        displacement: &mut Vec2,
        world: &dyn GeometryQuery,
        debug: &mut dyn DebugSink,
    ) {
        let skin = self.config.skin_width;
        let direction_x = displacement.x.signum();
        let direction = Vec2::X * direction_x;
        let move_distance = displacement.x.abs();
        let mut ray_length = move_distance + skin;

        let start = if direction_x < 0.0 {
            origins.bottom_left
        } else {
            origins.bottom_right
        };

        let mut wall: Option<RayHit> = None;
        let mut climb: Option<SlopeClimb> = None;
        for i in 0..self.config.horizontal_ray_count {
            let origin = start + Vec2::Y * (self.horizontal_ray_spacing * i as f32);
            debug.ray(origin, direction, ray_length, DebugColor::Blue);

            let Some(hit) = world.raycast(origin, direction, ray_length, self.config.ground_mask)
            else {
                continue;
            };

            if self.spec.is_walkable(hit.normal) {
                // Only the lowest ray can start a climb; higher rays touching
                // the same slope are not walls either
                if i == 0 {
                    climb = self.climb_slope(state, displacement, &hit, move_distance, direction_x);
                }
                continue;
            }

            ray_length = hit.distance;
            wall = Some(hit);
        }

        let Some(hit) = wall else {
            return;
        };

        let free = (hit.distance - skin).min(displacement.x.abs());
        if let Some(climb) = climb {
            // Only rise as far as the slope goes before the wall
            displacement.y = climb.rise_over((free - climb.approach).max(0.0));
        }
        displacement.x = free * direction_x;
        state.velocity.x = 0.0;
        state.velocity_x_smoothing = 0.0;

        if direction_x < 0.0 {
            state.contacts.set(ContactFlags::LEFT, true);
        } else {
            state.contacts.set(ContactFlags::RIGHT, true);
        }
    }

    /// Redirect horizontal motion up a walkable slope.
    ///
    /// The actor first covers the gap to the slope, then spends the rest of
    /// the horizontal distance travelling along it.
    fn climb_slope(
        &self,
        state: &mut ActorState,
        displacement: &mut Vec2,
        hit: &RayHit,
        move_distance: f32,
        direction_x: f32,
    ) -> Option<SlopeClimb> {
        let approach = (hit.distance - self.config.skin_width).max(0.0);
        let along = (move_distance - approach).max(0.0);
        let angle = slope_angle_degrees(hit.normal).to_radians();
        let climb_y = angle.sin() * along;

        // Already rising faster than the slope (e.g. jumping)
        if displacement.y > climb_y {
            return None;
        }

        displacement.y = climb_y;
        displacement.x = (approach + angle.cos() * along) * direction_x;
        state.velocity.y = 0.0;
        state.contacts.set(ContactFlags::BELOW, true);
        state.ground_normal = hit.normal;

        log::trace!(
            "climbing {:.1} degree slope, displacement={:?}",
            angle.to_degrees(),
            displacement
        );
        Some(SlopeClimb { approach, angle })
    }
}

/// A climb started by the lowest horizontal ray.
#[derive(Debug, Clone, Copy)]
struct SlopeClimb {
    /// Horizontal gap covered before reaching the slope.
    approach: f32,

    /// Slope angle in radians.
    angle: f32,
}

impl SlopeClimb {
    /// Height gained over a horizontal run along the slope.
    fn rise_over(&self, run: f32) -> f32 {
        self.angle.tan() * run
    }
}

impl MotionResolver for RaycastController {
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

        // Resting on the ground or pinned under a ceiling: drop last step's residual
        if next.contacts.vertical() {
            next.velocity.y = 0.0;
        }

        let origins = self.probe_origins(&next);
        let grounded = next.contacts.below();

        if input.jump_triggered && grounded {
            next.velocity.y = self.spec.jump_velocity;
            log::trace!("jump from {:?}", next.position);
        }

        integrate_horizontal(&self.spec, &mut next, &input, grounded, delta_time);
        next.velocity.y += self.spec.gravity_scale * delta_time;

        // Fresh classification for this step
        next.contacts.reset();
        next.ground_normal = Vec2::Y;

        let mut displacement = next.velocity * delta_time;

        if displacement.y != 0.0 {
            self.vertical_collisions(&origins, &mut next, &mut displacement, world, debug);
        }
        if displacement.x != 0.0 {
            self.horizontal_collisions(&origins, &mut next, &mut displacement, world, debug);
        }

        next.translate(displacement);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionWorld, LayerMask};
    use crate::debug::DebugLines;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    /// Instant horizontal response so velocities are exact.
    fn snappy_spec() -> MoveSpec {
        MoveSpec {
            acceleration_time_grounded: 0.0,
            acceleration_time_airborne: 0.0,
            ..MoveSpec::default()
        }
    }

    fn controller(spec: MoveSpec) -> RaycastController {
        RaycastController::new(spec, ResolverConfig::default())
    }

    /// Floor with its top at y=0.
    fn floor_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world
            .add_box(Vec2::new(0.0, -0.5), Vec2::new(100.0, 0.5), LayerMask::GROUND)
            .unwrap();
        world
    }

    /// Actor with its feet exactly on y=0.
    fn standing_actor(x: f32) -> ActorState {
        ActorState::new(Vec3::new(x, 1.0, 0.0))
    }

    fn bottom(state: &ActorState) -> f32 {
        state.position.y - ResolverConfig::default().half_extents.y
    }

    #[test]
    fn test_ray_spacing() {
        let controller = RaycastController::with_default_config();
        // Shrunk box is 0.97 x 1.97, 4 rays per edge
        assert!((controller.vertical_ray_spacing() - 0.97 / 3.0).abs() < 1e-5);
        assert!((controller.horizontal_ray_spacing() - 1.97 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_counts_clamped_at_init() {
        let config = ResolverConfig {
            horizontal_ray_count: 0,
            vertical_ray_count: 1,
            ..ResolverConfig::default()
        };
        let controller = RaycastController::new(MoveSpec::default(), config);

        assert_eq!(controller.config().horizontal_ray_count, 2);
        assert_eq!(controller.config().vertical_ray_count, 2);
        assert!(controller.vertical_ray_spacing().is_finite());
    }

    #[test]
    fn test_resting_contact_within_one_step() {
        let world = floor_world();
        let controller = controller(MoveSpec::default());

        let state = controller.step(&standing_actor(0.0), &MoveInput::default(), &world, DT);

        assert!(state.contacts.below(), "should be grounded");
        assert_eq!(state.velocity.y, 0.0);
        assert!(bottom(&state).abs() < 1e-4, "bottom={}", bottom(&state));

        // And it stays there
        let state = controller.step(&state, &MoveInput::default(), &world, DT);
        assert!(state.contacts.below());
        assert_eq!(state.velocity.y, 0.0);
        assert!(bottom(&state).abs() < 1e-4);
    }

    #[test]
    fn test_free_fall_accumulates() {
        let world = CollisionWorld::new();
        let controller = controller(MoveSpec::default());

        let mut state = ActorState::new(Vec3::new(0.0, 50.0, 0.0));
        let mut previous_speed = 0.0;

        for _ in 0..60 {
            state = controller.step(&state, &MoveInput::default(), &world, DT);
            assert!(!state.contacts.below());
            assert!(state.velocity.y < 0.0);
            assert!(
                state.velocity.y.abs() > previous_speed,
                "fall speed must grow: {} -> {}",
                previous_speed,
                state.velocity.y.abs()
            );
            previous_speed = state.velocity.y.abs();
        }
    }

    #[test]
    fn test_upward_gravity_accumulates_upward() {
        let world = CollisionWorld::new();
        let controller = controller(MoveSpec {
            gravity_scale: 10.0,
            ..MoveSpec::default()
        });

        let mut state = ActorState::default();
        for step in 1..=10 {
            state = controller.step(&state, &MoveInput::default(), &world, DT);
            assert!((state.velocity.y - 10.0 * DT * step as f32).abs() < 1e-4);
        }
    }

    #[test]
    fn test_landing_clamps_flush_to_floor() {
        let world = floor_world();
        let controller = controller(MoveSpec::default());

        // Feet 2.0 above the floor, falling 5 units this step
        let mut state = ActorState::new(Vec3::new(0.0, 3.0, 0.0));
        state.velocity.y = -300.0;

        let state = controller.step(&state, &MoveInput::default(), &world, DT);

        assert!(state.contacts.below());
        assert!(bottom(&state).abs() < 1e-4, "bottom={}", bottom(&state));
        assert_eq!(state.velocity.y, 0.0);
    }

    #[test]
    fn test_wall_clamps_flush() {
        let mut world = CollisionWorld::new();
        // Wall face at x=3
        world
            .add_box_min_max(Vec2::new(3.0, -10.0), Vec2::new(4.0, 10.0), LayerMask::GROUND)
            .unwrap();

        let controller = controller(MoveSpec {
            move_speed: 600.0, // 10 units per step
            ..snappy_spec()
        });

        let state = ActorState::new(Vec3::new(0.0, 0.0, 0.0));
        let input = MoveInput::new(Vec2::X, false);
        let state = controller.step(&state, &input, &world, DT);

        let right_edge = state.position.x + ResolverConfig::default().half_extents.x;
        assert!(state.contacts.right());
        assert!(!state.contacts.left());
        assert!((right_edge - 3.0).abs() < 1e-4, "right edge={right_edge}");
        assert_eq!(state.velocity.x, 0.0);
    }

    #[test]
    fn test_ceiling_sets_above() {
        let mut world = CollisionWorld::new();
        // Ceiling underside at y=2.5
        world
            .add_box_min_max(Vec2::new(-5.0, 2.5), Vec2::new(5.0, 3.0), LayerMask::GROUND)
            .unwrap();

        let controller = controller(MoveSpec::default());
        let mut state = ActorState::new(Vec3::new(0.0, 1.0, 0.0));
        state.velocity.y = 120.0; // 2 units this step, top starts at 2.0

        let state = controller.step(&state, &MoveInput::default(), &world, DT);

        let top = state.position.y + ResolverConfig::default().half_extents.y;
        assert!(state.contacts.above());
        assert!((top - 2.5).abs() < 1e-4, "top={top}");

        // Velocity is zeroed on the next step because of the ceiling contact
        let state = controller.step(&state, &MoveInput::default(), &world, DT);
        assert!(state.velocity.y < 0.0);
    }

    #[test]
    fn test_vertical_pass_keeps_nearest_hit() {
        let mut world = CollisionWorld::new();
        // Small block under the leftmost ray only, top at y=1.0
        world
            .add_box_min_max(Vec2::new(-0.6, 0.5), Vec2::new(-0.4, 1.0), LayerMask::GROUND)
            .unwrap();
        // Floor under every ray, top at y=0.0, hit by later rays
        world
            .add_box(Vec2::new(0.0, -0.5), Vec2::new(100.0, 0.5), LayerMask::GROUND)
            .unwrap();

        let controller = controller(MoveSpec::default());
        let mut state = ActorState::new(Vec3::new(0.0, 4.0, 0.0));
        state.velocity.y = -300.0;

        let state = controller.step(&state, &MoveInput::default(), &world, DT);

        assert!(state.contacts.below());
        assert!((bottom(&state) - 1.0).abs() < 1e-4, "landed at {} instead of the block", bottom(&state));
    }

    #[test]
    fn test_horizontal_pass_keeps_nearest_hit() {
        let mut world = CollisionWorld::new();
        // Near obstacle touched only by the lowest ray
        world
            .add_box_min_max(Vec2::new(1.0, 3.9), Vec2::new(1.5, 4.3), LayerMask::GROUND)
            .unwrap();
        // Farther wall touched by the upper rays
        world
            .add_box_min_max(Vec2::new(2.0, 4.5), Vec2::new(3.0, 7.0), LayerMask::GROUND)
            .unwrap();

        let controller = controller(MoveSpec {
            move_speed: 150.0, // 2.5 units per step
            gravity_scale: 0.0,
            ..snappy_spec()
        });

        let state = ActorState::new(Vec3::new(0.0, 5.0, 0.0));
        let state = controller.step(&state, &MoveInput::new(Vec2::X, false), &world, DT);

        let right_edge = state.position.x + 0.5;
        assert!(state.contacts.right());
        assert!((right_edge - 1.0).abs() < 1e-4, "right edge={right_edge}");
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let world = floor_world();
        let spec = MoveSpec::default();
        let controller = controller(spec.clone());

        // Settle onto the floor
        let grounded = controller.step(&standing_actor(0.0), &MoveInput::default(), &world, DT);
        assert!(grounded.contacts.below());

        let jumped = controller.step(&grounded, &MoveInput::new(Vec2::ZERO, true), &world, DT);
        // The impulse is applied before this step's gravity
        let expected = spec.jump_velocity + spec.gravity_scale * DT;
        assert!((jumped.velocity.y - expected).abs() < 1e-4, "vy={}", jumped.velocity.y);
        assert!(!jumped.contacts.below());
        assert!(jumped.position.y > grounded.position.y);

        // No new trigger: no new impulse, gravity keeps pulling
        let held = controller.step(&jumped, &MoveInput::default(), &world, DT);
        assert!(held.velocity.y < jumped.velocity.y);

        // A trigger while airborne does nothing
        let airborne = controller.step(&held, &MoveInput::new(Vec2::ZERO, true), &world, DT);
        assert!(airborne.velocity.y < held.velocity.y);
    }

    #[test]
    fn test_displacement_is_velocity_times_delta_time() {
        // Per-step displacement equals velocity * dt; the impulse itself is a
        // velocity, not a distance per step
        let world = CollisionWorld::new();
        let controller = controller(MoveSpec {
            gravity_scale: 0.0,
            move_speed: 6.0,
            ..snappy_spec()
        });

        let state = controller.step(&ActorState::default(), &MoveInput::new(Vec2::X, false), &world, DT);

        assert_eq!(state.velocity.x, 6.0);
        assert!((state.position.x - 6.0 * DT).abs() < 1e-6);
    }

    #[test]
    fn test_horizontal_smoothing_uses_contact_state() {
        let world = floor_world();
        let spec = MoveSpec {
            acceleration_time_grounded: 0.05,
            acceleration_time_airborne: 1.0,
            ..MoveSpec::default()
        };
        let controller = controller(spec);
        let input = MoveInput::new(Vec2::X, false);

        let grounded = controller.step(&standing_actor(0.0), &MoveInput::default(), &world, DT);
        let on_ground = controller.step(&grounded, &input, &world, DT);

        let airborne = ActorState::new(Vec3::new(0.0, 50.0, 0.0));
        let in_air = controller.step(&airborne, &input, &CollisionWorld::new(), DT);

        assert!(on_ground.velocity.x > in_air.velocity.x);
        assert!(in_air.velocity.x > 0.0);
    }

    #[test]
    fn test_negative_time_constant_snaps() {
        let world = floor_world();
        let controller = controller(MoveSpec {
            acceleration_time_grounded: -0.5,
            acceleration_time_airborne: -0.5,
            ..MoveSpec::default()
        });

        let state = controller.step(&standing_actor(0.0), &MoveInput::new(Vec2::NEG_X, false), &world, DT);

        assert_eq!(state.velocity.x, -controller.spec().move_speed);
        assert!(state.is_finite());
        assert_eq!(state.facing, -1.0);
    }

    #[test]
    fn test_steep_slope_blocks_like_a_wall() {
        let mut world = floor_world();
        // ~63 degree ramp starting at x=2
        world
            .add_convex_polygon(
                &[Vec2::new(2.0, 0.0), Vec2::new(3.0, 0.0), Vec2::new(3.0, 2.0)],
                LayerMask::GROUND,
            )
            .unwrap();

        let controller = controller(MoveSpec {
            max_slope_angle: 45.0,
            ..snappy_spec()
        });

        let start = controller.step(&standing_actor(1.4), &MoveInput::default(), &world, DT);
        let state = controller.step(&start, &MoveInput::new(Vec2::X, false), &world, DT);

        assert!(state.contacts.right(), "steep slope should register as a wall");
        assert_eq!(state.velocity.x, 0.0);
    }

    #[test]
    fn test_falling_beside_wall_is_not_grounded() {
        let mut world = CollisionWorld::new();
        // Wall face 0.05 right of the actor, no floor
        world
            .add_box_min_max(Vec2::new(0.55, -50.0), Vec2::new(1.55, 50.0), LayerMask::GROUND)
            .unwrap();

        let snappy = controller(MoveSpec {
            move_speed: 8.0,
            ..snappy_spec()
        });
        let arcade = controller(MoveSpec::arcade());

        let mut state = ActorState::new(Vec3::new(0.0, 5.0, 0.0));
        state.velocity = Vec2::new(8.0, -1.0);
        let input = MoveInput::new(Vec2::X, false);
        let state = snappy.step(&state, &input, &world, DT);

        assert!(!state.contacts.below(), "wall beside the actor is not ground");
        assert!(state.contacts.right());
        assert!(state.position.y < 5.0, "y={}", state.position.y);

        // Holding into the wall and mashing jump never climbs it
        let mut state = state;
        for _ in 0..120 {
            let previous_y = state.position.y;
            state = arcade.step(&state, &MoveInput::new(Vec2::X, true), &world, DT);
            assert!(!state.contacts.below());
            assert!(state.position.y <= previous_y, "rose from {previous_y} to {}", state.position.y);
        }
    }

    #[test]
    fn test_landing_on_steep_ground_stops_horizontal_motion() {
        // 60 degree face, normal (0.866, 0.5)
        let mut world = CollisionWorld::new();
        world
            .add_convex_polygon(
                &[Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0 * 3.0f32.sqrt())],
                LayerMask::GROUND,
            )
            .unwrap();

        let spec = MoveSpec {
            max_slope_angle: 45.0,
            ..snappy_spec()
        };
        let controller = controller(spec);

        let mut state = ActorState::new(Vec3::new(1.0, 5.0, 0.0));
        state.velocity.y = -300.0;
        let landed = controller.step(&state, &MoveInput::new(Vec2::NEG_X, false), &world, DT);

        assert!(!landed.contacts.below(), "steep ground is not standable");
        assert_eq!(landed.velocity.x, 0.0);
        assert_eq!(landed.velocity_x_smoothing, 0.0);
        assert_eq!(landed.velocity.y, 0.0);

        // No jump off it
        let next = controller.step(&landed, &MoveInput::new(Vec2::ZERO, true), &world, DT);
        assert!(next.velocity.y <= 0.0, "vy={}", next.velocity.y);
    }

    #[test]
    fn test_landing_on_gentle_slope_keeps_horizontal_motion() {
        // 30 degree face
        let mut world = CollisionWorld::new();
        world
            .add_convex_polygon(
                &[Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0 / 3.0f32.sqrt())],
                LayerMask::GROUND,
            )
            .unwrap();

        let spec = MoveSpec {
            max_slope_angle: 45.0,
            ..snappy_spec()
        };
        let controller = controller(spec.clone());

        let mut state = ActorState::new(Vec3::new(1.0, 5.0, 0.0));
        state.velocity.y = -300.0;
        let landed = controller.step(&state, &MoveInput::new(Vec2::NEG_X, false), &world, DT);

        assert!(landed.contacts.below());
        assert_eq!(landed.velocity.x, -spec.move_speed);
        assert!(landed.ground_normal.y < 1.0);
    }

    #[test]
    fn test_wall_above_slope_limits_climb() {
        let mut world = floor_world();
        // ~27 degree ramp starting at x=2
        world
            .add_convex_polygon(
                &[Vec2::new(2.0, 0.0), Vec2::new(6.0, 0.0), Vec2::new(6.0, 2.0)],
                LayerMask::GROUND,
            )
            .unwrap();
        // Overhang face at x=2.5, only the upper rays reach it
        world
            .add_box_min_max(Vec2::new(2.5, 1.0), Vec2::new(3.5, 6.0), LayerMask::GROUND)
            .unwrap();

        let controller = controller(MoveSpec {
            move_speed: 60.0, // 1 unit per step
            max_slope_angle: 45.0,
            ..snappy_spec()
        });

        let start = controller.step(&standing_actor(1.4), &MoveInput::default(), &world, DT);
        let state = controller.step(&start, &MoveInput::new(Vec2::X, false), &world, DT);

        let dx = state.position.x - start.position.x;
        let rise = state.position.y - start.position.y;
        assert!(state.contacts.right());
        assert!((dx - 0.6).abs() < 1e-3, "dx={dx}");
        // Never steeper than the 1:2 ramp
        assert!(rise >= 0.0 && rise <= 0.5 * dx + 1e-4, "rise={rise} over dx={dx}");
    }

    #[test]
    fn test_walkable_slope_keeps_horizontal_velocity() {
        let mut world = floor_world();
        // ~27 degree ramp starting at x=2
        world
            .add_convex_polygon(
                &[Vec2::new(2.0, 0.0), Vec2::new(6.0, 0.0), Vec2::new(6.0, 2.0)],
                LayerMask::GROUND,
            )
            .unwrap();

        let spec = MoveSpec {
            max_slope_angle: 45.0,
            ..snappy_spec()
        };
        let controller = controller(spec.clone());

        let start = controller.step(&standing_actor(1.4), &MoveInput::default(), &world, DT);
        let state = controller.step(&start, &MoveInput::new(Vec2::X, false), &world, DT);

        assert!(!state.contacts.right(), "walkable slope is not a wall");
        assert_eq!(state.velocity.x, spec.move_speed);
        assert!(state.position.x > start.position.x);

        // Keep walking: the actor climbs
        let mut climbing = state;
        for _ in 0..20 {
            climbing = controller.step(&climbing, &MoveInput::new(Vec2::X, false), &world, DT);
        }
        assert!(climbing.position.y > start.position.y + 0.5, "y={}", climbing.position.y);
        assert!(!climbing.contacts.right());
    }

    #[test]
    fn test_contact_flags_do_not_carry_over() {
        let world = floor_world();
        let controller = controller(MoveSpec::default());

        let grounded = controller.step(&standing_actor(0.0), &MoveInput::default(), &world, DT);
        assert!(grounded.contacts.below());

        let jumped = controller.step(&grounded, &MoveInput::new(Vec2::ZERO, true), &world, DT);
        assert_eq!(jumped.contacts, ContactFlags::default());
    }

    #[test]
    fn test_ignores_non_ground_layers() {
        let mut world = CollisionWorld::new();
        world
            .add_box(Vec2::new(0.0, -0.5), Vec2::new(100.0, 0.5), LayerMask::TRIGGER)
            .unwrap();

        let controller = controller(MoveSpec::default());
        let state = controller.step(&standing_actor(0.0), &MoveInput::default(), &world, DT);

        assert!(!state.contacts.below());
        assert!(state.position.y < 1.0);
    }

    #[test]
    fn test_invalid_delta_time_is_a_no_op() {
        let world = floor_world();
        let controller = controller(MoveSpec::default());
        let state = standing_actor(0.0);

        for dt in [0.0, -DT, f32::NAN, f32::INFINITY] {
            let next = controller.step(&state, &MoveInput::new(Vec2::X, true), &world, dt);
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_debug_rays_are_color_coded() {
        let world = floor_world();
        let controller = controller(snappy_spec());
        let mut debug = DebugLines::new();

        let state = standing_actor(0.0);
        let next = controller.resolve_step(&state, &MoveInput::new(Vec2::X, false), &world, DT, &mut debug);

        assert_eq!(debug.count(DebugColor::Red), 4);
        assert_eq!(debug.count(DebugColor::Blue), 4);

        // Same result as without a sink
        let plain = controller.step(&state, &MoveInput::new(Vec2::X, false), &world, DT);
        assert_eq!(next, plain);
    }

    #[test]
    fn test_repeated_runs_are_bit_identical() {
        let world = floor_world();
        let controller = controller(MoveSpec::default());

        let run = || {
            let mut state = standing_actor(0.0);
            let mut trace = Vec::new();
            for i in 0..240 {
                let axis = Vec2::new(((i / 30) % 3) as f32 - 1.0, 0.0);
                let input = MoveInput::new(axis, i % 45 == 0);
                state = controller.step(&state, &input, &world, DT);
                trace.push((state.position.x.to_bits(), state.position.y.to_bits(), state.velocity.x.to_bits()));
            }
            trace
        };

        assert_eq!(run(), run());
    }
}
