//! The resolver interface shared by both controller variants.

use crate::collision::GeometryQuery;
use crate::debug::{DebugSink, NoDebug};

use super::config::{MoveSpec, ResolverConfig};
use super::smoothing::smooth_damp;
use super::state::{ActorState, MoveInput};

/// Resolves one fixed simulation step for a single actor.
///
/// Implementations are immutable after construction; all per-actor data
/// lives in [`ActorState`]. The same state, input, world and `delta_time`
/// always produce the same result.
pub trait MotionResolver {
    /// Advance `state` by one step and return the new state.
    ///
    /// Every ray or sweep cast is reported to `debug`.
    fn resolve_step(
        &self,
        state: &ActorState,
        input: &MoveInput,
        world: &dyn GeometryQuery,
        delta_time: f32,
        debug: &mut dyn DebugSink,
    ) -> ActorState;

    /// Movement tuning this resolver was built with.
    fn spec(&self) -> &MoveSpec;

    /// Collider and probe settings, with ray counts already clamped.
    fn config(&self) -> &ResolverConfig;

    /// [`resolve_step`](Self::resolve_step) without debug output.
    fn step(
        &self,
        state: &ActorState,
        input: &MoveInput,
        world: &dyn GeometryQuery,
        delta_time: f32,
    ) -> ActorState {
        self.resolve_step(state, input, world, delta_time, &mut NoDebug)
    }
}

/// Whether a step with this `delta_time` should run at all.
pub(crate) fn valid_delta_time(delta_time: f32) -> bool {
    delta_time.is_finite() && delta_time > 0.0
}

/// Smooth horizontal velocity toward the input target and update facing.
pub(crate) fn integrate_horizontal(
    spec: &MoveSpec,
    state: &mut ActorState,
    input: &MoveInput,
    grounded: bool,
    delta_time: f32,
) {
    let target = input.axis.x * spec.move_speed;
    let mut rate = state.velocity_x_smoothing;

    state.velocity.x = smooth_damp(
        state.velocity.x,
        target,
        &mut rate,
        spec.acceleration_time(grounded),
        delta_time,
    );
    state.velocity_x_smoothing = rate;
    state.face(input.axis.x);
}
