//! Game simulation - the fixed-tick loop.
//!
//! The simulation is deterministic: the same level, tuning and input tape
//! always produce a bit-identical trajectory, which is what replays rely on.

use ledge_physics::{
    probe_interaction, ActorState, DebugLines, DebugSink, Interaction, MotionResolver, MoveSpec,
    NoDebug, RaycastController, ResolverConfig, ShapeCastController,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{InputSampler, PlayerInput};
use crate::level::Level;
use crate::tuning::TuningStore;

/// Which motion resolver drives the actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverKind {
    /// Edge ray probes.
    #[default]
    Raycast,
    /// Full-collider sweeps.
    ShapeCast,
}

impl ResolverKind {
    pub const ALL: [ResolverKind; 2] = [ResolverKind::Raycast, ResolverKind::ShapeCast];

    /// Construct the resolver for this kind.
    pub fn build(self, spec: MoveSpec, config: ResolverConfig) -> Box<dyn MotionResolver> {
        match self {
            ResolverKind::Raycast => Box::new(RaycastController::new(spec, config)),
            ResolverKind::ShapeCast => Box::new(ShapeCastController::new(spec, config)),
        }
    }
}

/// Game simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    pub resolver: ResolverKind,

    pub move_spec: MoveSpec,

    pub resolver_config: ResolverConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            resolver: ResolverKind::default(),
            move_spec: MoveSpec::default(),
            resolver_config: ResolverConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Config using the values from a tuning store.
    pub fn from_tuning(tuning: &TuningStore, resolver: ResolverKind) -> Self {
        Self {
            resolver,
            move_spec: tuning.spec().clone(),
            resolver_config: tuning.resolver_config_or_default(),
            ..Self::default()
        }
    }

    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

/// Failure to encode, decode or play back an [`InputTape`].
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to encode input tape: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("failed to decode input tape: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("input tape has {extra} trailing bytes")]
    TrailingBytes { extra: usize },

    #[error("tape was recorded at {tape} Hz but the simulation runs at {simulation} Hz")]
    TickRateMismatch { tape: u32, simulation: u32 },
}

/// Raw inputs recorded one per frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTape {
    /// Tick rate the tape was recorded at.
    pub tick_rate: u32,

    pub frames: Vec<PlayerInput>,
}

impl InputTape {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick_rate,
            frames: Vec::new(),
        }
    }

    /// Append one frame of input.
    pub fn record(&mut self, input: PlayerInput) {
        self.frames.push(input);
    }

    /// Append the same input for `count` frames.
    pub fn hold(&mut self, input: PlayerInput, count: usize) {
        self.frames.extend(std::iter::repeat(input).take(count));
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Serialize with bincode.
    pub fn encode(&self) -> Result<Vec<u8>, ReplayError> {
        Ok(bincode::serde::encode_to_vec(self, bincode::config::standard())?)
    }

    /// Deserialize a tape written by [`encode`](Self::encode).
    pub fn decode(bytes: &[u8]) -> Result<Self, ReplayError> {
        let (tape, read): (Self, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        if read != bytes.len() {
            return Err(ReplayError::TrailingBytes {
                extra: bytes.len() - read,
            });
        }
        Ok(tape)
    }
}

/// Fold the bit patterns of an actor state into one value.
///
/// Two states have the same checksum only if every field is bit-identical
/// (up to hash collisions), so this is stricter than float comparison.
pub fn state_checksum(state: &ActorState) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let words = [
        state.position.x.to_bits(),
        state.position.y.to_bits(),
        state.position.z.to_bits(),
        state.velocity.x.to_bits(),
        state.velocity.y.to_bits(),
        state.ground_normal.x.to_bits(),
        state.ground_normal.y.to_bits(),
        state.velocity_x_smoothing.to_bits(),
        state.facing.to_bits(),
        u32::from(state.contacts.0),
    ];

    words.iter().flat_map(|w| w.to_le_bytes()).fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// The main game simulation: one actor in one level.
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    /// The simulated actor.
    pub actor: ActorState,

    /// Interactable found in front of the actor on the last tick.
    pub interaction: Option<Interaction>,

    sampler: InputSampler,
    resolver: Box<dyn MotionResolver>,
    debug_lines: Option<DebugLines>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("frame", &self.frame)
            .field("level", &self.level.id)
            .field("resolver", &self.config.resolver)
            .field("actor", &self.actor)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Create a new simulation with the actor at the level's first spawn.
    pub fn new(config: SimulationConfig, level: Level) -> Self {
        let resolver = config
            .resolver
            .build(config.move_spec.clone(), config.resolver_config.clone());

        let mut sim = Self {
            frame: 0,
            config,
            level,
            actor: ActorState::default(),
            interaction: None,
            sampler: InputSampler::new(),
            resolver,
            debug_lines: None,
        };
        sim.reset();
        sim
    }

    /// Put the actor back at the spawn point and rewind the frame counter.
    pub fn reset(&mut self) {
        let spawn = self.level.default_spawn();
        self.actor = ActorState::new(spawn.position);
        self.actor.facing = spawn.facing;
        self.interaction = None;
        self.sampler.reset();
        self.frame = 0;
    }

    /// Start or stop recording debug geometry.
    pub fn set_debug_lines(&mut self, enabled: bool) {
        self.debug_lines = enabled.then(DebugLines::new);
    }

    /// Debug geometry recorded during the last tick, if enabled.
    pub fn debug_lines(&self) -> Option<&DebugLines> {
        self.debug_lines.as_ref()
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, input: &PlayerInput) -> &ActorState {
        let delta_time = self.config.delta_time();
        let move_input = self.sampler.sample(input);

        let mut no_debug = NoDebug;
        let debug: &mut dyn DebugSink = match self.debug_lines.as_mut() {
            Some(lines) => {
                lines.clear();
                lines
            }
            None => &mut no_debug,
        };

        self.actor = self.resolver.resolve_step(
            &self.actor,
            &move_input,
            &self.level.collision,
            delta_time,
            debug,
        );
        self.interaction = probe_interaction(
            &self.actor,
            self.resolver.spec(),
            self.resolver.config(),
            &self.level.collision,
            debug,
        );

        log::trace!(
            "frame {} pos=({:.3}, {:.3}) vel=({:.3}, {:.3}) contacts={:#06b}",
            self.frame,
            self.actor.position.x,
            self.actor.position.y,
            self.actor.velocity.x,
            self.actor.velocity.y,
            self.actor.contacts.0
        );

        self.frame += 1;
        &self.actor
    }

    /// Reset, play a whole tape, and return the state after every frame.
    pub fn replay(&mut self, tape: &InputTape) -> Result<Vec<ActorState>, ReplayError> {
        if tape.tick_rate != self.config.tick_rate {
            return Err(ReplayError::TickRateMismatch {
                tape: tape.tick_rate,
                simulation: self.config.tick_rate,
            });
        }

        self.reset();
        let trajectory = tape.frames.iter().map(|input| self.tick(input).clone()).collect();

        log::debug!(
            "replayed {} frames with {:?}, checksum {:016x}",
            tape.len(),
            self.config.resolver,
            self.state_checksum()
        );
        Ok(trajectory)
    }

    /// Checksum of the current actor state.
    pub fn state_checksum(&self) -> u64 {
        state_checksum(&self.actor)
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================
