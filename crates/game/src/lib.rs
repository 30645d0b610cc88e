//! Ledge Game Logic
//!
//! This crate runs the fixed-tick platformer simulation on top of
//! `ledge-physics`:
//!
//! - Input sampling with edge-triggered jump
//! - Tuning data loaded from TOML
//! - Levels built from static brushes
//! - Deterministic simulation and bincode replay tapes
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Simulation                           │
//! │  ┌─────────────┐    ┌────────────────┐    ┌───────────────┐  │
//! │  │ PlayerInput │───►│ MotionResolver │───►│ ActorState    │  │
//! │  │ (sampled)   │    │ (raycast or    │    │ (position,    │  │
//! │  └─────────────┘    │  shape cast)   │    │  contacts)    │  │
//! │        ▲            └────────────────┘    └───────────────┘  │
//! │        │                    ▲                                │
//! │   InputTape            TuningStore + Level                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod input;
pub mod level;
pub mod simulation;
pub mod tuning;

// Re-export main types
pub use input::{InputSampler, PlayerInput};
pub use level::{Level, SpawnPoint};
pub use simulation::{state_checksum, InputTape, ReplayError, ResolverKind, Simulation, SimulationConfig};
pub use tuning::{TuningError, TuningStore};

// Re-export physics types for convenience
pub use ledge_physics::{ActorState, CollisionWorld, MotionResolver, MoveInput, MoveSpec, ResolverConfig};
