//! Ledge - headless runner
//!
//! Plays a scripted input tape through the test course with both motion
//! resolvers and reports where the actor ended up.
//!
//! ```text
//! ledge [tuning.toml]
//! RUST_LOG=debug ledge      # per-tick trace
//! ```

use anyhow::{Context, Result};
use ledge_game::{
    state_checksum, InputTape, Level, PlayerInput, ResolverKind, Simulation, SimulationConfig,
    TuningStore,
};

/// Walk right over the ramp, hop off the plateau, push the crate, then
/// turn around.
fn scripted_tape(tick_rate: u32) -> InputTape {
    let mut tape = InputTape::new(tick_rate);
    tape.hold(PlayerInput::default(), 30);
    tape.hold(PlayerInput::right(), 150);
    tape.hold(PlayerInput::right().with_jump(), 20);
    tape.hold(PlayerInput::right(), 200);
    tape.hold(PlayerInput::default().with_jump(), 10);
    tape.hold(PlayerInput::left(), 120);
    tape.hold(PlayerInput::default(), 60);
    tape
}

fn main() -> Result<()> {
    env_logger::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => TuningStore::load(&path)
            .with_context(|| format!("loading tuning data from {path}"))?,
        None => {
            log::info!("no tuning file given, using defaults");
            TuningStore::default()
        }
    };

    for kind in ResolverKind::ALL {
        let config = SimulationConfig::from_tuning(&tuning, kind);
        let level = Level::test_course().context("building test course")?;
        let mut sim = Simulation::new(config, level);

        let tape = scripted_tape(sim.config.tick_rate);
        let trajectory = sim
            .replay(&tape)
            .with_context(|| format!("replaying tape with {kind:?}"))?;

        for (frame, state) in trajectory.iter().enumerate() {
            log::debug!(
                "{:?} frame {:4}: pos=({:8.3}, {:8.3}) vel=({:7.3}, {:7.3}) contacts={:#06b}",
                kind,
                frame,
                state.position.x,
                state.position.y,
                state.velocity.x,
                state.velocity.y,
                state.contacts.0
            );
        }

        let airborne = trajectory.iter().filter(|s| !s.grounded()).count();
        let peak = trajectory
            .iter()
            .map(|s| s.position.y)
            .fold(f32::NEG_INFINITY, f32::max);

        log::info!(
            "{:?}: {} frames, final position ({:.3}, {:.3}), peak height {:.3}, {} frames airborne, checksum {:016x}",
            kind,
            trajectory.len(),
            sim.actor.position.x,
            sim.actor.position.y,
            peak,
            airborne,
            state_checksum(&sim.actor)
        );
    }

    Ok(())
}
