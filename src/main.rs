//! Headless driver
//!
//! Plays a scripted session against the simulation core and logs what
//! happened. Useful for eyeballing tuning changes without a renderer:
//!
//! ```text
//! RUST_LOG=info asteroids-sim [settings.json] [frames] [seed]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on wasm
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), asteroids_sim::SimError> {
    use asteroids_sim::Settings;
    use asteroids_sim::sim::{
        Action, DifficultyState, Mode, SoundEvent, TurnDirection, WorldState, tick,
    };

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) if path != "-" => Settings::load(&path)?,
        _ => Settings::default(),
    };
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3_600);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5EED);
    settings.validate()?;

    log::info!("Asteroids sim (headless) starting: {frames} frames, seed {seed}");

    let mode = Mode::default();
    let mut state = WorldState::new(mode, seed, &settings)?;
    state = tick(&state, &Action::AddInitialAsteroids { mode: Some(mode) }, &settings)?;

    let mut breaks = 0usize;
    let mut destroys = 0usize;
    for frame in 1..=frames {
        // Ramp difficulty slowly over the session
        let difficulty = DifficultyState {
            area_scale: 1.0 + frame as f32 / 3_600.0,
            ..Default::default()
        };

        let mut actions = vec![Action::rotate(TurnDirection::Left)];
        if frame % 10 == 0 {
            actions.push(Action::Shoot);
        }
        if frame % 45 == 0 {
            actions.push(Action::ThrustStart);
            actions.push(Action::ThrustStop);
        }
        if state.bombs > 0 && state.asteroids.len() > 12 {
            actions.push(Action::TriggerBomb);
        }
        actions.push(Action::advance(frame, difficulty));

        for action in &actions {
            state = tick(&state, action, &settings)?;
        }

        for sound in state.drain_sounds() {
            match sound {
                SoundEvent::AsteroidBreak => breaks += 1,
                SoundEvent::AsteroidDestroy => destroys += 1,
            }
        }

        if state.is_game_over() {
            log::info!("Game over at frame {frame}");
            break;
        }
    }

    log::info!(
        "Finished at frame {}: score {}, lives {}, multiplier x{}, bombs {}, \
         {} asteroids, {} breaks, {} destroys",
        state.frame,
        state.score,
        state.lives,
        state.multiplier,
        state.bombs,
        state.asteroids.len(),
        breaks,
        destroys
    );
    println!("score={} lives={} frame={}", state.score, state.lives, state.frame);
    Ok(())
}
