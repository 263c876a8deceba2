//! Frame reducer
//!
//! `tick` is the single entry point: it takes the current world, one action and
//! the settings, and returns the next world. It never edits its input.

use serde::{Deserialize, Serialize};

use super::collision::{
    CollisionInput, handle_collisions, points_for_collision, sub_asteroids_for_collided_asteroids,
};
use super::geometry::direction_from_angle;
use super::movers::{
    TurnDirection, move_asteroid, move_bullet, move_debris, move_powerup, move_ship, rotate_ship,
    stop_thrusting_ship, thrust_ship,
};
use super::spawner::{
    additional_asteroids_for_current_asteroids, debris_for_destroyed_asteroids, initial_asteroids,
    maybe_spawn_powerup,
};
use super::state::{Asteroid, Body, Bullet, DifficultyState, Mode, Ship, SoundEvent, WorldState};
use crate::error::SimError;
use crate::settings::Settings;

/// Everything the host can ask the simulation to do.
///
/// Payload fields are optional because actions arrive as data from the host;
/// an action missing its payload is dropped rather than guessed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Advance one frame
    Move {
        frame_count: Option<u64>,
        difficulty: Option<DifficultyState>,
    },
    ThrustStart,
    ThrustStop,
    Rotate { direction: Option<TurnDirection> },
    Shoot,
    /// Pausing is the host's job (it stops sending `Move`); passes through
    TogglePause,
    Reset { mode: Option<Mode> },
    SetMode { mode: Option<Mode> },
    TriggerBomb,
    AddAsteroid { asteroid: Option<Asteroid> },
    AddInitialAsteroids { mode: Option<Mode> },
}

impl Action {
    /// Well-formed `Move`
    pub fn advance(frame_count: u64, difficulty: DifficultyState) -> Self {
        Action::Move {
            frame_count: Some(frame_count),
            difficulty: Some(difficulty),
        }
    }

    pub fn rotate(direction: TurnDirection) -> Self {
        Action::Rotate {
            direction: Some(direction),
        }
    }
}

/// Apply one action to the world.
///
/// Only a mode with no settings table entry is an error; every other bad
/// input returns the prior state unchanged.
pub fn tick(
    state: &WorldState,
    action: &Action,
    settings: &Settings,
) -> Result<WorldState, SimError> {
    let next = match action {
        Action::Move {
            frame_count: Some(frame),
            difficulty: Some(difficulty),
        } => advance_frame(state, *frame, difficulty, settings),
        Action::Move { .. } => {
            log::debug!("Dropping Move without frame count or difficulty");
            state.clone()
        }
        Action::ThrustStart => WorldState {
            ship: thrust_ship(state.ship, &settings.ship),
            ..state.clone()
        },
        Action::ThrustStop => WorldState {
            ship: stop_thrusting_ship(state.ship),
            ..state.clone()
        },
        Action::Rotate {
            direction: Some(direction),
        } => WorldState {
            ship: rotate_ship(state.ship, *direction, &settings.ship),
            ..state.clone()
        },
        Action::Rotate { direction: None } => {
            log::debug!("Dropping Rotate without direction");
            state.clone()
        }
        Action::Shoot => shoot(state, settings),
        Action::TogglePause => state.clone(),
        Action::Reset { mode: Some(mode) } | Action::SetMode { mode: Some(mode) } => {
            reset(state, *mode, settings)?
        }
        Action::TriggerBomb => trigger_bomb(state, settings),
        Action::AddAsteroid {
            asteroid: Some(asteroid),
        } => {
            let mut asteroids = state.asteroids.clone();
            asteroids.push(*asteroid);
            WorldState {
                asteroids,
                ..state.clone()
            }
        }
        Action::AddInitialAsteroids { mode: Some(mode) } => {
            add_initial_asteroids(state, *mode, settings)?
        }
        Action::Reset { mode: None }
        | Action::SetMode { mode: None }
        | Action::AddAsteroid { asteroid: None }
        | Action::AddInitialAsteroids { mode: None } => {
            log::debug!("Dropping {action:?} without payload");
            state.clone()
        }
    };
    Ok(next)
}

/// Still alive at `frame` given its spawn frame
#[inline]
fn alive(spawn_frame: u64, frame: u64, lifetime: u64) -> bool {
    frame.saturating_sub(spawn_frame) < lifetime
}

/// Move every entity, resolve collisions, replenish, and assemble the next world
fn advance_frame(
    state: &WorldState,
    frame: u64,
    difficulty: &DifficultyState,
    settings: &Settings,
) -> WorldState {
    let world = &settings.world;
    let mut rng = state.rng.to_rng();

    // Kinematics
    let ship = move_ship(state.ship, settings);
    let asteroids: Vec<Asteroid> = if state.freeze_powerup_active(frame, settings) {
        state.asteroids.clone()
    } else {
        state.asteroids.iter().map(|a| move_asteroid(*a, world)).collect()
    };
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter(|b| alive(b.spawn_frame, frame, settings.bullets.lifetime_frames))
        .map(|b| move_bullet(*b, world))
        .collect();
    let mut debris: Vec<_> = state
        .debris
        .iter()
        .filter(|d| alive(d.spawn_frame, frame, settings.debris.lifetime_frames))
        .map(|d| move_debris(*d, world))
        .collect();
    let powerups: Vec<_> = state
        .powerups
        .iter()
        .filter(|p| alive(p.spawn_frame, frame, settings.powerups.lifetime_frames))
        .map(|p| move_powerup(*p, world))
        .collect();

    // Interactions
    let minimum_radius = settings.asteroids.minimum_radius;
    let outcome = handle_collisions(
        CollisionInput {
            ship: &ship,
            asteroids: &asteroids,
            bullets: &bullets,
            powerups: &powerups,
            minimum_radius,
        },
        points_for_collision(state.multiplier, settings),
    );
    let lives_diff = outcome.lives_diff();

    let sub_asteroids = sub_asteroids_for_collided_asteroids(
        &outcome.collided_asteroids,
        difficulty.speed_scale,
        settings,
        &mut rng,
    );
    let destroyed: Vec<Asteroid> = outcome
        .destroyed_by_bullets(minimum_radius)
        .chain(&outcome.ship_struck_asteroids)
        .copied()
        .collect();
    debris.extend(debris_for_destroyed_asteroids(&destroyed, frame, &settings.debris));

    let ship = if outcome.ship_hit {
        log::info!(
            "Ship hit at frame {frame}, {} lives left",
            state.lives.saturating_sub(1)
        );
        Ship::spawn(settings)
    } else {
        ship
    };

    // Replenishment
    let mut asteroids = outcome.surviving_asteroids;
    asteroids.extend(sub_asteroids);
    let additional = additional_asteroids_for_current_asteroids(
        &asteroids,
        &ship,
        difficulty,
        settings,
        &mut rng,
    );
    asteroids.extend(additional);

    let mut powerups = outcome.surviving_powerups;
    powerups.extend(maybe_spawn_powerup(difficulty, frame, settings, &mut rng));

    let scoring = &settings.scoring;
    let multiplier = if outcome.ship_hit {
        1
    } else if frame > 0 && frame.is_multiple_of(scoring.multiplier_interval_frames.max(1)) {
        (state.multiplier + 1).min(scoring.max_multiplier.max(1))
    } else {
        state.multiplier
    };

    let mut queued_sounds = state.queued_sounds.clone();
    queued_sounds.extend(outcome.sounds);

    WorldState {
        ship,
        asteroids,
        bullets: outcome.surviving_bullets,
        debris,
        powerups,
        score: state.score + outcome.points_awarded,
        lives: state.lives.saturating_add_signed(lives_diff),
        multiplier,
        bombs: state.bombs + outcome.bombs_collected,
        bullet_powerup_start_frame: if outcome.begin_bullet_powerup {
            Some(frame)
        } else {
            state.bullet_powerup_start_frame
        },
        freeze_powerup_start_frame: if outcome.begin_freeze_powerup {
            Some(frame)
        } else {
            state.freeze_powerup_start_frame
        },
        queued_sounds,
        mode: state.mode,
        frame,
        rng: state.rng.advance(),
    }
}

/// One bullet from the nose, or a fan of them while the bullet powerup is active
fn shoot(state: &WorldState, settings: &Settings) -> WorldState {
    let tuning = &settings.bullets;
    let fan = &tuning.powerup_fan_degrees;
    let offsets: &[f32] = if state.bullet_powerup_active(state.frame, settings) && !fan.is_empty() {
        fan.as_slice()
    } else {
        &[0.0]
    };

    let ship = &state.ship;
    let origin = ship.nose();
    let mut bullets = state.bullets.clone();
    bullets.extend(offsets.iter().map(|offset| {
        let dir = direction_from_angle(ship.heading_degrees + offset);
        Bullet {
            body: Body::new(origin, dir * tuning.speed, tuning.radius),
            spawn_frame: state.frame,
        }
    }));

    WorldState {
        bullets,
        ..state.clone()
    }
}

/// Clear the field into debris if a bomb is charged; consumes one charge
fn trigger_bomb(state: &WorldState, settings: &Settings) -> WorldState {
    if state.bombs == 0 {
        return state.clone();
    }
    log::info!(
        "Bomb detonated, clearing {} asteroids",
        state.asteroids.len()
    );

    let mut debris = state.debris.clone();
    debris.extend(debris_for_destroyed_asteroids(
        &state.asteroids,
        state.frame,
        &settings.debris,
    ));
    let mut queued_sounds = state.queued_sounds.clone();
    queued_sounds.extend(std::iter::repeat_n(
        SoundEvent::AsteroidDestroy,
        state.asteroids.len(),
    ));

    WorldState {
        asteroids: Vec::new(),
        debris,
        bombs: state.bombs - 1,
        queued_sounds,
        ..state.clone()
    }
}

/// Fresh game in `mode`, keeping the frame clock and RNG lineage
fn reset(state: &WorldState, mode: Mode, settings: &Settings) -> Result<WorldState, SimError> {
    let fresh = WorldState::new(mode, state.rng.seed, settings)?;
    log::info!("Reset to {mode:?} with {} lives", fresh.lives);
    Ok(WorldState {
        frame: state.frame,
        rng: state.rng.advance(),
        ..fresh
    })
}

fn add_initial_asteroids(
    state: &WorldState,
    mode: Mode,
    settings: &Settings,
) -> Result<WorldState, SimError> {
    let area_scale = settings.mode(mode)?.starting_area_scale;
    let mut rng = state.rng.to_rng();
    let mut asteroids = state.asteroids.clone();
    asteroids.extend(initial_asteroids(
        &state.asteroids,
        area_scale,
        &state.ship,
        settings,
        &mut rng,
    ));
    log::debug!("Opening field for {mode:?}: {} asteroids", asteroids.len());

    Ok(WorldState {
        asteroids,
        rng: state.rng.advance(),
        ..state.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::f32::consts::SQRT_2;

    use crate::sim::state::{Powerup, PowerupKind};

    /// No replenishment, no random powerups
    fn calm() -> DifficultyState {
        DifficultyState {
            area_scale: 0.0,
            max_spawn_per_frame: 0,
            speed_scale: 1.0,
            powerup_chance: 0.0,
        }
    }

    fn world(settings: &Settings) -> WorldState {
        WorldState::new(Mode::Normal, 12345, settings).unwrap()
    }

    fn still_asteroid(x: f32, y: f32, r: f32) -> Asteroid {
        Asteroid::new(Vec2::new(x, y), Vec2::ZERO, r)
    }

    fn still_bullet(x: f32, y: f32, frame: u64) -> Bullet {
        Bullet {
            body: Body::new(Vec2::new(x, y), Vec2::ZERO, 2.0),
            spawn_frame: frame,
        }
    }

    #[test]
    fn test_ship_collision_scenario() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.ship = Ship::at(Vec2::new(250.0, 250.0), &settings.ship);
        state.asteroids = vec![still_asteroid(250.0, 250.0, 40.0)];
        state.multiplier = 4;

        let next = tick(&state, &Action::advance(1, calm()), &settings).unwrap();
        assert_eq!(next.lives, state.lives - 1);
        assert!(next.asteroids.is_empty());
        assert_eq!(next.debris.len(), settings.debris.count as usize);
        assert_eq!(next.multiplier, 1);
        assert_eq!(next.score, 0);
        assert_eq!(next.queued_sounds, vec![SoundEvent::AsteroidDestroy]);
    }

    #[test]
    fn test_bullet_split_scenario() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.asteroids = vec![still_asteroid(100.0, 100.0, 30.0)];
        state.bullets = vec![still_bullet(100.0, 120.0, 0)];

        let next = tick(&state, &Action::advance(1, calm()), &settings).unwrap();
        assert_eq!(next.asteroids.len(), 2);
        for child in &next.asteroids {
            assert!((child.body.radius - 30.0 / SQRT_2).abs() < 1e-4);
            assert!((child.body.radius - 21.2).abs() < 0.1);
        }
        assert!(!next.asteroids.contains(&state.asteroids[0]));
        assert!(next.bullets.is_empty());
        assert!(next.debris.is_empty());
        assert_eq!(next.queued_sounds, vec![SoundEvent::AsteroidBreak]);
    }

    #[test]
    fn test_score_scales_with_multiplier() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.score = 100;
        state.multiplier = 2;
        state.asteroids = vec![
            still_asteroid(100.0, 100.0, 30.0), // breaks
            still_asteroid(400.0, 100.0, 20.0), // destroyed
        ];
        state.bullets = vec![still_bullet(100.0, 100.0, 0), still_bullet(400.0, 100.0, 0)];

        let next = tick(&state, &Action::advance(1, calm()), &settings).unwrap();
        let scoring = settings.scoring;
        assert_eq!(
            next.score,
            100 + 2 * (scoring.points_for_break + scoring.points_for_destroy)
        );
        assert_eq!(next.multiplier, 2);
        assert_eq!(next.debris.len(), settings.debris.count as usize);
        assert_eq!(
            next.queued_sounds,
            vec![SoundEvent::AsteroidBreak, SoundEvent::AsteroidDestroy]
        );
    }

    #[test]
    fn test_three_overlapping_asteroids_cost_one_life() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.multiplier = 3;
        state.asteroids = vec![
            still_asteroid(250.0, 250.0, 30.0),
            still_asteroid(260.0, 255.0, 30.0),
            still_asteroid(240.0, 245.0, 30.0),
        ];

        let next = tick(&state, &Action::advance(1, calm()), &settings).unwrap();
        assert_eq!(next.lives, state.lives - 1);
        assert_eq!(next.multiplier, 1);
        assert!(next.asteroids.is_empty());
        assert_eq!(next.debris.len(), 3 * settings.debris.count as usize);
    }

    #[test]
    fn test_lives_stop_at_zero() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.lives = 0;
        state.asteroids = vec![still_asteroid(250.0, 250.0, 30.0)];

        let next = tick(&state, &Action::advance(1, calm()), &settings).unwrap();
        assert_eq!(next.lives, 0);
        assert!(next.is_game_over());
    }

    #[test]
    fn test_move_without_payload_is_noop() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.asteroids = vec![Asteroid::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0), 30.0)];

        let missing_frame = Action::Move {
            frame_count: None,
            difficulty: Some(calm()),
        };
        let missing_difficulty = Action::Move {
            frame_count: Some(5),
            difficulty: None,
        };
        assert_eq!(tick(&state, &missing_frame, &settings).unwrap(), state);
        assert_eq!(tick(&state, &missing_difficulty, &settings).unwrap(), state);
        assert_eq!(
            tick(&state, &Action::Rotate { direction: None }, &settings).unwrap(),
            state
        );
        assert_eq!(tick(&state, &Action::Reset { mode: None }, &settings).unwrap(), state);
    }

    #[test]
    fn test_bomb_without_charge_is_noop() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.asteroids = vec![still_asteroid(100.0, 100.0, 30.0)];
        assert_eq!(state.bombs, 0);

        let next = tick(&state, &Action::TriggerBomb, &settings).unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_bomb_pickup_then_trigger_round_trips() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.asteroids = vec![
            still_asteroid(50.0, 50.0, 30.0),
            still_asteroid(450.0, 450.0, 20.0),
        ];
        state.powerups = vec![Powerup {
            body: Body::new(Vec2::new(250.0, 250.0), Vec2::ZERO, 10.0),
            kind: PowerupKind::Bomb,
            spawn_frame: 0,
        }];

        let charged = tick(&state, &Action::advance(1, calm()), &settings).unwrap();
        assert_eq!(charged.bombs, 1);
        assert!(charged.powerups.is_empty());

        let bombed = tick(&charged, &Action::TriggerBomb, &settings).unwrap();
        assert_eq!(bombed.bombs, state.bombs);
        assert!(bombed.asteroids.is_empty());
        assert_eq!(bombed.debris.len(), 2 * settings.debris.count as usize);
        assert_eq!(bombed.queued_sounds, vec![SoundEvent::AsteroidDestroy; 2]);
        assert_eq!(bombed.score, charged.score);
    }

    #[test]
    fn test_reset_from_any_state() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.asteroids = vec![still_asteroid(100.0, 100.0, 30.0)];
        state.bullets = vec![still_bullet(10.0, 10.0, 0)];
        state.score = 999;
        state.multiplier = 7;
        state.bombs = 3;
        state.lives = 1;
        state.bullet_powerup_start_frame = Some(4);
        state.freeze_powerup_start_frame = Some(9);
        state.queued_sounds = vec![SoundEvent::AsteroidBreak];

        let next = tick(&state, &Action::Reset { mode: Some(Mode::Easy) }, &settings).unwrap();
        assert!(next.asteroids.is_empty());
        assert!(next.bullets.is_empty());
        assert!(next.debris.is_empty());
        assert!(next.powerups.is_empty());
        assert_eq!(next.score, 0);
        assert_eq!(next.multiplier, 1);
        assert_eq!(next.bombs, 0);
        assert_eq!(next.lives, 5);
        assert_eq!(next.mode, Mode::Easy);
        assert_eq!(next.bullet_powerup_start_frame, None);
        assert_eq!(next.freeze_powerup_start_frame, None);

        let next = tick(&state, &Action::SetMode { mode: Some(Mode::Hard) }, &settings).unwrap();
        assert_eq!(next.lives, 1);
        assert_eq!(next.score, 0);
    }

    #[test]
    fn test_reset_unknown_mode_is_error() {
        let mut settings = Settings::default();
        let state = world(&settings);
        settings.modes.remove(&Mode::Hard);

        let result = tick(&state, &Action::Reset { mode: Some(Mode::Hard) }, &settings);
        assert_eq!(result, Err(SimError::UnknownMode(Mode::Hard)));
    }

    #[test]
    fn test_set_mode_and_opening_field_unknown_mode_is_error() {
        let mut settings = Settings::default();
        let state = world(&settings);
        settings.modes.remove(&Mode::Easy);

        let result = tick(&state, &Action::SetMode { mode: Some(Mode::Easy) }, &settings);
        assert_eq!(result, Err(SimError::UnknownMode(Mode::Easy)));

        let action = Action::AddInitialAsteroids {
            mode: Some(Mode::Easy),
        };
        assert_eq!(
            tick(&state, &action, &settings),
            Err(SimError::UnknownMode(Mode::Easy))
        );
    }

    #[test]
    fn test_fast_asteroid_wraps_into_field() {
        let settings = Settings::default();
        let mut state = world(&settings);
        let radius = 20.0;
        state.asteroids = vec![Asteroid::new(
            Vec2::new(10.0, 10.0),
            Vec2::new(1_200.0, 0.0),
            radius,
        )];

        let next = tick(&state, &Action::advance(1, calm()), &settings).unwrap();
        assert_eq!(next.asteroids.len(), 1);
        let x = next.asteroids[0].body.position.x;
        assert!(x >= -radius && x < settings.world.width + radius);
        assert!((x - 130.0).abs() < 1e-3);
    }

    #[test]
    fn test_shoot_single_and_fan() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.frame = 10;

        let shot = tick(&state, &Action::Shoot, &settings).unwrap();
        assert_eq!(shot.bullets.len(), 1);
        let bullet = shot.bullets[0];
        assert_eq!(bullet.body.position, state.ship.nose());
        assert_eq!(bullet.spawn_frame, 10);
        // Heading 90 fires up the screen
        assert!(bullet.body.velocity.y < 0.0);
        assert!((bullet.body.velocity.length() - settings.bullets.speed).abs() < 1e-4);

        state.bullet_powerup_start_frame = Some(5);
        let fan = tick(&state, &Action::Shoot, &settings).unwrap();
        assert_eq!(fan.bullets.len(), settings.bullets.powerup_fan_degrees.len());
    }

    #[test]
    fn test_bullets_expire() {
        let settings = Settings::default();
        let mut state = world(&settings);
        state.bullets = vec![still_bullet(10.0, 10.0, 0)];
        state.frame = settings.bullets.lifetime_frames - 1;

        let next = tick(&state, &Action::advance(state.frame, calm()), &settings).unwrap();
        assert_eq!(next.bullets.len(), 1);

        let expiry = Action::advance(settings.bullets.lifetime_frames, calm());
        let next = tick(&next, &expiry, &settings).unwrap();
        assert!(next.bullets.is_empty());
    }

    #[test]
    fn test_freeze_powerup_holds_asteroids() {
        let settings = Settings::default();
        let mut state = world(&settings);
        let drifting = Asteroid::new(Vec2::new(50.0, 50.0), Vec2::new(2.0, 0.0), 30.0);
        state.asteroids = vec![drifting];
        state.powerups = vec![Powerup {
            body: Body::new(Vec2::new(250.0, 250.0), Vec2::ZERO, 10.0),
            kind: PowerupKind::Freeze,
            spawn_frame: 0,
        }];

        let frozen = tick(&state, &Action::advance(1, calm()), &settings).unwrap();
        assert_eq!(frozen.freeze_powerup_start_frame, Some(1));
        // Pickup happens after movement, so the first frame still moves
        assert_eq!(frozen.asteroids[0].body.position, Vec2::new(52.0, 50.0));

        let held = tick(&frozen, &Action::advance(2, calm()), &settings).unwrap();
        assert_eq!(held.asteroids[0].body.position, Vec2::new(52.0, 50.0));

        let thawed_frame = 1 + settings.powerups.freeze_duration_frames;
        let thawed = tick(&held, &Action::advance(thawed_frame, calm()), &settings).unwrap();
        assert_eq!(thawed.asteroids[0].body.position, Vec2::new(54.0, 50.0));
    }

    #[test]
    fn test_multiplier_grows_on_interval() {
        let settings = Settings::default();
        let state = world(&settings);
        let interval = settings.scoring.multiplier_interval_frames;

        let next = tick(&state, &Action::advance(interval, calm()), &settings).unwrap();
        assert_eq!(next.multiplier, 2);
        let next = tick(&next, &Action::advance(interval + 1, calm()), &settings).unwrap();
        assert_eq!(next.multiplier, 2);
    }

    #[test]
    fn test_top_up_runs_after_collisions() {
        let settings = Settings::default();
        let state = world(&settings);
        let difficulty = DifficultyState {
            powerup_chance: 0.0,
            ..Default::default()
        };

        let next = tick(&state, &Action::advance(1, difficulty), &settings).unwrap();
        assert_eq!(next.asteroids.len(), difficulty.max_spawn_per_frame as usize);
        for asteroid in &next.asteroids {
            assert!(
                asteroid.body.position.distance(next.ship.body.position)
                    >= settings.asteroids.min_distance_from_ship
            );
        }
    }

    #[test]
    fn test_ship_controls() {
        let settings = Settings::default();
        let state = world(&settings);

        let thrusting = tick(&state, &Action::ThrustStart, &settings).unwrap();
        assert!(thrusting.ship.is_thrusting);
        assert!(thrusting.ship.body.velocity.y < 0.0);

        let stopped = tick(&thrusting, &Action::ThrustStop, &settings).unwrap();
        assert!(!stopped.ship.is_thrusting);

        let turned = tick(&state, &Action::rotate(TurnDirection::Left), &settings).unwrap();
        assert!((turned.ship.heading_degrees - (90.0 + settings.ship.turn_speed)).abs() < 1e-4);

        assert_eq!(tick(&state, &Action::TogglePause, &settings).unwrap(), state);
    }

    #[test]
    fn test_add_asteroids() {
        let settings = Settings::default();
        let state = world(&settings);

        let extra = still_asteroid(10.0, 10.0, 30.0);
        let next = tick(&state, &Action::AddAsteroid { asteroid: Some(extra) }, &settings).unwrap();
        assert_eq!(next.asteroids, vec![extra]);

        let opened = tick(
            &state,
            &Action::AddInitialAsteroids {
                mode: Some(Mode::Normal),
            },
            &settings,
        )
        .unwrap();
        let area: f32 = opened.asteroids.iter().map(|a| a.body.area()).sum();
        assert!(area >= settings.asteroids.starting_area_target);
        assert_ne!(opened.rng, state.rng);
    }

    #[test]
    fn test_actions_from_json() {
        let settings = Settings::default();
        let state = world(&settings);

        let json = r#"{ "type": "Move", "frame_count": 3 }"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            Action::Move {
                frame_count: Some(3),
                difficulty: None,
            }
        );
        assert_eq!(tick(&state, &action, &settings).unwrap(), state);

        let action: Action =
            serde_json::from_str(r#"{ "type": "Rotate", "direction": "Right" }"#).unwrap();
        assert_eq!(action, Action::rotate(TurnDirection::Right));

        let action: Action = serde_json::from_str(r#"{ "type": "TriggerBomb" }"#).unwrap();
        assert_eq!(action, Action::TriggerBomb);
    }

    #[test]
    fn test_determinism() {
        // Two runs from the same state and actions produce identical worlds
        let settings = Settings::default();
        let start = world(&settings);
        let difficulty = DifficultyState {
            max_spawn_per_frame: 2,
            powerup_chance: 0.2,
            ..Default::default()
        };

        let mut actions = vec![Action::AddInitialAsteroids {
            mode: Some(Mode::Normal),
        }];
        for frame in 1..=120u64 {
            if frame % 7 == 0 {
                actions.push(Action::Shoot);
            }
            if frame % 5 == 0 {
                actions.push(Action::rotate(TurnDirection::Left));
            }
            if frame % 11 == 0 {
                actions.push(Action::ThrustStart);
            }
            actions.push(Action::advance(frame, difficulty));
        }

        let run = |mut state: WorldState| {
            for action in &actions {
                state = tick(&state, action, &settings).unwrap();
            }
            state
        };

        let a = run(start.clone());
        let b = run(start);
        assert_eq!(a, b);
        assert_eq!(a.frame, 120);
    }
}
