//! Randomized spawning: asteroids, debris bursts and powerups
//!
//! All randomness is drawn from the generator passed in, so a seeded RNG
//! reproduces the same field every time.

use glam::Vec2;
use rand::Rng;

use super::geometry::direction_from_angle;
use super::state::{Asteroid, Body, Debris, DifficultyState, Powerup, PowerupKind, Ship};
use crate::settings::{DebrisSettings, Settings};

/// Most asteroids one opening field will place
pub const MAX_OPENING_ASTEROIDS: u32 = 512;

/// Where new asteroids come from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnOrigin {
    /// Random position at least `min_distance_from_ship` from `avoid`,
    /// random radius in the configured start range
    Fresh { avoid: Vec2 },
    /// Children of a struck asteroid: parent position, half the parent's area
    Split { position: Vec2, parent_radius: f32 },
}

/// Random heading, speed within the configured range
fn random_velocity(rng: &mut impl Rng, settings: &Settings, speed_scale: f32) -> Vec2 {
    let heading = rng.random_range(0.0..360.0);
    let speed = rng.random_range(settings.asteroids.min_speed..=settings.asteroids.max_speed);
    direction_from_angle(heading) * speed * speed_scale
}

/// Place a fresh asteroid away from the ship.
///
/// Retries up to `spawn_retry_limit` times; when every attempt lands too close
/// the last candidate is used anyway.
fn fresh_position(rng: &mut impl Rng, avoid: Vec2, settings: &Settings) -> Vec2 {
    let world = &settings.world;
    let min_distance = settings.asteroids.min_distance_from_ship;
    let attempts = settings.asteroids.spawn_retry_limit.max(1);

    let mut candidate = Vec2::ZERO;
    for _ in 0..attempts {
        candidate = Vec2::new(
            rng.random_range(0.0..world.width),
            rng.random_range(0.0..world.height),
        );
        if candidate.distance(avoid) >= min_distance {
            return candidate;
        }
    }

    log::debug!(
        "No asteroid placement {min_distance} away from ship after {attempts} attempts, \
         using {candidate}"
    );
    candidate
}

/// Generate `count` asteroids from `origin`
pub fn random_asteroids(
    count: usize,
    origin: SpawnOrigin,
    speed_scale: f32,
    settings: &Settings,
    rng: &mut impl Rng,
) -> Vec<Asteroid> {
    (0..count)
        .map(|_| {
            let (position, radius) = match origin {
                SpawnOrigin::Fresh { avoid } => {
                    let position = fresh_position(rng, avoid, settings);
                    let radius = rng.random_range(
                        settings.asteroids.start_radius_min..=settings.asteroids.start_radius_max,
                    );
                    (position, radius)
                }
                SpawnOrigin::Split {
                    position,
                    parent_radius,
                } => (position, parent_radius / std::f32::consts::SQRT_2),
            };
            let velocity = random_velocity(rng, settings, speed_scale);
            Asteroid::new(position, velocity, radius)
        })
        .collect()
}

/// Spawn fresh asteroids one at a time until `current_area` reaches `target`
/// or `max_count` have been made
fn top_up(
    current_area: f32,
    target: f32,
    max_count: u32,
    ship: &Ship,
    speed_scale: f32,
    settings: &Settings,
    rng: &mut impl Rng,
) -> Vec<Asteroid> {
    let mut area = current_area;
    let mut spawned = Vec::new();
    while area < target && (spawned.len() as u32) < max_count {
        let origin = SpawnOrigin::Fresh {
            avoid: ship.body.position,
        };
        for asteroid in random_asteroids(1, origin, speed_scale, settings, rng) {
            area += asteroid.body.area();
            spawned.push(asteroid);
        }
    }
    spawned
}

/// Replenishment for the current field.
///
/// Empty when the field's total area already meets the difficulty-scaled
/// target; otherwise up to `max_spawn_per_frame` fresh asteroids.
pub fn additional_asteroids_for_current_asteroids(
    current: &[Asteroid],
    ship: &Ship,
    difficulty: &DifficultyState,
    settings: &Settings,
    rng: &mut impl Rng,
) -> Vec<Asteroid> {
    let area: f32 = current.iter().map(|a| a.body.area()).sum();
    let target = settings.asteroids.starting_area_target * difficulty.area_scale;
    if area >= target {
        return Vec::new();
    }
    top_up(
        area,
        target,
        difficulty.max_spawn_per_frame,
        ship,
        difficulty.speed_scale,
        settings,
        rng,
    )
}

/// Opening field for a mode: fill to the scaled starting area, placing at
/// most `MAX_OPENING_ASTEROIDS`
pub fn initial_asteroids(
    current: &[Asteroid],
    area_scale: f32,
    ship: &Ship,
    settings: &Settings,
    rng: &mut impl Rng,
) -> Vec<Asteroid> {
    let area: f32 = current.iter().map(|a| a.body.area()).sum();
    let target = settings.asteroids.starting_area_target * area_scale;
    // Every spawn adds at least the minimum start area, so this bounds the loop
    let min_area = std::f32::consts::PI * settings.asteroids.start_radius_min.powi(2);
    let needed = ((target - area).max(0.0) / min_area).ceil() as u32;
    let max_count = needed.saturating_add(1).min(MAX_OPENING_ASTEROIDS);
    top_up(area, target, max_count, ship, 1.0, settings, rng)
}

/// One burst of debris per destroyed asteroid, fanned evenly around 360°
pub fn debris_for_destroyed_asteroids(
    destroyed: &[Asteroid],
    frame: u64,
    tuning: &DebrisSettings,
) -> Vec<Debris> {
    let step = 360.0 / tuning.count.max(1) as f32;
    destroyed
        .iter()
        .flat_map(|asteroid| {
            let center = asteroid.body.position;
            (0..tuning.count).map(move |i| {
                let dir = direction_from_angle(i as f32 * step);
                Debris {
                    body: Body::new(
                        center + dir * tuning.distance,
                        dir * tuning.speed,
                        tuning.radius,
                    ),
                    spawn_frame: frame,
                }
            })
        })
        .collect()
}

/// Roll for a powerup this frame
pub fn maybe_spawn_powerup(
    difficulty: &DifficultyState,
    frame: u64,
    settings: &Settings,
    rng: &mut impl Rng,
) -> Option<Powerup> {
    if !rng.random_bool(difficulty.powerup_chance.clamp(0.0, 1.0)) {
        return None;
    }

    let kind = PowerupKind::ALL[rng.random_range(0..PowerupKind::ALL.len())];
    let position = Vec2::new(
        rng.random_range(0.0..settings.world.width),
        rng.random_range(0.0..settings.world.height),
    );
    let velocity = direction_from_angle(rng.random_range(0.0..360.0)) * settings.powerups.speed;
    log::debug!("Spawned {kind:?} powerup at {position}");

    Some(Powerup {
        body: Body::new(position, velocity, settings.powerups.radius),
        kind,
        spawn_frame: frame,
    })
}
