//! Collision resolution for one frame
//!
//! Given the already-moved ship, asteroids, bullets and powerups, work out
//! which bullets hit which asteroids, whether the ship was struck, which
//! powerups it picked up, and what that is worth. Nothing random happens here;
//! splitting struck asteroids into children is a separate step so the resolver
//! stays a deterministic function of its inputs.

use std::f32::consts::SQRT_2;

use rand::Rng;

use super::geometry::overlaps;
use super::spawner::{SpawnOrigin, random_asteroids};
use super::state::{Asteroid, Bullet, Powerup, PowerupKind, Ship, SoundEvent};
use crate::settings::Settings;

/// Inputs to [`handle_collisions`]
#[derive(Debug, Clone, Copy)]
pub struct CollisionInput<'a> {
    pub ship: &'a Ship,
    pub asteroids: &'a [Asteroid],
    pub bullets: &'a [Bullet],
    pub powerups: &'a [Powerup],
    /// Asteroids whose children would fall below this are destroyed, not split
    pub minimum_radius: f32,
}

/// Everything one frame of collisions produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Bullets that hit nothing (or only asteroids already struck this frame)
    pub surviving_bullets: Vec<Bullet>,
    /// Asteroids struck by a bullet, in input order
    pub collided_asteroids: Vec<Asteroid>,
    /// Asteroids that overlapped the ship and were removed
    pub ship_struck_asteroids: Vec<Asteroid>,
    /// Asteroids untouched by bullets and ship
    pub surviving_asteroids: Vec<Asteroid>,
    pub surviving_powerups: Vec<Powerup>,
    pub points_awarded: u64,
    /// At most one life per frame
    pub ship_hit: bool,
    pub begin_bullet_powerup: bool,
    pub begin_freeze_powerup: bool,
    pub bombs_collected: u32,
    /// Breaks first, then destructions, in the order produced
    pub sounds: Vec<SoundEvent>,
}

impl CollisionOutcome {
    /// Collided asteroids that are too small to split
    pub fn destroyed_by_bullets(&self, minimum_radius: f32) -> impl Iterator<Item = &Asteroid> {
        self.collided_asteroids
            .iter()
            .filter(move |a| should_be_destroyed(a, minimum_radius))
    }

    /// Collided asteroids that break into two
    pub fn broken_by_bullets(&self, minimum_radius: f32) -> impl Iterator<Item = &Asteroid> {
        self.collided_asteroids
            .iter()
            .filter(move |a| !should_be_destroyed(a, minimum_radius))
    }

    /// Change to apply to the lives counter
    pub fn lives_diff(&self) -> i32 {
        if self.ship_hit { -1 } else { 0 }
    }
}

/// An asteroid is destroyed rather than split when its children would be
/// smaller than the minimum radius
#[inline]
pub fn should_be_destroyed(asteroid: &Asteroid, minimum_radius: f32) -> bool {
    asteroid.body.radius / SQRT_2 < minimum_radius
}

/// Scoring closure for the current multiplier: destroy and break award
/// different base points, both scaled by the multiplier
pub fn points_for_collision(multiplier: u32, settings: &Settings) -> impl Fn(&Asteroid) -> u64 {
    let scoring = settings.scoring;
    let minimum_radius = settings.asteroids.minimum_radius;
    move |asteroid| {
        let base = if should_be_destroyed(asteroid, minimum_radius) {
            scoring.points_for_destroy
        } else {
            scoring.points_for_break
        };
        u64::from(multiplier) * base
    }
}

/// Resolve every pairwise interaction for one frame.
///
/// Bullets are processed in input order and each checks asteroids in input
/// order. A bullet strikes the first overlapping asteroid not already struck
/// this frame and is consumed; an asteroid takes at most one bullet per frame,
/// so later bullets over the same asteroid pass through.
pub fn handle_collisions(
    input: CollisionInput<'_>,
    points_for_collision: impl Fn(&Asteroid) -> u64,
) -> CollisionOutcome {
    let CollisionInput {
        ship,
        asteroids,
        bullets,
        powerups,
        minimum_radius,
    } = input;

    // Bullet vs asteroid
    let mut struck = vec![false; asteroids.len()];
    let mut surviving_bullets = Vec::with_capacity(bullets.len());
    for bullet in bullets {
        let target = asteroids
            .iter()
            .enumerate()
            .find(|(i, asteroid)| !struck[*i] && overlaps(&bullet.body, &asteroid.body))
            .map(|(i, _)| i);
        match target {
            Some(i) => struck[i] = true,
            None => surviving_bullets.push(*bullet),
        }
    }

    let mut collided_asteroids = Vec::new();
    let mut not_collided = Vec::with_capacity(asteroids.len());
    for (asteroid, hit) in asteroids.iter().zip(&struck) {
        if *hit {
            collided_asteroids.push(*asteroid);
        } else {
            not_collided.push(*asteroid);
        }
    }

    let points_awarded = collided_asteroids.iter().map(&points_for_collision).sum();

    // Ship vs remaining asteroids
    let (ship_struck_asteroids, surviving_asteroids): (Vec<Asteroid>, Vec<Asteroid>) = not_collided
        .into_iter()
        .partition(|asteroid| overlaps(&ship.body, &asteroid.body));
    let ship_hit = !ship_struck_asteroids.is_empty();

    // Ship vs powerups
    let mut begin_bullet_powerup = false;
    let mut begin_freeze_powerup = false;
    let mut bombs_collected = 0;
    let mut surviving_powerups = Vec::with_capacity(powerups.len());
    for powerup in powerups {
        if !overlaps(&ship.body, &powerup.body) {
            surviving_powerups.push(*powerup);
            continue;
        }
        match powerup.kind {
            PowerupKind::Bullet => begin_bullet_powerup = true,
            PowerupKind::Freeze => begin_freeze_powerup = true,
            PowerupKind::Bomb => bombs_collected += 1,
        }
    }

    let breaks = collided_asteroids
        .iter()
        .filter(|a| !should_be_destroyed(a, minimum_radius))
        .count();
    let destroys = collided_asteroids.len() - breaks + ship_struck_asteroids.len();
    let mut sounds = Vec::with_capacity(breaks + destroys);
    sounds.extend(std::iter::repeat_n(SoundEvent::AsteroidBreak, breaks));
    sounds.extend(std::iter::repeat_n(SoundEvent::AsteroidDestroy, destroys));

    CollisionOutcome {
        surviving_bullets,
        collided_asteroids,
        ship_struck_asteroids,
        surviving_asteroids,
        surviving_powerups,
        points_awarded,
        ship_hit,
        begin_bullet_powerup,
        begin_freeze_powerup,
        bombs_collected,
        sounds,
    }
}

/// Two children per collided asteroid large enough to split, each at the
/// parent's position with half its area and an independent random heading
pub fn sub_asteroids_for_collided_asteroids(
    collided: &[Asteroid],
    speed_scale: f32,
    settings: &Settings,
    rng: &mut impl Rng,
) -> Vec<Asteroid> {
    collided
        .iter()
        .filter(|a| !should_be_destroyed(a, settings.asteroids.minimum_radius))
        .flat_map(|parent| {
            let origin = SpawnOrigin::Split {
                position: parent.body.position,
                parent_radius: parent.body.radius,
            };
            random_asteroids(2, origin, speed_scale, settings, rng)
        })
        .collect()
}
