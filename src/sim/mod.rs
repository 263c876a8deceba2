//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `Move` per frame, no wall-clock time
//! - Seeded RNG only, carried in the world state
//! - Stable iteration order (input order of every entity list)
//! - No rendering, input or audio dependencies

pub mod collision;
pub mod geometry;
pub mod movers;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionInput, CollisionOutcome, handle_collisions, points_for_collision};
pub use geometry::{direction_from_angle, overlaps, wrap};
pub use movers::TurnDirection;
pub use spawner::{SpawnOrigin, additional_asteroids_for_current_asteroids, random_asteroids};
pub use state::{
    Asteroid, Body, Bullet, Debris, DifficultyState, Mode, Powerup, PowerupKind, RngState, Ship,
    SoundEvent, WorldState,
};
pub use tick::{Action, tick};
