//! World state and entity records
//!
//! Every record here is a plain value. A frame never edits an entity in place;
//! it builds the next `WorldState` from the previous one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::{Settings, ShipSettings};

/// Shape shared by every moving entity: a circle with a velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Area of the collision circle
    #[inline]
    pub fn area(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// Heading in degrees, [0, 360), counter-clockwise on screen
    pub heading_degrees: f32,
    pub is_thrusting: bool,
}

impl Ship {
    /// Ship at rest in the centre of the world, pointing up
    pub fn spawn(settings: &Settings) -> Self {
        Self::at(
            Vec2::new(settings.world.width / 2.0, settings.world.height / 2.0),
            &settings.ship,
        )
    }

    pub fn at(position: Vec2, ship: &ShipSettings) -> Self {
        Self {
            body: Body::new(position, Vec2::ZERO, ship.radius),
            heading_degrees: 90.0,
            is_thrusting: false,
        }
    }

    /// Point on the ship's rim at `offset_degrees` from its heading.
    ///
    /// Attachments (the nose bullets leave from, the thruster flame) are
    /// computed from the ship every time they are needed rather than stored.
    pub fn attachment_point(&self, offset_degrees: f32) -> Vec2 {
        let dir = super::geometry::direction_from_angle(self.heading_degrees + offset_degrees);
        self.body.position + dir * self.body.radius
    }

    /// Where bullets leave the ship
    #[inline]
    pub fn nose(&self) -> Vec2 {
        self.attachment_point(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
}

impl Asteroid {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            body: Body::new(position, velocity, radius),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub spawn_frame: u64,
}

/// Decorative fragment left by a destroyed asteroid; never collides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Debris {
    pub body: Body,
    pub spawn_frame: u64,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Fan of bullets per shot for a limited window
    Bullet,
    /// Asteroids stop moving for a limited window
    Freeze,
    /// Adds one bomb charge
    Bomb,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [PowerupKind::Bullet, PowerupKind::Freeze, PowerupKind::Bomb];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub body: Body,
    pub kind: PowerupKind,
    pub spawn_frame: u64,
}

/// Sound requests for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEvent {
    /// An asteroid split in two
    AsteroidBreak,
    /// An asteroid was removed without splitting
    AsteroidDestroy,
}

/// Game mode; selects the starting table entry in settings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Mode {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Difficulty knobs supplied by the host on every `Move`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyState {
    /// Scales `asteroids.starting_area_target` for the per-frame top-up
    pub area_scale: f32,
    /// Upper bound on replenishment asteroids spawned in one frame
    pub max_spawn_per_frame: u32,
    /// Scales fresh and split asteroid speeds
    pub speed_scale: f32,
    /// Per-frame probability that a powerup appears
    pub powerup_chance: f64,
}

impl Default for DifficultyState {
    fn default() -> Self {
        Self {
            area_scale: 1.0,
            max_spawn_per_frame: 1,
            speed_scale: 1.0,
            powerup_chance: 0.002,
        }
    }
}

/// RNG state wrapper for serialization
///
/// The generator is rebuilt from `(seed, stream)` whenever a transition needs
/// randomness, and the transition hands back the next stream. Replaying the
/// same actions from the same state therefore reproduces every draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// State for the next transition that draws random numbers
    pub fn advance(&self) -> Self {
        Self {
            seed: self.seed,
            stream: self.stream.wrapping_add(1),
        }
    }
}

/// Complete per-frame world snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub debris: Vec<Debris>,
    pub powerups: Vec<Powerup>,
    pub score: u64,
    pub lives: u32,
    pub multiplier: u32,
    pub bombs: u32,
    pub bullet_powerup_start_frame: Option<u64>,
    pub freeze_powerup_start_frame: Option<u64>,
    /// Appended by the core, drained by the audio collaborator
    pub queued_sounds: Vec<SoundEvent>,
    pub mode: Mode,
    /// Frame count of the last applied `Move`
    pub frame: u64,
    pub rng: RngState,
}

impl WorldState {
    /// Fresh game in `mode`. Fails if settings have no table entry for it.
    pub fn new(mode: Mode, seed: u64, settings: &Settings) -> Result<Self, crate::SimError> {
        let lives = settings.mode(mode)?.starting_lives;
        Ok(Self {
            ship: Ship::spawn(settings),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            debris: Vec::new(),
            powerups: Vec::new(),
            score: 0,
            lives,
            multiplier: 1,
            bombs: 0,
            bullet_powerup_start_frame: None,
            freeze_powerup_start_frame: None,
            queued_sounds: Vec::new(),
            mode,
            frame: 0,
            rng: RngState::new(seed),
        })
    }

    /// Take the queued sound requests, leaving the queue empty
    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.queued_sounds)
    }

    /// Whether the bullet powerup window covers `frame`
    pub fn bullet_powerup_active(&self, frame: u64, settings: &Settings) -> bool {
        window_active(
            self.bullet_powerup_start_frame,
            frame,
            settings.powerups.bullet_duration_frames,
        )
    }

    /// Whether the freeze powerup window covers `frame`
    pub fn freeze_powerup_active(&self, frame: u64, settings: &Settings) -> bool {
        window_active(
            self.freeze_powerup_start_frame,
            frame,
            settings.powerups.freeze_duration_frames,
        )
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }
}

fn window_active(start: Option<u64>, frame: u64, duration: u64) -> bool {
    start.is_some_and(|start| frame >= start && frame - start < duration)
}
