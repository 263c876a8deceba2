//! Simulation tuning
//!
//! Every value the simulation needs is carried here and passed explicitly into
//! the sim functions. Hosts typically ship a JSON file and load it with
//! [`Settings::load`]; any field left out falls back to the defaults below.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::Mode;

/// Play field size; bodies wrap at these edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
        }
    }
}

/// Ship handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSettings {
    pub radius: f32,
    /// Velocity added per thrust event
    pub acceleration: f32,
    /// Speed cap applied after thrust
    pub max_speed: f32,
    /// Degrees turned per rotate event
    pub turn_speed: f32,
    /// Per-axis drag subtracted each move tick
    pub air_resistance: f32,
}

impl Default for ShipSettings {
    fn default() -> Self {
        Self {
            radius: 15.0,
            acceleration: 0.5,
            max_speed: 8.0,
            turn_speed: 6.0,
            air_resistance: 0.02,
        }
    }
}

/// Asteroid sizes, speeds and spawn rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidSettings {
    /// Asteroids whose split children would fall below this are destroyed instead
    pub minimum_radius: f32,
    pub start_radius_min: f32,
    pub start_radius_max: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Fresh spawns keep at least this far from the ship centre
    pub min_distance_from_ship: f32,
    /// Placement attempts before the last candidate is accepted
    pub spawn_retry_limit: u32,
    /// Total asteroid area (sum of πr²) the field is topped up to
    pub starting_area_target: f32,
}

impl Default for AsteroidSettings {
    fn default() -> Self {
        Self {
            minimum_radius: 15.0,
            start_radius_min: 25.0,
            start_radius_max: 50.0,
            min_speed: 0.5,
            max_speed: 2.0,
            min_distance_from_ship: 100.0,
            spawn_retry_limit: 32,
            starting_area_target: 20_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletSettings {
    pub radius: f32,
    pub speed: f32,
    pub lifetime_frames: u64,
    /// Heading offsets (degrees) fired per shot while the bullet powerup is active
    pub powerup_fan_degrees: Vec<f32>,
}

impl Default for BulletSettings {
    fn default() -> Self {
        Self {
            radius: 2.0,
            speed: 10.0,
            lifetime_frames: 50,
            powerup_fan_degrees: vec![-15.0, 0.0, 15.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebrisSettings {
    /// Pieces per destroyed asteroid
    pub count: u32,
    /// Offset from the asteroid centre at which pieces appear
    pub distance: f32,
    pub speed: f32,
    pub radius: f32,
    pub lifetime_frames: u64,
}

impl Default for DebrisSettings {
    fn default() -> Self {
        Self {
            count: 8,
            distance: 5.0,
            speed: 1.5,
            radius: 1.5,
            lifetime_frames: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupSettings {
    pub radius: f32,
    pub speed: f32,
    pub lifetime_frames: u64,
    pub bullet_duration_frames: u64,
    pub freeze_duration_frames: u64,
}

impl Default for PowerupSettings {
    fn default() -> Self {
        Self {
            radius: 10.0,
            speed: 1.0,
            lifetime_frames: 600,
            bullet_duration_frames: 600,
            freeze_duration_frames: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub points_for_break: u64,
    pub points_for_destroy: u64,
    /// Frames survived between multiplier bumps
    pub multiplier_interval_frames: u64,
    pub max_multiplier: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            points_for_break: 10,
            points_for_destroy: 25,
            multiplier_interval_frames: 600,
            max_multiplier: 10,
        }
    }
}

/// Per-mode starting values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeSettings {
    pub starting_lives: u32,
    /// Scales `asteroids.starting_area_target` for the opening field
    pub starting_area_scale: f32,
}

/// All simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldSettings,
    pub ship: ShipSettings,
    pub asteroids: AsteroidSettings,
    pub bullets: BulletSettings,
    pub debris: DebrisSettings,
    pub powerups: PowerupSettings,
    pub scoring: ScoringSettings,
    pub modes: BTreeMap<Mode, ModeSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut modes = BTreeMap::new();
        modes.insert(
            Mode::Easy,
            ModeSettings {
                starting_lives: 5,
                starting_area_scale: 0.75,
            },
        );
        modes.insert(
            Mode::Normal,
            ModeSettings {
                starting_lives: 3,
                starting_area_scale: 1.0,
            },
        );
        modes.insert(
            Mode::Hard,
            ModeSettings {
                starting_lives: 1,
                starting_area_scale: 1.5,
            },
        );

        Self {
            world: WorldSettings::default(),
            ship: ShipSettings::default(),
            asteroids: AsteroidSettings::default(),
            bullets: BulletSettings::default(),
            debris: DebrisSettings::default(),
            powerups: PowerupSettings::default(),
            scoring: ScoringSettings::default(),
            modes,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SimError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidSettings {
            field,
            reason: format!("must be a positive finite number, got {value}"),
        })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), SimError> {
    if min <= max {
        Ok(())
    } else {
        Err(SimError::InvalidSettings {
            field,
            reason: format!("min {min} exceeds max {max}"),
        })
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Look up the per-mode table entry
    pub fn mode(&self, mode: Mode) -> Result<&ModeSettings, SimError> {
        self.modes.get(&mode).ok_or(SimError::UnknownMode(mode))
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), SimError> {
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;

        positive("ship.radius", self.ship.radius)?;
        positive("ship.max_speed", self.ship.max_speed)?;
        if self.ship.air_resistance < 0.0 {
            return Err(SimError::InvalidSettings {
                field: "ship.air_resistance",
                reason: "must not be negative".to_string(),
            });
        }

        positive("asteroids.minimum_radius", self.asteroids.minimum_radius)?;
        positive("asteroids.start_radius_min", self.asteroids.start_radius_min)?;
        ordered(
            "asteroids.start_radius",
            self.asteroids.start_radius_min,
            self.asteroids.start_radius_max,
        )?;
        ordered(
            "asteroids.speed",
            self.asteroids.min_speed,
            self.asteroids.max_speed,
        )?;

        positive("bullets.radius", self.bullets.radius)?;
        positive("debris.radius", self.debris.radius)?;
        positive("powerups.radius", self.powerups.radius)?;

        if self.scoring.multiplier_interval_frames == 0 {
            return Err(SimError::InvalidSettings {
                field: "scoring.multiplier_interval_frames",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.modes.is_empty() {
            return Err(SimError::InvalidSettings {
                field: "modes",
                reason: "at least one mode is required".to_string(),
            });
        }

        Ok(())
    }
}
