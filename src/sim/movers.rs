//! Per-kind movement rules
//!
//! Asteroids, bullets, debris and powerups all drift in a straight line. The
//! ship adds drag, thrust and rotation on top of that. Each function takes a
//! record and returns the moved copy.

use glam::Vec2;

use super::geometry::{direction_from_angle, wrap};
use super::state::{Asteroid, Body, Bullet, Debris, Powerup, Ship};
use crate::normalize_degrees;
use crate::settings::{Settings, ShipSettings, WorldSettings};

/// Which way a rotate event turns the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TurnDirection {
    /// Clockwise on screen (heading decreases)
    Right,
    /// Counter-clockwise on screen (heading increases)
    Left,
}

impl TurnDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            TurnDirection::Right => -1.0,
            TurnDirection::Left => 1.0,
        }
    }
}

/// Advance by one frame of velocity, then wrap
#[inline]
pub fn move_body(body: Body, world: &WorldSettings) -> Body {
    Body {
        position: wrap(body.position + body.velocity, body.radius, world),
        ..body
    }
}

pub fn move_asteroid(asteroid: Asteroid, world: &WorldSettings) -> Asteroid {
    Asteroid {
        body: move_body(asteroid.body, world),
    }
}

pub fn move_bullet(bullet: Bullet, world: &WorldSettings) -> Bullet {
    Bullet {
        body: move_body(bullet.body, world),
        ..bullet
    }
}

pub fn move_debris(debris: Debris, world: &WorldSettings) -> Debris {
    Debris {
        body: move_body(debris.body, world),
        ..debris
    }
}

pub fn move_powerup(powerup: Powerup, world: &WorldSettings) -> Powerup {
    Powerup {
        body: move_body(powerup.body, world),
        ..powerup
    }
}

/// Reduce each axis toward zero by `drag` without crossing it
#[inline]
fn air_resisted(value: f32, drag: f32) -> f32 {
    if value > drag {
        value - drag
    } else if value < -drag {
        value + drag
    } else {
        0.0
    }
}

/// Move tick: drift on the current velocity, wrap, then apply drag
pub fn move_ship(ship: Ship, settings: &Settings) -> Ship {
    let body = Body {
        radius: settings.ship.radius,
        ..ship.body
    };
    let moved = move_body(body, &settings.world);
    let drag = settings.ship.air_resistance;
    Ship {
        body: Body {
            velocity: Vec2::new(
                air_resisted(moved.velocity.x, drag),
                air_resisted(moved.velocity.y, drag),
            ),
            ..moved
        },
        ..ship
    }
}

/// Thrust event: accelerate along the heading, capped at max speed
pub fn thrust_ship(ship: Ship, tuning: &ShipSettings) -> Ship {
    let impulse = direction_from_angle(ship.heading_degrees) * tuning.acceleration;
    let velocity = ship.body.velocity + impulse;
    Ship {
        body: Body {
            velocity: velocity.clamp_length_max(tuning.max_speed),
            ..ship.body
        },
        is_thrusting: true,
        ..ship
    }
}

pub fn stop_thrusting_ship(ship: Ship) -> Ship {
    Ship {
        is_thrusting: false,
        ..ship
    }
}

/// Rotate event: turn by one step of `turn_speed`
pub fn rotate_ship(ship: Ship, direction: TurnDirection, tuning: &ShipSettings) -> Ship {
    Ship {
        heading_degrees: normalize_degrees(
            ship.heading_degrees + direction.sign() * tuning.turn_speed,
        ),
        ..ship
    }
}
