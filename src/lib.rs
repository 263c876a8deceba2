//! Asteroids simulation core
//!
//! Core modules:
//! - `sim`: Deterministic frame-stepped simulation (movement, collisions, spawning)
//! - `settings`: Injected tuning values consumed by every sim function
//! - `error`: Configuration and mode-table faults
//!
//! Rendering, input capture and audio playback live outside this crate. The
//! host dispatches [`sim::Action`]s into [`sim::tick`] and draws the returned
//! [`sim::WorldState`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

/// Convert degrees to radians
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Normalize a heading to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 { 0.0 } else { d }
}
