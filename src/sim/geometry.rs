//! Plane geometry for the wrapping play field
//!
//! Screen space has y pointing down, so headings are measured with y inverted:
//! 0° points right, 90° points up the screen.

use glam::Vec2;

use super::state::Body;
use crate::settings::WorldSettings;
use crate::to_radians;

/// Unit vector for a heading in degrees (counter-clockwise on screen)
#[inline]
pub fn direction_from_angle(degrees: f32) -> Vec2 {
    let rad = to_radians(degrees);
    Vec2::new(rad.cos(), -rad.sin())
}

/// Wrap one coordinate into [-radius, dimension + radius)
#[inline]
fn wrap_axis(value: f32, radius: f32, dimension: f32) -> f32 {
    if value >= -radius && value < dimension + radius {
        return value;
    }
    // Any number of spans out, e.g. a body faster than the field is wide
    let wrapped = (value + radius).rem_euclid(dimension + 2.0 * radius) - radius;
    // rem_euclid can round up to the span itself
    if wrapped >= dimension + radius {
        -radius
    } else {
        wrapped
    }
}

/// Toroidal wrap: a body fully past one edge reappears just outside the
/// opposite edge. Each axis wraps independently.
pub fn wrap(position: Vec2, radius: f32, world: &WorldSettings) -> Vec2 {
    Vec2::new(
        wrap_axis(position.x, radius, world.width),
        wrap_axis(position.y, radius, world.height),
    )
}

/// Whether two bodies' collision circles intersect.
///
/// A body never overlaps itself; identity is by reference, so two distinct
/// bodies with equal fields still collide.
#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    if std::ptr::eq(a, b) {
        return false;
    }
    a.position.distance(b.position) < a.radius + b.radius
}
