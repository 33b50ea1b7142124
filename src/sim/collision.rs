//! Collision tests between circles and the slash cone
//!
//! Everything in the arena is a circle, so overlap is a distance check against
//! the sum of radii.

use glam::Vec2;

use crate::{angle_to, normalize_angle};

/// Two circles overlap when their centres are closer than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Point within `radius` of `center` (inclusive)
#[inline]
pub fn within_radius(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance(point) <= radius
}

/// Check whether a circle lies in a cone
///
/// The cone starts at `origin`, faces `facing` (radians) and spans
/// `half_angle` to either side. A target counts when its centre is within
/// `range + target_radius` and its bearing is within the half angle.
pub fn in_cone(
    origin: Vec2,
    facing: f32,
    half_angle: f32,
    range: f32,
    target: Vec2,
    target_radius: f32,
) -> bool {
    if origin.distance(target) > range + target_radius {
        return false;
    }
    if origin == target {
        return true;
    }
    let bearing = angle_to(origin, target);
    normalize_angle(bearing - facing).abs() <= half_angle
}
