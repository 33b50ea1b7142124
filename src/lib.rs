//! Essence Arena - A single-screen arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game loop)
//! - `game`: Lifecycle wrapper and fixed-timestep frame driver
//! - `view`: Read-only snapshots for renderer/UI collaborators
//! - `settings`: Presentation preferences

pub mod game;
pub mod settings;
pub mod sim;
pub mod view;

pub use game::Game;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the frame driver (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Default play area (resized by the host)
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 18.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_DASH_SPEED: f32 = 12.0;
    pub const PLAYER_START_HEALTH: f32 = 500.0;
    pub const PLAYER_MAX_SOUL: f32 = 100.0;
    /// Soul regenerated every tick
    pub const SOUL_REGEN: f32 = 0.15;

    /// Leveling
    pub const START_XP_TO_LEVEL: u32 = 100;
    pub const XP_GROWTH: f32 = 1.4;
    pub const LEVEL_UP_HEALTH_BONUS: f32 = 150.0;

    /// Slash: cone in front of the pointer
    pub const SLASH_COST: f32 = 20.0;
    pub const SLASH_COOLDOWN: u32 = 50;
    pub const SLASH_RANGE: f32 = 140.0;
    pub const SLASH_HALF_ANGLE: f32 = 0.7; // radians (~40 degrees)
    pub const SLASH_DAMAGE: f32 = 60.0;

    /// Orb burst: radial ring of bullets
    pub const ORB_COST: f32 = 35.0;
    pub const ORB_COOLDOWN: u32 = 110;
    pub const ORB_COUNT: usize = 12;
    pub const ORB_SPEED: f32 = 7.0;

    /// Dash: speed boost + contact immunity
    pub const DASH_COOLDOWN: u32 = 70;
    pub const DASH_DURATION: u32 = 12;

    /// Ultimate: long area pulse
    pub const ULT_COOLDOWN: u32 = 1800;
    pub const ULT_DURATION: u32 = 500;
    pub const ULT_RADIUS: f32 = 320.0;
    pub const ULT_DAMAGE: f32 = 3.0;
    pub const ULT_SLOW_TICKS: u32 = 20;

    /// Primary fire
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_DAMAGE: f32 = 50.0;
    /// A shot leaves every Nth tick while the button is held
    pub const FIRE_INTERVAL_TICKS: u32 = 8;

    /// Enemy status effects
    pub const DOT_DAMAGE: f32 = 0.5;
    pub const DOT_TICKS: u32 = 60;
    pub const DOT_PARTICLE_CHANCE: f64 = 0.05;
    pub const SLOW_FACTOR: f32 = 0.4;

    /// Contact damage per overlapping tick
    pub const CONTACT_DAMAGE: f32 = 1.0;

    /// Spawning
    pub const SPAWN_BASE_INTERVAL: u32 = 90;
    pub const SPAWN_LEVEL_STEP: u32 = 5;
    pub const SPAWN_MIN_INTERVAL: u32 = 20;
    pub const TIER2_SCORE: u64 = 1000;
    pub const TIER3_SCORE: u64 = 3000;
    pub const TIER2_CHANCE: f64 = 0.25;
    pub const TIER3_CHANCE: f64 = 0.10;

    /// Kill rewards (multiplied by tier)
    pub const KILL_SCORE: u64 = 50;
    pub const KILL_XP: u32 = 30;
    pub const KILL_ESSENCE: u32 = 1;

    /// Inventory
    pub const ITEM_DROP_INTERVAL: u32 = 360;
    pub const INVENTORY_CAPACITY: usize = 9;
    pub const SMALL_POTION_HEAL: f32 = 30.0;

    /// Particles
    pub const PARTICLE_SHRINK: f32 = 0.96;
    pub const DEATH_PARTICLES: usize = 16;
    pub const LEVEL_UP_PARTICLES: usize = 30;

    /// Screen shake
    pub const DASH_SHAKE: f32 = 8.0;
    pub const HIT_SHAKE: f32 = 2.0;
    pub const SHAKE_DECAY: f32 = 0.9;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the ray from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector in the direction of `v`, or zero for a zero-length vector
#[inline]
pub fn direction_or_zero(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 0.0 { v / len } else { Vec2::ZERO }
}

/// Unit vector for an angle
#[inline]
pub fn from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        // Away from the ±PI seam so float rounding can't flip the sign
        assert!((normalize_angle(3.0 * PI + 0.5) - (-PI + 0.5)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI - 0.5) - (PI - 0.5)).abs() < 1e-5);
        for a in [3.0 * PI, -3.0 * PI, 7.0, -7.0, 100.0] {
            let n = normalize_angle(a);
            assert!((-PI..PI).contains(&n), "{} -> {}", a, n);
        }
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
        assert!((normalize_angle(2.0 * PI + 0.5) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_direction_or_zero_guards_zero_length() {
        assert_eq!(direction_or_zero(Vec2::ZERO), Vec2::ZERO);
        let d = direction_or_zero(Vec2::new(3.0, 4.0));
        assert!((d.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_to_and_distance() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(1.0, 5.0);
        assert!((angle_to(a, b) - PI / 2.0).abs() < 1e-6);
        assert!((distance(a, b) - 4.0).abs() < 1e-6);
    }
}
