//! Bullets and cosmetic particles
//!
//! Both move in a straight line. Bullets are gameplay hazards removed when they
//! leave the play area; particles only fade and shrink.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A straight-line projectile fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub radius: f32,
    /// Set when off-screen or consumed by a hit
    pub deleted: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            damage: BULLET_DAMAGE,
            radius: BULLET_RADIUS,
            deleted: false,
        }
    }

    /// Move by velocity; mark for removal once the centre leaves [0,w]x[0,h]
    pub fn update(&mut self, bounds: Vec2) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > bounds.x || self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.deleted = true;
        }
    }
}

/// Packed 0xRRGGBB colours used by the renderer
pub mod colors {
    pub const BLOOD: u32 = 0xff3333;
    pub const ELITE: u32 = 0xff9933;
    pub const BRUTE: u32 = 0xcc33ff;
    pub const POISON: u32 = 0x66ff66;
    pub const LEVEL_UP: u32 = 0xffdd33;
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub size: f32,
    /// 0-1, decreases by `decay` every tick
    pub life: f32,
    pub decay: f32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay;
        self.size *= PARTICLE_SHRINK;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}
