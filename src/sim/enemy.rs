//! Homunculus enemies that seek the player

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::projectile::colors;
use crate::consts::*;
use crate::direction_or_zero;

/// Enemy strength class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum EnemyTier {
    #[default]
    Grunt,
    Elite,
    Brute,
}

impl EnemyTier {
    /// Numeric tier (1-3) used for health and rewards
    pub fn level(&self) -> u32 {
        match self {
            EnemyTier::Grunt => 1,
            EnemyTier::Elite => 2,
            EnemyTier::Brute => 3,
        }
    }

    pub fn max_health(&self) -> f32 {
        100.0 * self.level() as f32
    }

    pub fn radius(&self) -> f32 {
        14.0 + 4.0 * self.level() as f32
    }

    /// Bigger homunculi are slower
    pub fn speed(&self) -> f32 {
        match self {
            EnemyTier::Grunt => 1.8,
            EnemyTier::Elite => 1.5,
            EnemyTier::Brute => 1.2,
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            EnemyTier::Grunt => colors::BLOOD,
            EnemyTier::Elite => colors::ELITE,
            EnemyTier::Brute => colors::BRUTE,
        }
    }
}

/// Timed status effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    /// Ticks of damage-over-time remaining
    pub dot_ticks: u32,
    /// Ticks of slow remaining
    pub slow_ticks: u32,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub tier: EnemyTier,
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub status: StatusEffects,
    /// Health reached zero; rewarded and dropped at the end of the enemy pass
    pub dead: bool,
}

impl Enemy {
    pub fn new(id: u32, tier: EnemyTier, pos: Vec2) -> Self {
        Self {
            id,
            tier,
            pos,
            radius: tier.radius(),
            health: tier.max_health(),
            max_health: tier.max_health(),
            speed: tier.speed(),
            status: StatusEffects::default(),
            dead: false,
        }
    }

    pub fn is_slowed(&self) -> bool {
        self.status.slow_ticks > 0
    }

    pub fn effective_speed(&self) -> f32 {
        if self.is_slowed() {
            self.speed * SLOW_FACTOR
        } else {
            self.speed
        }
    }

    /// Apply direct damage and flag death at zero health
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.dead = true;
        }
    }

    pub fn apply_dot(&mut self, ticks: u32) {
        self.status.dot_ticks = self.status.dot_ticks.max(ticks);
    }

    pub fn apply_slow(&mut self, ticks: u32) {
        self.status.slow_ticks = self.status.slow_ticks.max(ticks);
    }

    /// Advance one tick: seek `target`, tick status effects.
    ///
    /// Returns true when a cosmetic damage-over-time particle should be emitted.
    pub fn update<R: Rng>(&mut self, target: Vec2, rng: &mut R) -> bool {
        let dir = direction_or_zero(target - self.pos);
        self.pos += dir * self.effective_speed();

        let mut emit = false;
        if self.status.dot_ticks > 0 {
            self.take_damage(DOT_DAMAGE);
            self.status.dot_ticks -= 1;
            emit = rng.random_bool(DOT_PARTICLE_CHANCE);
        }
        if self.status.slow_ticks > 0 {
            self.status.slow_ticks -= 1;
        }
        if self.health <= 0.0 {
            self.dead = true;
        }
        emit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tier_scaling() {
        assert_eq!(EnemyTier::Grunt.max_health(), 100.0);
        assert_eq!(EnemyTier::Brute.max_health(), 300.0);
        assert!(EnemyTier::Brute.radius() > EnemyTier::Grunt.radius());
    }

    #[test]
    fn test_seeks_target() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(1, EnemyTier::Grunt, Vec2::new(0.0, 0.0));
        enemy.update(Vec2::new(100.0, 0.0), &mut rng);
        assert!((enemy.pos.x - 1.8).abs() < 1e-5);
        assert_eq!(enemy.pos.y, 0.0);
    }

    #[test]
    fn test_standing_on_target_does_not_produce_nan() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(1, EnemyTier::Grunt, Vec2::new(10.0, 10.0));
        enemy.update(Vec2::new(10.0, 10.0), &mut rng);
        assert_eq!(enemy.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_slow_reduces_speed_and_expires() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(1, EnemyTier::Grunt, Vec2::ZERO);
        enemy.apply_slow(1);
        enemy.update(Vec2::new(100.0, 0.0), &mut rng);
        assert!((enemy.pos.x - 1.8 * 0.4).abs() < 1e-5);
        assert!(!enemy.is_slowed());
    }

    #[test]
    fn test_dot_ticks_down_health() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = Enemy::new(1, EnemyTier::Grunt, Vec2::ZERO);
        enemy.apply_dot(4);
        for _ in 0..6 {
            enemy.update(Vec2::ZERO, &mut rng);
        }
        assert!((enemy.health - 98.0).abs() < 1e-5);
        assert_eq!(enemy.status.dot_ticks, 0);
    }

    #[test]
    fn test_dead_once_cumulative_damage_reaches_max() {
        let mut enemy = Enemy::new(1, EnemyTier::Elite, Vec2::ZERO);
        enemy.take_damage(150.0);
        assert!(!enemy.dead);
        enemy.take_damage(50.0);
        assert!(enemy.dead);
        assert_eq!(enemy.health, 0.0);
    }
}
