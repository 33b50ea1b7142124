//! Enemy spawn policy
//!
//! Spawns speed up with player level (down to a floor) and tougher tiers
//! unlock at score thresholds.

use glam::Vec2;
use rand::Rng;

use super::enemy::{Enemy, EnemyTier};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Ticks between spawns at the given player level
pub fn spawn_interval(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(SPAWN_LEVEL_STEP);
    SPAWN_BASE_INTERVAL
        .saturating_sub(reduction)
        .max(SPAWN_MIN_INTERVAL)
}

/// Pick a tier for the current score; higher tiers are always rarer
pub fn choose_tier<R: Rng>(score: u64, rng: &mut R) -> EnemyTier {
    let roll: f64 = rng.random();
    if score >= TIER3_SCORE && roll < TIER3_CHANCE {
        EnemyTier::Brute
    } else if score >= TIER2_SCORE && roll >= 1.0 - TIER2_CHANCE {
        EnemyTier::Elite
    } else {
        EnemyTier::Grunt
    }
}

/// Position on `edge`, uniform along it, one radius outside the play area
pub fn edge_position<R: Rng>(edge: Edge, bounds: Vec2, radius: f32, rng: &mut R) -> Vec2 {
    let along_x = rng.random_range(0.0..=bounds.x.max(0.0));
    let along_y = rng.random_range(0.0..=bounds.y.max(0.0));
    match edge {
        Edge::Top => Vec2::new(along_x, -radius),
        Edge::Bottom => Vec2::new(along_x, bounds.y + radius),
        Edge::Left => Vec2::new(-radius, along_y),
        Edge::Right => Vec2::new(bounds.x + radius, along_y),
    }
}

/// Advance the spawn timer and spawn one enemy when it elapses
pub fn run_spawn_policy(state: &mut GameState) {
    state.spawn_timer += 1;
    if state.spawn_timer < spawn_interval(state.player.level) {
        return;
    }
    state.spawn_timer = 0;
    spawn_enemy(state);
}

/// Spawn a single enemy at a random edge
pub fn spawn_enemy(state: &mut GameState) {
    let tier = choose_tier(state.score, &mut state.rng);
    let edge = Edge::ALL[state.rng.random_range(0..Edge::ALL.len())];
    let pos = edge_position(edge, state.bounds, tier.radius(), &mut state.rng);
    let id = state.next_entity_id();
    log::debug!("Spawn enemy {} tier {} at {:?} ({:?})", id, tier.level(), pos, edge);
    state.enemies.push(Enemy::new(id, tier, pos));
    state.events.push(GameEvent::EnemySpawned { tier: tier.level() });
}
