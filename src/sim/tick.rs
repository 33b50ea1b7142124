//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one display refresh.

use std::collections::HashMap;

use glam::Vec2;

use super::ability::Ability;
use super::collision::{circles_overlap, in_cone, within_radius};
use super::enemy::EnemyTier;
use super::inventory::{Item, ItemKind, slot_for_key};
use super::player::PlayerActions;
use super::projectile::{Bullet, Particle, colors};
use super::spawn::run_spawn_policy;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::{angle_to, direction_or_zero, from_angle};

/// Input state sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held keys, keyed by lowercase key identifier
    pub keys: HashMap<String, bool>,
    /// Keys pressed since the previous tick (one-shot)
    pub pressed: Vec<String>,
    /// Pointer position in play-area coordinates
    pub pointer: Vec2,
    /// Primary button held
    pub firing: bool,
}

impl TickInput {
    pub fn is_down(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    pub fn set_key(&mut self, key: &str, down: bool) {
        self.keys.insert(key.to_lowercase(), down);
    }

    /// Record a one-shot press (inventory toggle / slot use)
    pub fn press(&mut self, key: &str) {
        self.pressed.push(key.to_lowercase());
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.is_running() {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    state.screen_shake *= SHAKE_DECAY;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    handle_presses(state, input);
    fire_primary(state, input);

    // Player, then whatever the player set in motion
    let bounds = state.bounds;
    let actions = state.player.update(input, bounds, state.inventory.open);
    resolve_actions(state, input, &actions);

    for bullet in &mut state.bullets {
        bullet.update(bounds);
    }
    state.bullets.retain(|b| !b.deleted);

    run_spawn_policy(state);
    drop_items(state);
    update_enemies(state);
    check_level_up(state);

    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(Particle::is_alive);

    if state.player.is_dead() {
        state.end_game();
    }
}

fn handle_presses(state: &mut GameState, input: &TickInput) {
    for key in &input.pressed {
        if key == "tab" {
            state.inventory.toggle();
            continue;
        }
        if !state.inventory.open {
            continue;
        }
        let Some(item) = slot_for_key(key).and_then(|slot| state.inventory.take(slot)) else {
            continue;
        };
        use_item(state, &item);
    }
}

fn use_item(state: &mut GameState, item: &Item) {
    match item.kind {
        ItemKind::Heal(amount) => state.player.heal(amount),
    }
    log::debug!("Used {}", item.name);
    state.events.push(GameEvent::ItemUsed);
}

/// Held trigger fires toward the pointer every Nth tick
fn fire_primary(state: &mut GameState, input: &TickInput) {
    if state.fire_timer > 0 {
        state.fire_timer -= 1;
    }
    if !input.firing || state.fire_timer > 0 {
        return;
    }
    state.fire_timer = FIRE_INTERVAL_TICKS;

    let origin = state.player.pos;
    let mut dir = direction_or_zero(input.pointer - origin);
    if dir == Vec2::ZERO {
        dir = state.player.facing;
    }
    state.bullets.push(Bullet::new(origin, dir * BULLET_SPEED));
    state.events.push(GameEvent::Shot);
}

fn resolve_actions(state: &mut GameState, input: &TickInput, actions: &PlayerActions) {
    let origin = state.player.pos;

    for &ability in &actions.casts {
        log::debug!("{} cast at tick {}", ability.as_str(), state.time_ticks);
        match ability {
            Ability::Slash => {
                let facing = if input.pointer == origin {
                    state.player.facing.y.atan2(state.player.facing.x)
                } else {
                    angle_to(origin, input.pointer)
                };
                let mut hit_positions = Vec::new();
                for enemy in state.enemies.iter_mut().filter(|e| !e.dead) {
                    if in_cone(origin, facing, SLASH_HALF_ANGLE, SLASH_RANGE, enemy.pos, enemy.radius) {
                        enemy.take_damage(SLASH_DAMAGE);
                        hit_positions.push(enemy.pos);
                    }
                }
                for pos in &hit_positions {
                    state.emit_burst(*pos, colors::BLOOD, 4, 3.0);
                }
                state.events.push(GameEvent::Slash {
                    hits: hit_positions.len() as u32,
                });
            }
            Ability::OrbBurst => {
                let step = std::f32::consts::TAU / ORB_COUNT as f32;
                for i in 0..ORB_COUNT {
                    let vel = from_angle(step * i as f32) * ORB_SPEED;
                    state.bullets.push(Bullet::new(origin, vel));
                }
                state.events.push(GameEvent::OrbBurst);
            }
            Ability::Dash => {
                state.add_shake(DASH_SHAKE);
                state.events.push(GameEvent::Dash);
            }
            Ability::Ultimate => {
                log::info!("Ultimate unleashed at tick {}", state.time_ticks);
                state.events.push(GameEvent::UltimateStart);
            }
        }
    }

    if actions.ultimate_pulse {
        for enemy in state.enemies.iter_mut().filter(|e| !e.dead) {
            if within_radius(origin, ULT_RADIUS, enemy.pos) {
                enemy.take_damage(ULT_DAMAGE);
                enemy.apply_slow(ULT_SLOW_TICKS);
            }
        }
    }
}

fn drop_items(state: &mut GameState) {
    state.item_timer += 1;
    if state.item_timer < ITEM_DROP_INTERVAL {
        return;
    }
    state.item_timer = 0;
    if state.inventory.push(Item::small_potion()) {
        state.events.push(GameEvent::ItemPicked);
    }
}

/// Move enemies, resolve bullet and contact hits, then compact out the dead
fn update_enemies(state: &mut GameState) {
    let mut enemies = std::mem::take(&mut state.enemies);
    let mut dot_sparks = Vec::new();
    let mut player_hit = false;

    for enemy in &mut enemies {
        if !enemy.dead && enemy.update(state.player.pos, &mut state.rng) {
            dot_sparks.push(enemy.pos);
        }
        if enemy.dead {
            continue;
        }

        for bullet in state.bullets.iter_mut().filter(|b| !b.deleted) {
            if circles_overlap(enemy.pos, enemy.radius, bullet.pos, bullet.radius) {
                enemy.take_damage(bullet.damage);
                enemy.apply_dot(DOT_TICKS);
                bullet.deleted = true;
                if enemy.dead {
                    break;
                }
            }
        }
        if enemy.dead {
            continue;
        }

        let player = &mut state.player;
        if !player.is_invulnerable()
            && circles_overlap(enemy.pos, enemy.radius, player.pos, player.radius)
        {
            player.take_damage(CONTACT_DAMAGE);
            player_hit = true;
        }
    }

    let (dead, alive): (Vec<_>, Vec<_>) = enemies.into_iter().partition(|e| e.dead);
    state.enemies = alive;
    state.bullets.retain(|b| !b.deleted);

    for pos in dot_sparks {
        state.emit_burst(pos, colors::POISON, 1, 1.5);
    }
    if player_hit {
        state.add_shake(HIT_SHAKE);
        state.events.push(GameEvent::PlayerHit);
    }
    for enemy in dead {
        reward_kill(state, enemy.tier);
        state.emit_burst(enemy.pos, enemy.tier.color(), DEATH_PARTICLES, 4.0);
    }
}

fn reward_kill(state: &mut GameState, tier: EnemyTier) {
    let t = tier.level();
    state.score += KILL_SCORE * t as u64;
    state.player.gain_xp(KILL_XP * t);
    state.player.essence += KILL_ESSENCE * t;
    state.events.push(GameEvent::EnemyKilled { tier: t });
}

/// At most one level per tick
fn check_level_up(state: &mut GameState) {
    if !state.player.ready_to_level() {
        return;
    }
    state.player.level_up();
    log::info!(
        "Level up! Now level {} (next at {} xp)",
        state.player.level,
        state.player.xp_to_level
    );
    let pos = state.player.pos;
    state.emit_burst(pos, colors::LEVEL_UP, LEVEL_UP_PARTICLES, 5.0);
    state.events.push(GameEvent::LevelUp {
        level: state.player.level,
    });
}
