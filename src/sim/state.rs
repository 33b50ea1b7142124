//! Game state and core simulation types
//!
//! Every piece of mutable simulation state lives in [`GameState`]. The tick
//! loop is the only writer; collaborators read it through `crate::view`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::inventory::Inventory;
use super::player::Player;
use super::projectile::{Bullet, Particle};
use crate::consts::*;
use crate::from_angle;

/// Particle cap when no settings are supplied
pub const MAX_PARTICLES: usize = 500;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not running; title or game-over screen
    #[default]
    Menu,
    /// Active gameplay
    Running,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shot,
    Slash { hits: u32 },
    OrbBurst,
    Dash,
    UltimateStart,
    EnemySpawned { tier: u32 },
    EnemyKilled { tier: u32 },
    PlayerHit,
    LevelUp { level: u32 },
    ItemPicked,
    ItemUsed,
    GameOver { score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Play area size (width, height)
    pub bounds: Vec2,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub inventory: Inventory,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks since the last enemy spawn
    pub spawn_timer: u32,
    /// Ticks since the last item drop
    pub item_timer: u32,
    /// Ticks until the held trigger may fire again
    pub fire_timer: u32,
    /// Screen shake intensity for the renderer (decays every tick)
    pub screen_shake: f32,
    /// Particle cap (from settings)
    pub max_particles: usize,
    /// Events raised during the last tick
    pub events: Vec<GameEvent>,
    /// Shown on the menu after a run ends
    pub game_over_message: Option<String>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh state in the menu, player centred in `bounds`
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            bounds,
            player: Player::new(bounds / 2.0),
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            inventory: Inventory::default(),
            score: 0,
            time_ticks: 0,
            spawn_timer: 0,
            item_timer: 0,
            fire_timer: 0,
            screen_shake: 0.0,
            max_particles: MAX_PARTICLES,
            events: Vec::new(),
            game_over_message: None,
            next_id: 1,
        }
    }

    /// Reset everything and begin ticking
    pub fn start_game(&mut self, seed: u64) {
        let bounds = self.bounds;
        let max_particles = self.max_particles;
        *self = Self::new(seed, bounds);
        self.max_particles = max_particles;
        self.phase = GamePhase::Running;
        log::info!("Game started (seed {})", seed);
    }

    /// Stop ticking and publish the game-over message
    pub fn end_game(&mut self) {
        if self.phase == GamePhase::Menu {
            return;
        }
        self.phase = GamePhase::Menu;
        let message = format!("Game over! Score: {}", self.score);
        log::info!(
            "{} (level {}, essence {}, {} ticks)",
            message,
            self.player.level,
            self.player.essence,
            self.time_ticks
        );
        self.game_over_message = Some(message);
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Resize the play area, keeping the player inside it
    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        self.player.clamp_to(bounds);
    }

    pub fn add_shake(&mut self, amount: f32) {
        self.screen_shake = self.screen_shake.max(amount);
    }

    /// Push a particle, dropping the oldest when at the cap
    pub fn push_particle(&mut self, particle: Particle) {
        if self.max_particles == 0 {
            return;
        }
        while self.particles.len() >= self.max_particles {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Burst of `count` particles flying outward from `pos`
    pub fn emit_burst(&mut self, pos: Vec2, color: u32, count: usize, max_speed: f32) {
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(0.5..max_speed.max(0.6));
            let size = self.rng.random_range(2.0..6.0);
            let decay = self.rng.random_range(0.015..0.04);
            self.push_particle(Particle {
                pos,
                vel: from_angle(angle) * speed,
                color,
                size,
                life: 1.0,
                decay,
            });
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0, Vec2::new(DEFAULT_WIDTH, DEFAULT_HEIGHT))
    }
}
