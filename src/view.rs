//! Read-only views for the renderer and UI collaborators
//!
//! Built fresh each frame from [`GameState`]; nothing here can write back.

use glam::Vec2;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{Ability, Bullet, Enemy, GamePhase, GameState, Particle, Player};

/// Values the HUD shows (bars, cooldown overlays, counters)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub health: f32,
    pub max_health: f32,
    pub soul: f32,
    pub max_soul: f32,
    pub xp: u32,
    pub xp_to_level: u32,
    pub level: u32,
    pub essence: u32,
    pub score: u64,
    /// Remaining cooldown fraction per ability (0 = ready)
    pub slash_cooldown: f32,
    pub orb_cooldown: f32,
    pub dash_cooldown: f32,
    pub ult_cooldown: f32,
    pub dashing: bool,
    pub ultimate_active: bool,
    pub inventory: Vec<String>,
    pub inventory_open: bool,
    pub running: bool,
    pub game_over_message: Option<String>,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        let p = &state.player;
        Self {
            health: p.health,
            max_health: p.max_health,
            soul: p.soul,
            max_soul: p.max_soul,
            xp: p.xp,
            xp_to_level: p.xp_to_level,
            level: p.level,
            essence: p.essence,
            score: state.score,
            slash_cooldown: p.cooldowns.ratio(Ability::Slash),
            orb_cooldown: p.cooldowns.ratio(Ability::OrbBurst),
            dash_cooldown: p.cooldowns.ratio(Ability::Dash),
            ult_cooldown: p.cooldowns.ratio(Ability::Ultimate),
            dashing: p.dash.active,
            ultimate_active: p.ultimate.active,
            inventory: state.inventory.items.iter().map(|i| i.name.clone()).collect(),
            inventory_open: state.inventory.open,
            running: state.phase == GamePhase::Running,
            game_over_message: state.game_over_message.clone(),
        }
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView<'a> {
    pub bounds: Vec2,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub particles: &'a [Particle],
    /// Already zeroed when the player disabled shake
    pub screen_shake: f32,
    /// Radius of the ultimate pulse ring, if active
    pub ultimate_radius: Option<f32>,
}

impl<'a> FrameView<'a> {
    pub fn new(state: &'a GameState, settings: &Settings) -> Self {
        let shake = if settings.effective_screen_shake() {
            state.screen_shake
        } else {
            0.0
        };
        Self {
            bounds: state.bounds,
            player: &state.player,
            enemies: &state.enemies,
            bullets: &state.bullets,
            particles: &state.particles,
            screen_shake: shake,
            ultimate_radius: state
                .player
                .ultimate
                .active
                .then_some(crate::consts::ULT_RADIUS),
        }
    }
}
