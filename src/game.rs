//! Game instance: lifecycle, input plumbing and the fixed-timestep driver
//!
//! Hosts feed raw key/pointer events and frame deltas in; the simulation only
//! ever advances in whole `SIM_DT` ticks.

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::view::{FrameView, HudView};

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    input: TickInput,
    accumulator: f32,
    /// Events from every tick run by the last `frame` call
    frame_events: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: Settings, bounds: Vec2) -> Self {
        let mut state = GameState::new(0, bounds);
        state.max_particles = settings.max_particles();
        Self {
            state,
            settings,
            input: TickInput::default(),
            accumulator: 0.0,
            frame_events: Vec::new(),
        }
    }

    /// Reset all state and begin ticking
    pub fn start_game(&mut self, seed: u64) {
        self.state.max_particles = self.settings.max_particles();
        self.state.start_game(seed);
        self.input = TickInput::default();
        self.accumulator = 0.0;
    }

    /// Halt ticking and publish the game-over message
    pub fn end_game(&mut self) {
        self.state.end_game();
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn game_over_message(&self) -> Option<&str> {
        self.state.game_over_message.as_deref()
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.state.max_particles = settings.max_particles();
        let cap = self.state.max_particles;
        if self.state.particles.len() > cap {
            let excess = self.state.particles.len() - cap;
            self.state.particles.drain(..excess);
        }
        self.settings = settings;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.set_bounds(Vec2::new(width, height));
    }

    pub fn key_down(&mut self, key: &str) {
        let key = key.to_lowercase();
        if !self.input.is_down(&key) {
            self.input.press(&key);
        }
        self.input.set_key(&key, true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.set_key(key, false);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer = Vec2::new(x, y);
    }

    pub fn set_firing(&mut self, firing: bool) {
        self.input.firing = firing;
    }

    pub fn input(&self) -> &TickInput {
        &self.input
    }

    /// Run as many fixed ticks as `dt` seconds allow; returns ticks run
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.frame_events.clear();
        if !self.state.is_running() {
            self.accumulator = 0.0;
            self.input.pressed.clear();
            return 0;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
            if !self.state.is_running() {
                self.accumulator = 0.0;
                break;
            }
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Run exactly one tick with the current input
    pub fn step(&mut self) {
        tick(&mut self.state, &self.input);
        self.frame_events.extend_from_slice(&self.state.events);
        // Clear one-shot inputs after processing
        self.input.pressed.clear();
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.frame_events
    }

    pub fn hud(&self) -> HudView {
        HudView::from_state(&self.state)
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView::new(&self.state, &self.settings)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Settings::default(), Vec2::new(DEFAULT_WIDTH, DEFAULT_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_runs_fixed_steps() {
        let mut game = Game::default();
        game.start_game(1);
        assert_eq!(game.frame(SIM_DT * 2.5), 2);
        assert_eq!(game.state.time_ticks, 2);
        // Leftover half tick carries over
        assert_eq!(game.frame(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_frame_caps_substeps() {
        let mut game = Game::default();
        game.start_game(1);
        // A huge delta clamps to MAX_FRAME_DT, then the substep cap applies
        assert_eq!(game.frame(10.0), MAX_SUBSTEPS);
        assert_eq!(game.state.time_ticks, MAX_SUBSTEPS as u64);
        // Backlog was dropped, not replayed
        assert_eq!(game.frame(0.0), 0);
    }

    #[test]
    fn test_substep_cap_is_reachable() {
        assert!(MAX_FRAME_DT / SIM_DT > MAX_SUBSTEPS as f32);
    }

    #[test]
    fn test_menu_does_not_advance() {
        let mut game = Game::default();
        assert_eq!(game.frame(1.0), 0);
        assert_eq!(game.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_menu_discards_presses() {
        let mut game = Game::default();
        for _ in 0..5 {
            game.key_down("Tab");
            game.key_up("Tab");
            game.frame(SIM_DT);
        }
        assert!(game.input().pressed.is_empty());
        // Nothing stale carries into the first running tick
        game.start_game(1);
        game.step();
        assert!(!game.state.inventory.open);
    }

    #[test]
    fn test_key_repeat_is_not_a_new_press() {
        let mut game = Game::default();
        game.start_game(1);
        game.key_down("Tab");
        game.key_down("Tab");
        assert_eq!(game.input().pressed, vec!["tab".to_string()]);
        game.step();
        assert!(game.state.inventory.open);
        assert!(game.input().pressed.is_empty());
        assert!(game.input().is_down("tab"));
        game.key_up("Tab");
        assert!(!game.input().is_down("tab"));
    }

    #[test]
    fn test_end_game_exposes_message() {
        let mut game = Game::default();
        game.start_game(1);
        game.end_game();
        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(game.game_over_message(), Some("Game over! Score: 0"));
        game.start_game(2);
        assert!(game.game_over_message().is_none());
    }

    #[test]
    fn test_settings_cap_particles() {
        let mut game = Game::new(
            Settings {
                particles: false,
                ..Settings::default()
            },
            Vec2::new(800.0, 600.0),
        );
        game.start_game(1);
        game.state.player.xp = 1000;
        game.step();
        assert_eq!(game.state.player.level, 2);
        assert!(game.state.particles.is_empty());
    }
}
