//! The player avatar
//!
//! Owns its own timers (soul regen, cooldowns, dash, ultimate). Ability
//! effects that touch other entities are returned to the tick loop as
//! [`PlayerActions`] so the player never borrows the enemy list.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ability::Ability;
use super::tick::TickInput;
use crate::consts::*;
use crate::direction_or_zero;

/// Per-ability cooldown timers (ticks remaining)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldowns {
    pub slash: u32,
    pub orb: u32,
    pub dash: u32,
    pub ult: u32,
}

impl Cooldowns {
    pub fn get(&self, ability: Ability) -> u32 {
        match ability {
            Ability::Slash => self.slash,
            Ability::OrbBurst => self.orb,
            Ability::Dash => self.dash,
            Ability::Ultimate => self.ult,
        }
    }

    fn slot(&mut self, ability: Ability) -> &mut u32 {
        match ability {
            Ability::Slash => &mut self.slash,
            Ability::OrbBurst => &mut self.orb,
            Ability::Dash => &mut self.dash,
            Ability::Ultimate => &mut self.ult,
        }
    }

    /// Decrement every positive timer by one
    pub fn tick(&mut self) {
        for t in [&mut self.slash, &mut self.orb, &mut self.dash, &mut self.ult] {
            *t = t.saturating_sub(1);
        }
    }

    /// Remaining fraction of the full cooldown, 0 when ready
    pub fn ratio(&self, ability: Ability) -> f32 {
        self.get(ability) as f32 / ability.cooldown() as f32
    }
}

/// A countdown-driven effect (dash, ultimate)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub active: bool,
    pub remaining: u32,
}

impl TimedEffect {
    pub fn activate(&mut self, duration: u32) {
        self.active = duration > 0;
        self.remaining = duration;
    }

    /// Count down one tick; deactivates at zero
    pub fn tick(&mut self) {
        if self.active {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.active = false;
            }
        }
    }
}

/// What the player did this tick that affects the rest of the world
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerActions {
    /// Abilities that fired, in trigger order
    pub casts: Vec<Ability>,
    /// The ultimate pulse is live this tick
    pub ultimate_pulse: bool,
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub soul: f32,
    pub max_soul: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_level: u32,
    pub essence: u32,
    pub cooldowns: Cooldowns,
    pub dash: TimedEffect,
    pub ultimate: TimedEffect,
    /// Last non-zero movement direction (dash heading when standing still)
    pub facing: Vec2,
}

impl Player {
    /// Spawn at `pos` with starting stats
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            health: PLAYER_START_HEALTH,
            max_health: PLAYER_START_HEALTH,
            soul: PLAYER_MAX_SOUL,
            max_soul: PLAYER_MAX_SOUL,
            level: 1,
            xp: 0,
            xp_to_level: START_XP_TO_LEVEL,
            essence: 0,
            cooldowns: Cooldowns::default(),
            dash: TimedEffect::default(),
            ultimate: TimedEffect::default(),
            facing: Vec2::X,
        }
    }

    /// Immune to contact damage while dashing
    pub fn is_invulnerable(&self) -> bool {
        self.dash.active
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, self.max_health);
    }

    /// Gate check: off cooldown and enough soul
    pub fn can_use(&self, ability: Ability) -> bool {
        self.cooldowns.get(ability) == 0 && self.soul >= ability.soul_cost()
    }

    /// Pay for `ability` and start its effect. Returns false if gated.
    pub fn try_use(&mut self, ability: Ability) -> bool {
        if !self.can_use(ability) {
            return false;
        }
        self.soul = (self.soul - ability.soul_cost()).clamp(0.0, self.max_soul);
        *self.cooldowns.slot(ability) = ability.cooldown();
        match ability {
            Ability::Dash => self.dash.activate(DASH_DURATION),
            Ability::Ultimate => self.ultimate.activate(ULT_DURATION),
            Ability::Slash | Ability::OrbBurst => {}
        }
        true
    }

    /// Movement direction from WASD; S wins over W and D over A
    pub fn move_direction(input: &TickInput) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if input.is_down("w") {
            dir.y = -1.0;
        }
        if input.is_down("s") {
            dir.y = 1.0;
        }
        if input.is_down("a") {
            dir.x = -1.0;
        }
        if input.is_down("d") {
            dir.x = 1.0;
        }
        direction_or_zero(dir)
    }

    /// Advance one tick from the current input state.
    ///
    /// `digits_reserved` suppresses the digit-bound abilities while the
    /// inventory panel owns those keys.
    pub fn update(&mut self, input: &TickInput, bounds: Vec2, digits_reserved: bool) -> PlayerActions {
        self.soul = (self.soul + SOUL_REGEN).min(self.max_soul);
        self.cooldowns.tick();
        self.dash.tick();

        // Triggers before movement so a fresh dash moves at dash speed this tick
        let mut actions = PlayerActions::default();
        for ability in Ability::ALL {
            if digits_reserved && ability.uses_digit_key() {
                continue;
            }
            if input.is_down(ability.key()) && self.try_use(ability) {
                actions.casts.push(ability);
            }
        }

        let dir = Self::move_direction(input);
        if dir != Vec2::ZERO {
            self.facing = dir;
        }
        let speed = if self.dash.active {
            PLAYER_DASH_SPEED
        } else {
            PLAYER_SPEED
        };
        self.pos += dir * speed;
        self.clamp_to(bounds);

        if self.ultimate.active {
            actions.ultimate_pulse = true;
            self.ultimate.tick();
        }

        actions
    }

    /// Keep the whole body inside the play area
    pub fn clamp_to(&mut self, bounds: Vec2) {
        let r = self.radius;
        self.pos.x = self.pos.x.clamp(r, (bounds.x - r).max(r));
        self.pos.y = self.pos.y.clamp(r, (bounds.y - r).max(r));
    }

    /// Grant experience; the tick loop checks the threshold afterwards
    pub fn gain_xp(&mut self, amount: u32) {
        self.xp += amount;
    }

    pub fn ready_to_level(&self) -> bool {
        self.xp >= self.xp_to_level
    }

    /// One level-up: reset xp, raise threshold, raise max health and fully heal
    pub fn level_up(&mut self) {
        self.level += 1;
        self.xp = 0;
        self.xp_to_level = (self.xp_to_level as f32 * XP_GROWTH).round() as u32;
        self.max_health += LEVEL_UP_HEALTH_BONUS;
        self.health = self.max_health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn held(keys: &[&str]) -> TickInput {
        let mut input = TickInput::default();
        for k in keys {
            input.set_key(k, true);
        }
        input
    }

    #[test]
    fn test_soul_regen_is_capped() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        player.soul = 99.9;
        player.update(&TickInput::default(), BOUNDS, false);
        assert_eq!(player.soul, PLAYER_MAX_SOUL);
    }

    #[test]
    fn test_slash_gated_by_soul() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        player.soul = 15.0;
        player.max_soul = 15.0; // freeze regen at the cap
        let actions = player.update(&held(&["1"]), BOUNDS, false);
        assert!(actions.casts.is_empty());
        assert_eq!(player.soul, 15.0);
        assert_eq!(player.cooldowns.slash, 0);
    }

    #[test]
    fn test_slash_sets_cooldown_and_spends_soul() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        let actions = player.update(&held(&["1"]), BOUNDS, false);
        assert_eq!(actions.casts, vec![Ability::Slash]);
        assert_eq!(player.cooldowns.slash, SLASH_COOLDOWN);
        assert!((player.soul - (PLAYER_MAX_SOUL - SLASH_COST)).abs() < 1e-4);

        // Held key does not fire again until the cooldown runs out
        for _ in 0..SLASH_COOLDOWN - 1 {
            let actions = player.update(&held(&["1"]), BOUNDS, false);
            assert!(actions.casts.is_empty());
        }
        let actions = player.update(&held(&["1"]), BOUNDS, false);
        assert_eq!(actions.casts, vec![Ability::Slash]);
    }

    #[test]
    fn test_digit_abilities_reserved_by_inventory() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        let actions = player.update(&held(&["1", "2", " "]), BOUNDS, true);
        assert_eq!(actions.casts, vec![Ability::Dash]);
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let dir = Player::move_direction(&held(&["w", "d"]));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y < 0.0);
    }

    #[test]
    fn test_opposed_keys_last_wins_per_axis() {
        let dir = Player::move_direction(&held(&["w", "s", "a", "d"]));
        assert!(dir.x > 0.0 && dir.y > 0.0);
    }

    #[test]
    fn test_position_clamped_to_bounds() {
        let mut player = Player::new(Vec2::new(19.0, 300.0));
        player.update(&held(&["a"]), BOUNDS, false);
        assert_eq!(player.pos.x, PLAYER_RADIUS);
    }

    #[test]
    fn test_dash_speed_and_expiry() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        player.update(&held(&[" "]), BOUNDS, false);
        assert!(player.dash.active);
        let before = player.pos.x;
        player.update(&held(&["d"]), BOUNDS, false);
        assert!((player.pos.x - before - PLAYER_DASH_SPEED).abs() < 1e-4);
        for _ in 0..DASH_DURATION - 2 {
            player.update(&TickInput::default(), BOUNDS, false);
        }
        assert!(player.dash.active);
        player.update(&TickInput::default(), BOUNDS, false);
        assert!(!player.dash.active);
    }

    #[test]
    fn test_ultimate_pulses_for_full_duration() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        let mut pulses = 0;
        let actions = player.update(&held(&["="]), BOUNDS, false);
        assert_eq!(actions.casts, vec![Ability::Ultimate]);
        if actions.ultimate_pulse {
            pulses += 1;
        }
        for _ in 0..ULT_DURATION + 10 {
            if player.update(&TickInput::default(), BOUNDS, false).ultimate_pulse {
                pulses += 1;
            }
        }
        assert_eq!(pulses, ULT_DURATION);
    }

    #[test]
    fn test_level_up_exactly_at_threshold() {
        let mut player = Player::new(Vec2::ZERO);
        player.health = 10.0;
        player.gain_xp(100);
        assert!(player.ready_to_level());
        player.level_up();
        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 0);
        assert_eq!(player.xp_to_level, 140);
        assert_eq!(player.max_health, PLAYER_START_HEALTH + 150.0);
        assert_eq!(player.health, player.max_health);
        player.gain_xp(0);
        assert!(!player.ready_to_level());
    }

    #[test]
    fn test_health_clamped() {
        let mut player = Player::new(Vec2::ZERO);
        player.take_damage(10_000.0);
        assert_eq!(player.health, 0.0);
        assert!(player.is_dead());
        player.heal(10_000.0);
        assert_eq!(player.health, player.max_health);
    }
}
