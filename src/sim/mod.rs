//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-counted durations only
//! - Seeded RNG only
//! - Mark-then-compact entity removal
//! - No rendering or platform dependencies

pub mod ability;
pub mod collision;
pub mod enemy;
pub mod inventory;
pub mod player;
pub mod projectile;
pub mod spawn;
pub mod state;
pub mod tick;

pub use ability::Ability;
pub use collision::{circles_overlap, in_cone, within_radius};
pub use enemy::{Enemy, EnemyTier, StatusEffects};
pub use inventory::{Inventory, Item, ItemKind};
pub use player::{Cooldowns, Player, PlayerActions, TimedEffect};
pub use projectile::{Bullet, Particle};
pub use spawn::{choose_tier, spawn_interval};
pub use state::{GameEvent, GamePhase, GameState, MAX_PARTICLES};
pub use tick::{TickInput, tick};
