//! Player abilities and their gating rules

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The four cooldown-gated abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Melee cone toward the pointer
    Slash,
    /// Radial ring of projectiles
    OrbBurst,
    /// Short speed boost with contact immunity
    Dash,
    /// Long area pulse that damages and slows
    Ultimate,
}

impl Ability {
    /// All abilities in trigger order
    pub const ALL: [Ability; 4] = [
        Ability::Slash,
        Ability::OrbBurst,
        Ability::Dash,
        Ability::Ultimate,
    ];

    /// Lowercase key identifier bound to this ability
    pub fn key(&self) -> &'static str {
        match self {
            Ability::Slash => "1",
            Ability::OrbBurst => "2",
            Ability::Dash => " ",
            Ability::Ultimate => "=",
        }
    }

    /// Soul spent on use
    pub fn soul_cost(&self) -> f32 {
        match self {
            Ability::Slash => SLASH_COST,
            Ability::OrbBurst => ORB_COST,
            Ability::Dash | Ability::Ultimate => 0.0,
        }
    }

    /// Cooldown (ticks) set on use
    pub fn cooldown(&self) -> u32 {
        match self {
            Ability::Slash => SLASH_COOLDOWN,
            Ability::OrbBurst => ORB_COOLDOWN,
            Ability::Dash => DASH_COOLDOWN,
            Ability::Ultimate => ULT_COOLDOWN,
        }
    }

    /// Bound to a digit key (shared with inventory slots)
    pub fn uses_digit_key(&self) -> bool {
        matches!(self, Ability::Slash | Ability::OrbBurst)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::Slash => "Slash",
            Ability::OrbBurst => "Orb Burst",
            Ability::Dash => "Dash",
            Ability::Ultimate => "Ultimate",
        }
    }
}
