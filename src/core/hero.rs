//! Hero representation

use crate::core::{AssignHook, GameEntity, HeroHook, HeroId, HeroName, HeroPermissions};
use crate::zones::HeroZones;
use serde::{Deserialize, Serialize};

/// Whether a hero can currently take heart changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StunState {
    #[default]
    Active,
    Stunned,
}

/// Represents a hero in the game
#[derive(Debug, Clone)]
pub struct Hero {
    /// Unique ID for this hero
    pub id: HeroId,

    pub name: HeroName,

    /// Current hearts, always within `0..=max_hearts`
    pub hearts: u32,

    pub max_hearts: u32,

    /// Damage tokens available to assign to foes
    pub damage_tokens: u32,

    /// Influence tokens available to assign to foes or spend in the market
    pub influence_tokens: u32,

    pub stun: StunState,

    pub permissions: HeroPermissions,

    pub zones: HeroZones,

    /// One-shot bonuses paid the next time this hero defeats a foe
    pub extra_foe_rewards: Vec<HeroHook>,

    /// Run after each damage assignment this turn
    pub extra_damage_effects: Vec<AssignHook>,

    /// Run after each influence assignment this turn
    pub extra_influence_effects: Vec<AssignHook>,
}

impl Hero {
    pub fn new(id: HeroId, name: impl Into<HeroName>, max_hearts: u32) -> Self {
        Hero {
            id,
            name: name.into(),
            hearts: max_hearts,
            max_hearts,
            damage_tokens: 0,
            influence_tokens: 0,
            stun: StunState::Active,
            permissions: HeroPermissions::new(),
            zones: HeroZones::new(id),
            extra_foe_rewards: Vec::new(),
            extra_damage_effects: Vec::new(),
            extra_influence_effects: Vec::new(),
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.stun == StunState::Stunned
    }

    pub fn is_at_max_hearts(&self) -> bool {
        self.hearts >= self.max_hearts
    }

    pub fn clear_tokens(&mut self) {
        self.damage_tokens = 0;
        self.influence_tokens = 0;
    }

    /// Leave the stunned state with full hearts
    pub fn recover(&mut self) {
        self.stun = StunState::Active;
        self.hearts = self.max_hearts;
    }

    /// Drop everything that only lasts for one turn
    pub fn end_turn(&mut self) {
        self.permissions.end_turn();
        self.extra_foe_rewards.clear();
        self.extra_damage_effects.clear();
        self.extra_influence_effects.clear();
    }
}

impl GameEntity<Hero> for Hero {
    fn id(&self) -> HeroId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}
