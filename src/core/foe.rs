//! Villains and creatures

use crate::core::{FoeHook, FoeId, FoeName, GameEntity, HeroHook, HeroId, VulnerabilityHook};
use serde::{Deserialize, Serialize};

/// Foe categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoeKind {
    Villain,
    Creature,
    VillainCreature,
}

/// The two things heroes put on foes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Damage,
    Influence,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Damage => f.write_str("damage"),
            Resource::Influence => f.write_str("influence"),
        }
    }
}

/// Where a foe is in its lifecycle. Defeated is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoeStatus {
    Undrawn,
    Active,
    Defeated,
}

/// Accumulated and per-turn progress on one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Track {
    /// Needed to satisfy this track (0 = trivially satisfied)
    pub threshold: u32,
    pub accumulated: u32,
    pub taken_this_turn: u32,
    /// Most this foe may receive in one turn
    pub per_turn_cap: Option<u32>,
}

impl Track {
    pub fn new(threshold: u32) -> Self {
        Track {
            threshold,
            ..Track::default()
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.accumulated >= self.threshold
    }

    /// How much more this track can take right now
    pub fn capacity(&self) -> u32 {
        let to_threshold = self.threshold.saturating_sub(self.accumulated);
        match self.per_turn_cap {
            Some(cap) => to_threshold.min(cap.saturating_sub(self.taken_this_turn)),
            None => to_threshold,
        }
    }

    pub fn cap_reached(&self) -> bool {
        self.per_turn_cap
            .is_some_and(|cap| self.taken_this_turn >= cap)
    }
}

/// A foe definition
#[derive(Debug, Clone)]
pub struct FoeDef {
    pub name: FoeName,
    pub kind: FoeKind,
    pub health: u32,
    pub influence: u32,
    pub max_damage_per_turn: Option<u32>,
    pub max_influence_per_turn: Option<u32>,
    pub text: String,
    pub effect: Option<FoeHook>,
    pub on_reveal: Option<FoeHook>,
    pub cleanup: Option<FoeHook>,
    pub reward: Option<HeroHook>,
    pub vulnerability: Option<VulnerabilityHook>,
}

impl FoeDef {
    /// A foe defeated by `health` damage and `influence` influence
    pub fn new(name: impl Into<FoeName>, kind: FoeKind, health: u32, influence: u32) -> Self {
        FoeDef {
            name: name.into(),
            kind,
            health,
            influence,
            max_damage_per_turn: None,
            max_influence_per_turn: None,
            text: String::new(),
            effect: None,
            on_reveal: None,
            cleanup: None,
            reward: None,
            vulnerability: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_damage_cap(mut self, per_turn: u32) -> Self {
        self.max_damage_per_turn = Some(per_turn);
        self
    }

    pub fn with_influence_cap(mut self, per_turn: u32) -> Self {
        self.max_influence_per_turn = Some(per_turn);
        self
    }

    pub fn with_effect(mut self, hook: FoeHook) -> Self {
        self.effect = Some(hook);
        self
    }

    pub fn with_on_reveal(mut self, hook: FoeHook) -> Self {
        self.on_reveal = Some(hook);
        self
    }

    pub fn with_cleanup(mut self, hook: FoeHook) -> Self {
        self.cleanup = Some(hook);
        self
    }

    pub fn with_reward(mut self, hook: HeroHook) -> Self {
        self.reward = Some(hook);
        self
    }

    pub fn with_vulnerability(mut self, hook: VulnerabilityHook) -> Self {
        self.vulnerability = Some(hook);
        self
    }

    pub fn instantiate(&self, id: FoeId) -> Foe {
        let mut damage = Track::new(self.health);
        damage.per_turn_cap = self.max_damage_per_turn;
        let mut influence = Track::new(self.influence);
        influence.per_turn_cap = self.max_influence_per_turn;

        Foe {
            id,
            name: self.name.clone(),
            kind: self.kind,
            text: self.text.clone(),
            damage,
            influence,
            status: FoeStatus::Undrawn,
            stunned_by: None,
            effect: self.effect.clone(),
            on_reveal: self.on_reveal.clone(),
            cleanup: self.cleanup.clone(),
            reward: self.reward.clone(),
            vulnerability: self.vulnerability.clone(),
        }
    }
}

/// A villain or creature during play
#[derive(Debug, Clone)]
pub struct Foe {
    pub id: FoeId,
    pub name: FoeName,
    pub kind: FoeKind,
    pub text: String,
    pub damage: Track,
    pub influence: Track,
    pub status: FoeStatus,
    /// Set while stunned; the foe recovers when this hero's turn comes around
    pub stunned_by: Option<HeroId>,
    pub effect: Option<FoeHook>,
    pub on_reveal: Option<FoeHook>,
    pub cleanup: Option<FoeHook>,
    pub reward: Option<HeroHook>,
    pub vulnerability: Option<VulnerabilityHook>,
}

impl Foe {
    pub fn track(&self, resource: Resource) -> &Track {
        match resource {
            Resource::Damage => &self.damage,
            Resource::Influence => &self.influence,
        }
    }

    pub fn track_mut(&mut self, resource: Resource) -> &mut Track {
        match resource {
            Resource::Damage => &mut self.damage,
            Resource::Influence => &mut self.influence,
        }
    }

    /// Both thresholds met (a zero threshold is always met)
    pub fn is_defeated(&self) -> bool {
        self.damage.is_satisfied() && self.influence.is_satisfied()
    }

    pub fn is_active(&self) -> bool {
        self.status == FoeStatus::Active
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned_by.is_some()
    }

    pub fn is_villain(&self) -> bool {
        matches!(self.kind, FoeKind::Villain | FoeKind::VillainCreature)
    }

    pub fn is_creature(&self) -> bool {
        matches!(self.kind, FoeKind::Creature | FoeKind::VillainCreature)
    }

    /// Has this foe taken any damage or influence this turn?
    pub fn was_hit_this_turn(&self) -> bool {
        self.damage.taken_this_turn > 0 || self.influence.taken_this_turn > 0
    }

    pub fn end_turn(&mut self) {
        self.damage.taken_this_turn = 0;
        self.influence.taken_this_turn = 0;
    }
}

impl GameEntity<Foe> for Foe {
    fn id(&self) -> FoeId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}
