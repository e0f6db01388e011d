//! Core game types and entities

pub mod card;
pub mod entity;
pub mod foe;
pub mod hazard;
pub mod hero;
pub mod hooks;
pub mod location;
pub mod permission;
pub mod types;

pub use card::{Capability, Card, CardDef, CardKind};
pub use entity::{EntityId, EntityStore, GameEntity};
pub use foe::{Foe, FoeDef, FoeKind, FoeStatus, Resource, Track};
pub use hazard::{HazardCard, HazardDef};
pub use hero::{Hero, StunState};
pub use hooks::{AssignHook, CardHook, FoeHook, GameHook, HeroHook, Hook, VulnerabilityHook};
pub use location::{Advance, Location, Stage};
pub use permission::{HeroPermissions, Permission};
pub use types::{CardName, FoeName, HeroName, Source};

pub type HeroId = EntityId<Hero>;
pub type CardId = EntityId<Card>;
pub type FoeId = EntityId<Foe>;
pub type HazardId = EntityId<HazardCard>;
