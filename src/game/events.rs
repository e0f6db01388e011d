//! Callback bus
//!
//! Effects compose by registering listeners against named triggers instead
//! of knowing about each other. Listeners live in an arena keyed by
//! [`ListenerId`]; the id returned from registration is the only handle
//! needed to remove that exact registration, so two copies of the same
//! effect register and unregister independently.
//!
//! Dispatch itself lives on [`GameState::fire`] because listeners receive
//! `&mut GameState`.

use crate::core::{CardId, EntityId, EntityStore, FoeId, HeroId, Hook, Source};
use crate::game::GameState;
use crate::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::rc::Rc;

/// Named trigger points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    CardPlayed,
    Shuffle,
    DamageDealt,
    InfluenceDealt,
    Acquire,
    Discard,
    HeartsChanged,
    ControlChanged,
}

/// How long a registration lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListenerScope {
    /// Wiped at the start of each action phase and at cleanup
    Turn,
    /// Lives until unregistered
    Persistent,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 8] = [
        TriggerKind::CardPlayed,
        TriggerKind::Shuffle,
        TriggerKind::DamageDealt,
        TriggerKind::InfluenceDealt,
        TriggerKind::Acquire,
        TriggerKind::Discard,
        TriggerKind::HeartsChanged,
        TriggerKind::ControlChanged,
    ];

    pub fn scope(self) -> ListenerScope {
        match self {
            TriggerKind::CardPlayed
            | TriggerKind::Shuffle
            | TriggerKind::DamageDealt
            | TriggerKind::InfluenceDealt => ListenerScope::Turn,
            TriggerKind::Acquire
            | TriggerKind::Discard
            | TriggerKind::HeartsChanged
            | TriggerKind::ControlChanged => ListenerScope::Persistent,
        }
    }
}

/// Immutable record of a change to a hero's hearts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerChange {
    pub hero: HeroId,
    /// Signed amount actually applied
    pub delta: i32,
    pub total: u32,
    pub source: Source,
}

/// Payload passed to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CardPlayed { hero: HeroId, card: CardId },
    Shuffle { hero: HeroId },
    DamageDealt { hero: HeroId, foe: FoeId, amount: u32 },
    InfluenceDealt { hero: HeroId, foe: FoeId, amount: u32 },
    Acquire { hero: HeroId, card: CardId },
    Discard { hero: HeroId, card: CardId },
    HeartsChanged(LedgerChange),
    ControlChanged { delta: i32, total: u32, source: Source },
}

impl GameEvent {
    pub fn kind(&self) -> TriggerKind {
        match self {
            GameEvent::CardPlayed { .. } => TriggerKind::CardPlayed,
            GameEvent::Shuffle { .. } => TriggerKind::Shuffle,
            GameEvent::DamageDealt { .. } => TriggerKind::DamageDealt,
            GameEvent::InfluenceDealt { .. } => TriggerKind::InfluenceDealt,
            GameEvent::Acquire { .. } => TriggerKind::Acquire,
            GameEvent::Discard { .. } => TriggerKind::Discard,
            GameEvent::HeartsChanged(_) => TriggerKind::HeartsChanged,
            GameEvent::ControlChanged { .. } => TriggerKind::ControlChanged,
        }
    }

    /// The hero this event concerns, if any
    pub fn hero(&self) -> Option<HeroId> {
        match self {
            GameEvent::CardPlayed { hero, .. }
            | GameEvent::Shuffle { hero }
            | GameEvent::DamageDealt { hero, .. }
            | GameEvent::InfluenceDealt { hero, .. }
            | GameEvent::Acquire { hero, .. }
            | GameEvent::Discard { hero, .. } => Some(*hero),
            GameEvent::HeartsChanged(change) => Some(change.hero),
            GameEvent::ControlChanged { .. } => None,
        }
    }
}

pub type ListenerFn = Hook<dyn Fn(&mut GameState, &GameEvent) -> Result<()>>;

impl Hook<dyn Fn(&mut GameState, &GameEvent) -> Result<()>> {
    pub fn new(f: impl Fn(&mut GameState, &GameEvent) -> Result<()> + 'static) -> Self {
        Hook(Rc::new(f))
    }
}

/// One registration
#[derive(Debug, Clone)]
pub struct ListenerRecord {
    pub kind: TriggerKind,
    /// Only events about this hero reach the listener
    pub hero: Option<HeroId>,
    pub callback: ListenerFn,
}

pub type ListenerId = EntityId<ListenerRecord>;

/// A listener captured for one dispatch
#[derive(Debug, Clone)]
pub(crate) struct PendingCall {
    pub id: ListenerId,
    pub hero: Option<HeroId>,
    pub callback: ListenerFn,
}

/// Typed multi-registry of listeners
#[derive(Debug, Clone, Default)]
pub struct CallbackBus {
    records: EntityStore<ListenerRecord>,
    /// Registration order per trigger
    order: FxHashMap<TriggerKind, Vec<ListenerId>>,
}

impl CallbackBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event of `kind`
    pub fn register(&mut self, kind: TriggerKind, callback: ListenerFn) -> ListenerId {
        self.insert(ListenerRecord {
            kind,
            hero: None,
            callback,
        })
    }

    /// Register a listener that only hears events about `hero`
    pub fn register_for(&mut self, kind: TriggerKind, hero: HeroId, callback: ListenerFn) -> ListenerId {
        self.insert(ListenerRecord {
            kind,
            hero: Some(hero),
            callback,
        })
    }

    fn insert(&mut self, record: ListenerRecord) -> ListenerId {
        let kind = record.kind;
        let id = self.records.alloc(|_| record);
        self.order.entry(kind).or_default().push(id);
        id
    }

    /// Remove exactly this registration. Returns false if it was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        match self.records.remove(id) {
            Some(record) => {
                if let Some(ids) = self.order.get_mut(&record.kind) {
                    ids.retain(|&other| other != id);
                }
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.records.contains(id)
    }

    /// Number of live registrations for a trigger
    pub fn len(&self, kind: TriggerKind) -> usize {
        self.order.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Listeners for `kind` in registration order
    pub(crate) fn snapshot(&self, kind: TriggerKind) -> SmallVec<[PendingCall; 8]> {
        let Some(ids) = self.order.get(&kind) else {
            return SmallVec::new();
        };
        ids.iter()
            .filter_map(|&id| {
                self.records.get(id).ok().map(|record| PendingCall {
                    id,
                    hero: record.hero,
                    callback: record.callback.clone(),
                })
            })
            .collect()
    }

    /// Drop every turn-scoped registration
    pub fn clear_turn_scoped(&mut self) {
        for kind in TriggerKind::ALL {
            if kind.scope() != ListenerScope::Turn {
                continue;
            }
            if let Some(ids) = self.order.get_mut(&kind) {
                for id in ids.drain(..) {
                    self.records.remove(id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> ListenerFn {
        ListenerFn::new(|_, _| Ok(()))
    }

    #[test]
    fn test_listener_hooks_clone_as_one_callable() {
        let listener = noop();
        assert!(listener.ptr_eq(&listener.clone()));
        assert!(!listener.ptr_eq(&noop()));
    }

    #[test]
    fn test_register_preserves_order() {
        let mut bus = CallbackBus::new();
        let a = bus.register(TriggerKind::Discard, noop());
        let b = bus.register(TriggerKind::Discard, noop());
        let c = bus.register(TriggerKind::Discard, noop());

        let ids: Vec<_> = bus.snapshot(TriggerKind::Discard).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_identical_registrations_are_independent() {
        let mut bus = CallbackBus::new();
        let shared = noop();
        let first = bus.register(TriggerKind::HeartsChanged, shared.clone());
        let second = bus.register(TriggerKind::HeartsChanged, shared);
        assert_eq!(bus.len(TriggerKind::HeartsChanged), 2);

        assert!(bus.unregister(first));
        assert!(!bus.unregister(first));
        assert!(bus.is_registered(second));
        assert_eq!(bus.len(TriggerKind::HeartsChanged), 1);
    }

    #[test]
    fn test_clear_turn_scoped_keeps_persistent() {
        let mut bus = CallbackBus::new();
        let played = bus.register(TriggerKind::CardPlayed, noop());
        let shuffle = bus.register(TriggerKind::Shuffle, noop());
        let acquire = bus.register(TriggerKind::Acquire, noop());
        let control = bus.register(TriggerKind::ControlChanged, noop());

        bus.clear_turn_scoped();
        assert!(!bus.is_registered(played));
        assert!(!bus.is_registered(shuffle));
        assert!(bus.is_registered(acquire));
        assert!(bus.is_registered(control));
        assert_eq!(bus.len(TriggerKind::CardPlayed), 0);
    }

    #[test]
    fn test_event_kind_and_hero() {
        let hero = HeroId::new(2);
        let event = GameEvent::Shuffle { hero };
        assert_eq!(event.kind(), TriggerKind::Shuffle);
        assert_eq!(event.hero(), Some(hero));

        let control = GameEvent::ControlChanged {
            delta: 1,
            total: 1,
            source: Source::Hazard,
        };
        assert_eq!(control.kind().scope(), ListenerScope::Persistent);
        assert_eq!(control.hero(), None);
    }
}
