//! Read-only snapshots of a game in progress
//!
//! A snapshot copies out what a presentation layer needs: hero and foe
//! states, the control track, the market and the recent log. It holds no
//! references back into the game and cannot be written back.

use crate::core::{FoeId, HeroId};
use crate::game::{GameState, TurnPhase};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSnapshot {
    pub id: HeroId,
    pub name: String,
    pub hearts: u32,
    pub max_hearts: u32,
    pub damage_tokens: u32,
    pub influence_tokens: u32,
    pub stunned: bool,
    pub hand: Vec<String>,
    pub deck_size: usize,
    pub discard_size: usize,
    pub play_area: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoeSnapshot {
    pub id: FoeId,
    pub name: String,
    pub text: String,
    pub damage: u32,
    pub health: u32,
    pub influence: u32,
    pub influence_needed: u32,
    pub stunned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSnapshot {
    pub stage: String,
    /// 1-based stage number
    pub stage_number: usize,
    pub stage_count: usize,
    pub control: u32,
    pub max_control: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub number: u32,
    pub phase: TurnPhase,
    pub active_hero: HeroId,
}

/// Everything a presentation layer may show about a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: TurnSnapshot,
    pub heroes: Vec<HeroSnapshot>,
    pub active_foes: Vec<FoeSnapshot>,
    pub undrawn_foes: usize,
    pub defeated_foes: usize,
    pub control: ControlSnapshot,
    pub market: Vec<String>,
    pub recent_log: Vec<String>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Log lines included in a snapshot
const SNAPSHOT_LOG_LINES: usize = 20;

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        let names = |cards: &[crate::core::CardId]| -> Vec<String> {
            cards.iter().map(|&c| self.card_name(c)).collect()
        };

        let heroes = self
            .heroes
            .iter()
            .map(|h| HeroSnapshot {
                id: h.id,
                name: h.name.to_string(),
                hearts: h.hearts,
                max_hearts: h.max_hearts,
                damage_tokens: h.damage_tokens,
                influence_tokens: h.influence_tokens,
                stunned: h.is_stunned(),
                hand: names(&h.zones.hand.cards),
                deck_size: h.zones.deck.len(),
                discard_size: h.zones.discard.len(),
                play_area: names(&h.zones.play_area.cards),
            })
            .collect();

        let active_foes = self
            .roster
            .active
            .iter()
            .filter_map(|&id| self.foes.get(id).ok())
            .map(|f| FoeSnapshot {
                id: f.id,
                name: f.name.to_string(),
                text: f.text.clone(),
                damage: f.damage.accumulated,
                health: f.damage.threshold,
                influence: f.influence.accumulated,
                influence_needed: f.influence.threshold,
                stunned: f.is_stunned(),
            })
            .collect();

        let location = &self.location;
        GameSnapshot {
            turn: TurnSnapshot {
                number: self.turn.turn_number,
                phase: self.turn.phase,
                active_hero: self.turn.active_hero,
            },
            heroes,
            active_foes,
            undrawn_foes: self.roster.undrawn.len(),
            defeated_foes: self.roster.defeated.len(),
            control: ControlSnapshot {
                stage: location.current().name.clone(),
                stage_number: location.current_index() + 1,
                stage_count: location.stages().len(),
                control: location.control(),
                max_control: location.max_control(),
            },
            market: names(&self.market.row.cards),
            recent_log: self.logger.recent(SNAPSHOT_LOG_LINES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Source;
    use crate::game::state::test_support::*;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = bare_game();
        give_card(&mut game, HeroId::new(0), "Alohomora");
        add_foe(&mut game, "Draco Malfoy", 6, 0);
        game.add_control(2, Source::Hazard).unwrap().done().unwrap();

        let snap = game.snapshot();
        assert_eq!(snap.heroes.len(), 2);
        assert_eq!(snap.heroes[0].hand, vec!["Alohomora".to_string()]);
        assert_eq!(snap.active_foes[0].name, "Draco Malfoy");
        assert_eq!(snap.active_foes[0].health, 6);
        assert_eq!(snap.control.control, 2);
        assert_eq!(snap.control.stage_number, 1);
        assert!(!snap.recent_log.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let game = bare_game();
        let snap = game.snapshot();
        let back = GameSnapshot::from_json(&snap.to_json().unwrap()).unwrap();
        assert_eq!(back, snap);
    }
}
