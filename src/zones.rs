//! Card piles (deck, hand, discard, play area, market)

use crate::core::{CardId, HeroId};
use serde::{Deserialize, Serialize};

/// Different piles where cards can sit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Discard,
    PlayArea,
    MarketSupply,
    MarketRow,
}

/// A pile of cards
///
/// The last element is the top of the pile. Deck and discard order is random;
/// hand and play area keep insertion order for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    /// Zone type
    pub zone_type: Zone,

    /// Cards in this zone
    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            // Keep relative order: hand and play area are shown in order.
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Take the top card
    pub fn draw_top(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// Shuffle the zone
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    /// Move every card into `other`, leaving this zone empty
    pub fn move_all_to(&mut self, other: &mut CardZone) {
        other.cards.append(&mut self.cards);
    }

    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }

    /// Clear all cards
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// Collection of all piles for a hero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroZones {
    pub owner: HeroId,
    pub deck: CardZone,
    pub hand: CardZone,
    pub discard: CardZone,
    pub play_area: CardZone,
}

impl HeroZones {
    pub fn new(owner: HeroId) -> Self {
        HeroZones {
            owner,
            deck: CardZone::new(Zone::Deck),
            hand: CardZone::new(Zone::Hand),
            discard: CardZone::new(Zone::Discard),
            play_area: CardZone::new(Zone::PlayArea),
        }
    }

    pub fn get_zone(&self, zone: Zone) -> Option<&CardZone> {
        match zone {
            Zone::Deck => Some(&self.deck),
            Zone::Hand => Some(&self.hand),
            Zone::Discard => Some(&self.discard),
            Zone::PlayArea => Some(&self.play_area),
            _ => None,
        }
    }

    /// Total cards across all four piles
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.hand.len() + self.discard.len() + self.play_area.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_zone() {
        let mut zone = CardZone::new(Zone::Hand);

        assert_eq!(zone.len(), 0);
        assert!(zone.is_empty());

        let card1 = CardId::new(10);
        let card2 = CardId::new(11);

        zone.add(card1);
        zone.add(card2);

        assert_eq!(zone.len(), 2);
        assert!(zone.contains(card1));
        assert!(zone.contains(card2));

        assert!(zone.remove(card1));
        assert!(!zone.remove(card1));
        assert_eq!(zone.len(), 1);
        assert!(!zone.contains(card1));
    }

    #[test]
    fn test_deck_operations() {
        let mut deck = CardZone::new(Zone::Deck);

        let card1 = CardId::new(10);
        let card2 = CardId::new(11);
        let card3 = CardId::new(12);

        deck.add(card1); // Bottom
        deck.add(card2);
        deck.add(card3); // Top

        assert_eq!(deck.peek_top(), Some(card3));
        assert_eq!(deck.draw_top(), Some(card3));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.draw_top(), Some(card2));
        assert_eq!(deck.draw_top(), Some(card1));
        assert!(deck.is_empty());
        assert_eq!(deck.draw_top(), None);
    }

    #[test]
    fn test_move_all() {
        let mut discard = CardZone::new(Zone::Discard);
        let mut deck = CardZone::new(Zone::Deck);
        discard.add(CardId::new(1));
        discard.add(CardId::new(2));

        discard.move_all_to(&mut deck);
        assert!(discard.is_empty());
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_hero_zones() {
        let zones = HeroZones::new(HeroId::new(1));

        assert_eq!(zones.deck.zone_type, Zone::Deck);
        assert_eq!(zones.hand.zone_type, Zone::Hand);
        assert_eq!(zones.discard.zone_type, Zone::Discard);
        assert_eq!(zones.play_area.zone_type, Zone::PlayArea);
        assert!(zones.get_zone(Zone::MarketRow).is_none());
        assert_eq!(zones.total_cards(), 0);
    }
}
