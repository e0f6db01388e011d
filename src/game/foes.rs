//! Foe ledger: revealing, hitting, stunning and defeating foes

use crate::core::{FoeId, FoeStatus, HeroId, Resource, Source};
use crate::game::events::GameEvent;
use crate::game::{FoeHit, GameState, Outcome, Rejection};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Which foes are waiting, in play, or beaten
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoeRoster {
    /// Front is revealed next
    pub undrawn: VecDeque<FoeId>,
    /// In play, in reveal order
    pub active: Vec<FoeId>,
    pub defeated: Vec<FoeId>,
    pub max_active: usize,
}

impl FoeRoster {
    pub fn new(max_active: usize) -> Self {
        FoeRoster {
            max_active,
            ..FoeRoster::default()
        }
    }

    /// No foe left anywhere
    pub fn is_cleared(&self) -> bool {
        self.undrawn.is_empty() && self.active.is_empty()
    }
}

impl GameState {
    pub fn active_foes(&self) -> &[FoeId] {
        &self.roster.active
    }

    pub fn defeated_foes(&self) -> &[FoeId] {
        &self.roster.defeated
    }

    pub fn undrawn_foes(&self) -> usize {
        self.roster.undrawn.len()
    }

    pub fn all_foes_defeated(&self) -> bool {
        self.roster.is_cleared()
    }

    /// Bring foes into play until the table is full, running reveal hooks
    pub fn reveal_foes(&mut self) -> Result<usize> {
        let mut revealed = 0;
        while self.roster.active.len() < self.roster.max_active {
            let Some(id) = self.roster.undrawn.pop_front() else {
                break;
            };
            let foe = self.foes.get_mut(id)?;
            foe.status = FoeStatus::Active;
            let on_reveal = foe.on_reveal.clone();
            self.roster.active.push(id);
            self.logger.normal(&format!("{} enters play", self.foe_name(id)));
            if let Some(hook) = on_reveal {
                self.nested(|game| (hook.get())(game, id))?;
            }
            revealed += 1;
        }
        Ok(revealed)
    }

    /// Why `foe` cannot take `resource` right now, if it cannot
    pub fn foe_accepts(&self, foe: FoeId, resource: Resource) -> Result<Option<Rejection>> {
        let f = self.foes.get(foe)?;
        if !f.is_active() {
            return Ok(Some(Rejection::FoeNotActive));
        }
        if let Some(predicate) = &f.vulnerability {
            if !(predicate.get())(self, foe) {
                return Ok(Some(Rejection::FoeNotVulnerable));
            }
        }
        let track = f.track(resource);
        if track.is_satisfied() {
            return Ok(Some(Rejection::ThresholdReached(resource)));
        }
        if track.cap_reached() {
            return Ok(Some(Rejection::TurnCapReached(resource)));
        }
        Ok(None)
    }

    /// Spend one of the hero's damage tokens on a foe
    pub fn assign_damage(&mut self, hero: HeroId, foe: FoeId) -> Result<Outcome<FoeHit>> {
        self.assign_token(hero, foe, Resource::Damage)
    }

    /// Spend one of the hero's influence tokens on a foe
    pub fn assign_influence(&mut self, hero: HeroId, foe: FoeId) -> Result<Outcome<FoeHit>> {
        self.assign_token(hero, foe, Resource::Influence)
    }

    fn assign_token(&mut self, hero: HeroId, foe: FoeId, resource: Resource) -> Result<Outcome<FoeHit>> {
        let h = self.hero(hero)?;
        let tokens = match resource {
            Resource::Damage => h.damage_tokens,
            Resource::Influence => h.influence_tokens,
        };
        let what = format!("{} assigns {} to {}", h.name, resource, self.foe_name(foe));
        if tokens == 0 {
            return Ok(self.reject(&what, Rejection::NoTokens(resource)));
        }
        if let Some(reason) = self.foe_accepts(foe, resource)? {
            return Ok(self.reject(&what, reason));
        }

        let spent = match resource {
            Resource::Damage => self.add_damage(hero, -1, Source::Rule)?,
            Resource::Influence => self.add_influence(hero, -1, Source::Rule)?,
        };
        if let Outcome::Rejected(reason) = spent {
            return Ok(Outcome::Rejected(reason));
        }
        self.apply_to_foe(hero, foe, resource, 1).map(Outcome::Done)
    }

    /// Put damage directly on a foe from an effect, without spending tokens
    ///
    /// The amount is cut down to what the foe can still take.
    pub fn damage_foe(&mut self, hero: HeroId, foe: FoeId, amount: u32) -> Result<Outcome<FoeHit>> {
        self.hit_foe(hero, foe, Resource::Damage, amount)
    }

    /// Put influence directly on a foe from an effect, without spending tokens
    pub fn influence_foe(&mut self, hero: HeroId, foe: FoeId, amount: u32) -> Result<Outcome<FoeHit>> {
        self.hit_foe(hero, foe, Resource::Influence, amount)
    }

    fn hit_foe(&mut self, hero: HeroId, foe: FoeId, resource: Resource, amount: u32) -> Result<Outcome<FoeHit>> {
        if amount == 0 {
            return Err(GameError::ZeroAmount { op: "hit_foe" });
        }
        if let Some(reason) = self.foe_accepts(foe, resource)? {
            let what = format!("{} {} on {}", amount, resource, self.foe_name(foe));
            return Ok(self.reject(&what, reason));
        }
        self.apply_to_foe(hero, foe, resource, amount).map(Outcome::Done)
    }

    /// Record up to `amount` of `resource` on an accepting foe
    ///
    /// Defeat is resolved before the hero's extra assign effects and the
    /// dealt event, which fires whether or not the foe went down.
    fn apply_to_foe(&mut self, hero: HeroId, foe: FoeId, resource: Resource, amount: u32) -> Result<FoeHit> {
        let f = self.foes.get_mut(foe)?;
        let track = f.track_mut(resource);
        let applied = amount.min(track.capacity());
        track.accumulated += applied;
        track.taken_this_turn += applied;
        let (accumulated, threshold) = (track.accumulated, track.threshold);
        let defeated = f.is_defeated();
        self.logger.normal(&format!(
            "{} puts {} {} on {} ({}/{})",
            self.hero_name(hero),
            applied,
            resource,
            self.foe_name(foe),
            accumulated,
            threshold
        ));

        let hit = if defeated {
            self.defeat_foe(hero, foe)?;
            FoeHit::Defeated
        } else {
            FoeHit::Damaged
        };

        let extras = {
            let h = self.hero(hero)?;
            match resource {
                Resource::Damage => h.extra_damage_effects.clone(),
                Resource::Influence => h.extra_influence_effects.clone(),
            }
        };
        for extra in extras {
            self.nested(|game| (extra.get())(game, hero, foe, applied))?;
        }

        let event = match resource {
            Resource::Damage => GameEvent::DamageDealt {
                hero,
                foe,
                amount: applied,
            },
            Resource::Influence => GameEvent::InfluenceDealt {
                hero,
                foe,
                amount: applied,
            },
        };
        self.fire(event)?;
        Ok(hit)
    }

    /// Take a beaten foe out of play
    ///
    /// Runs the foe's cleanup hook, then its reward, then any one-shot
    /// bonuses the defeating hero collected this turn. A foe is only ever
    /// defeated once.
    fn defeat_foe(&mut self, hero: HeroId, foe: FoeId) -> Result<()> {
        let f = self.foes.get(foe)?;
        if f.status == FoeStatus::Defeated {
            return Ok(());
        }
        let cleanup = f.cleanup.clone();
        let reward = f.reward.clone().ok_or_else(|| GameError::MissingHook {
            name: f.name.to_string(),
            hook: "reward",
        })?;

        self.logger
            .normal(&format!("{} defeats {}!", self.hero_name(hero), self.foe_name(foe)));
        if let Some(cleanup) = cleanup {
            self.nested(|game| (cleanup.get())(game, foe))?;
        }
        self.nested(|game| (reward.get())(game, hero))?;

        let f = self.foes.get_mut(foe)?;
        f.status = FoeStatus::Defeated;
        f.stunned_by = None;
        self.roster.active.retain(|&id| id != foe);
        self.roster.defeated.push(foe);

        let bonuses = std::mem::take(&mut self.hero_mut(hero)?.extra_foe_rewards);
        for bonus in bonuses {
            self.nested(|game| (bonus.get())(game, hero))?;
        }
        Ok(())
    }

    /// Stun a foe: it skips its effect until `by`'s next turn
    pub fn stun_foe(&mut self, foe: FoeId, by: HeroId) -> Result<Outcome> {
        self.hero_idx(by)?;
        let f = self.foes.get_mut(foe)?;
        if !f.is_active() {
            let what = format!("stun {}", f.name);
            return Ok(self.reject(&what, Rejection::FoeNotActive));
        }
        f.stunned_by = Some(by);
        self.logger
            .normal(&format!("{} stuns {}", self.hero_name(by), self.foe_name(foe)));
        Ok(Outcome::Done(()))
    }

    /// Wake every foe that `hero` stunned
    pub fn recover_foes_stunned_by(&mut self, hero: HeroId) -> Result<()> {
        for &id in &self.roster.active {
            let f = self.foes.get_mut(id)?;
            if f.stunned_by == Some(hero) {
                f.stunned_by = None;
                self.logger.verbose(&format!("{} is no longer stunned", f.name));
            }
        }
        Ok(())
    }

    /// Run one foe's turn effect unless it is stunned
    pub fn resolve_foe(&mut self, foe: FoeId) -> Result<()> {
        let f = self.foes.get(foe)?;
        if !f.is_active() {
            return Ok(());
        }
        if f.is_stunned() {
            self.logger.normal(&format!("{} is stunned and does nothing", f.name));
            return Ok(());
        }
        let effect = f.effect.clone().ok_or_else(|| GameError::MissingHook {
            name: f.name.to_string(),
            hook: "effect",
        })?;
        self.logger.verbose(&format!("{}: {}", f.name, f.text));
        self.nested(|game| (effect.get())(game, foe))
    }

    /// Reset every foe's per-turn counters
    pub(crate) fn end_foe_turn(&mut self) {
        let ids: Vec<FoeId> = self.roster.active.clone();
        for id in ids {
            if let Ok(f) = self.foes.get_mut(id) {
                f.end_turn();
            }
        }
    }
}
