//! Location stages

use crate::core::{GameHook, Source, Stage};

pub fn diagon_alley() -> Stage {
    Stage::new("Diagon Alley", 4, 1)
}

/// Each hero loses a heart on arrival
pub fn mirror_of_erised() -> Stage {
    Stage::new("Mirror of Erised", 4, 1).with_on_reveal(GameHook::new(|game| {
        for hero in game.hero_ids() {
            let _ = game.add_hearts(hero, -1, Source::Location)?;
        }
        Ok(())
    }))
}

/// The final stage starts with control already on it
pub fn forbidden_forest() -> Stage {
    Stage::new("Forbidden Forest", 5, 2).with_on_reveal(GameHook::new(|game| {
        let _ = game.add_control(1, Source::Location)?;
        Ok(())
    }))
}

pub fn stages() -> Vec<Stage> {
    vec![diagon_alley(), mirror_of_erised(), forbidden_forest()]
}
