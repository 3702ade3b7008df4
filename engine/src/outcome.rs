use crate::entity::{Enemy, Hero};

/// Terminal-state classification of a session snapshot. Pure read; called
/// idempotently after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Victory { recruit_candidate: Option<String> },
    Defeat,
}

/// Defeat wins ties: if the hero and the last enemy drop in the same step,
/// the combat is a loss.
pub fn evaluate(hero: &Hero, enemies: &[Enemy]) -> Outcome {
    if !hero.is_alive() {
        return Outcome::Defeat;
    }
    if enemies.iter().all(|e| !e.is_alive()) {
        return Outcome::Victory {
            recruit_candidate: recruit_candidate(enemies),
        };
    }
    Outcome::Ongoing
}

/// First enemy in list order that is elite or boss and carries a recruit
/// card id; handed to the external reward layer on victory.
pub fn recruit_candidate(enemies: &[Enemy]) -> Option<String> {
    enemies
        .iter()
        .find(|e| (e.elite || e.boss) && e.recruit_card.is_some())
        .and_then(|e| e.recruit_card.clone())
}
