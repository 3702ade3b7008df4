use crate::CombatRng;
use crate::catalog::{Card, SpecialTag, TargetMode};
use crate::deck::DeckManager;
use crate::entity::{Enemy, Hero, apply_damage};
use crate::error::PlayRejection;
use crate::events::CombatEvent;
use crate::status::{apply_stacks, modified_damage};

/// Mutable view of the session pieces one cast is allowed to touch.
pub(crate) struct CastContext<'a> {
    pub hero: &'a mut Hero,
    pub enemies: &'a mut [Enemy],
    pub deck: &'a mut DeckManager,
    pub rng: &'a mut CombatRng,
    pub double_cast: &'a mut bool,
}

/// All-or-nothing precondition check; nothing is mutated on rejection.
pub(crate) fn validate_play(
    card: &Card,
    hero: &Hero,
    enemies: &[Enemy],
    target: Option<usize>,
) -> Result<(), PlayRejection> {
    if hero.energy < card.cost {
        return Err(PlayRejection::NotEnoughEnergy {
            cost: card.cost,
            available: hero.energy,
        });
    }
    if card.target == TargetMode::Single {
        let idx = target.ok_or(PlayRejection::MissingTarget)?;
        let alive = enemies.get(idx).is_some_and(|e| e.is_alive());
        if !alive {
            return Err(PlayRejection::InvalidTarget(idx));
        }
    }
    Ok(())
}

/// Apply one cast of the card's effect descriptor to its resolved target
/// set. Called once normally, twice for a double-cast Attack.
pub(crate) fn apply_cast(
    ctx: &mut CastContext<'_>,
    card: &Card,
    target: Option<usize>,
    events: &mut Vec<CombatEvent>,
) {
    // Specials resolve at cast level, independent of target mode.
    if let Some(SpecialTag::Clone) = card.effects.special {
        *ctx.double_cast = true;
        events.push(CombatEvent::DoubleCastArmed);
    }

    let targets: Vec<usize> = match card.target {
        TargetMode::Single => target.into_iter().collect(),
        TargetMode::AllEnemies => (0..ctx.enemies.len()).collect(),
        TargetMode::Hero => Vec::new(),
    };

    for idx in targets {
        // AoE skips enemies that died earlier in the same cast sequence.
        if !ctx.enemies[idx].is_alive() {
            continue;
        }

        if let Some(base) = card.effects.damage {
            let amount = modified_damage(base, &ctx.hero.statuses, &ctx.enemies[idx].statuses);
            let enemy = &mut ctx.enemies[idx];
            let applied = apply_damage(&mut enemy.hp, &mut enemy.block, amount);
            events.push(CombatEvent::DamageDealt {
                source: ctx.hero.name.clone(),
                target: enemy.name.clone(),
                amount,
                blocked: applied.blocked,
                hp_lost: applied.hp_lost,
            });
            if !enemy.is_alive() {
                events.push(CombatEvent::EnemyDefeated {
                    enemy: enemy.name.clone(),
                });
            }
        }

        if let Some(kind) = card.effects.status {
            let enemy = &mut ctx.enemies[idx];
            if enemy.is_alive() {
                let stacks = card.effects.status_value.unwrap_or(1);
                apply_stacks(&mut enemy.statuses, kind, stacks);
                events.push(CombatEvent::StatusApplied {
                    target: enemy.name.clone(),
                    status: kind,
                    stacks,
                });
            }
        }
    }

    // Hero-side effects apply whatever the target mode; cards like a
    // strike-and-guard hybrid carry both a damage and a block amount.
    if let Some(block) = card.effects.block {
        ctx.hero.block += block;
        events.push(CombatEvent::BlockGained {
            target: ctx.hero.name.clone(),
            amount: block,
        });
    }
    if let Some(heal) = card.effects.heal {
        let healed = ctx.hero.heal(heal);
        events.push(CombatEvent::Healed {
            target: ctx.hero.name.clone(),
            amount: healed,
        });
    }
    if let Some(count) = card.effects.draw {
        let summary = ctx.deck.draw(count, ctx.rng);
        events.push(CombatEvent::CardsDrawn {
            count: summary.drawn,
            reshuffled: summary.reshuffled,
        });
    }
    if card.target == TargetMode::Hero {
        if let Some(kind) = card.effects.status {
            let stacks = card.effects.status_value.unwrap_or(1);
            apply_stacks(&mut ctx.hero.statuses, kind, stacks);
            events.push(CombatEvent::StatusApplied {
                target: ctx.hero.name.clone(),
                status: kind,
                stacks,
            });
        }
    }
}
