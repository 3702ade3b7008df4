use serde::Serialize;
use tracing::debug;

use crate::CombatRng;
use crate::catalog::{CardCatalog, CardType};
use crate::deck::DeckManager;
use crate::entity::{Enemy, Hero, apply_damage, apply_direct_damage};
use crate::error::{InvariantViolation, PlayRejection};
use crate::events::CombatEvent;
use crate::intent::{Intent, select_intent};
use crate::outcome::{Outcome, evaluate, recruit_candidate};
use crate::resolve::{CastContext, apply_cast, validate_play};
use crate::status::{StatusKind, apply_stacks, decay_one, stacks, tick_damage_over_time};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum Phase {
    PlayerTurn,
    /// Enemy actions resolve one at a time; `next` is the list index the
    /// next `advance_enemy` call will consider.
    EnemyPhase { next: usize },
    Victory { recruit_candidate: Option<String> },
    Defeat,
}

/// One combat encounter. Owns the hero snapshot, the enemy list, the piles
/// and the RNG; mutated strictly one command at a time.
#[derive(Debug, Clone)]
pub struct CombatSession {
    pub hero: Hero,
    pub enemies: Vec<Enemy>,
    pub deck: DeckManager,
    pub catalog: CardCatalog,
    pub turn: u32,
    pub phase: Phase,
    pub double_cast: bool,
    rng: CombatRng,
    initial_deck_size: usize,
}

impl CombatSession {
    /// Builds the session and runs first-round setup (shuffle, relic hooks,
    /// intent announcement, opening draw). The returned events describe that
    /// setup.
    pub fn new(
        hero: Hero,
        enemies: Vec<Enemy>,
        deck: Vec<String>,
        catalog: CardCatalog,
        seed: u64,
    ) -> (Self, Vec<CombatEvent>) {
        let mut rng = CombatRng::from_seed(seed);
        let initial_deck_size = deck.len();
        let deck = DeckManager::new(deck, &mut rng);
        let mut session = Self {
            hero,
            enemies,
            deck,
            catalog,
            turn: 1,
            phase: Phase::PlayerTurn,
            double_cast: false,
            rng,
            initial_deck_size,
        };

        let mut events = Vec::new();
        let strength: i32 = session
            .hero
            .relics
            .iter()
            .map(|r| r.combat_start_strength())
            .sum();
        if strength > 0 {
            apply_stacks(&mut session.hero.statuses, StatusKind::Strength, strength);
            events.push(CombatEvent::StatusApplied {
                target: session.hero.name.clone(),
                status: StatusKind::Strength,
                stacks: strength,
            });
        }
        session.begin_player_turn(&mut events);
        (session, events)
    }

    pub fn outcome(&self) -> Outcome {
        match &self.phase {
            Phase::Victory { recruit_candidate } => Outcome::Victory {
                recruit_candidate: recruit_candidate.clone(),
            },
            Phase::Defeat => Outcome::Defeat,
            _ => Outcome::Ongoing,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Victory { .. } | Phase::Defeat)
    }

    /// Play one card from hand. Rejections leave the session untouched;
    /// on success every mutation is reported as an event.
    pub fn play_card(
        &mut self,
        card_id: &str,
        target: Option<usize>,
    ) -> Result<Vec<CombatEvent>, PlayRejection> {
        if self.is_over() {
            return Err(PlayRejection::CombatOver);
        }
        if self.phase != Phase::PlayerTurn {
            return Err(PlayRejection::WrongPhase);
        }
        if !self.deck.holds(card_id) {
            return Err(PlayRejection::CardNotInHand(card_id.to_string()));
        }
        let card = self
            .catalog
            .get(card_id)
            .ok_or_else(|| PlayRejection::UnknownCard(card_id.to_string()))?
            .clone();
        validate_play(&card, &self.hero, &self.enemies, target)?;

        // Past this point the play is committed and runs to completion.
        self.hero.energy -= card.cost;
        debug!(card = %card.id, cost = card.cost, "card play accepted");

        let casts = if self.double_cast && card.kind == CardType::Attack {
            // The flag is one-shot: consumed by this play, not by later
            // attacks in the same turn.
            self.double_cast = false;
            2
        } else {
            1
        };

        let mut events = Vec::new();
        for cast in 0..casts {
            events.push(CombatEvent::CardPlayed {
                card: card.id.clone(),
                cloned: cast > 0,
            });
            let mut ctx = CastContext {
                hero: &mut self.hero,
                enemies: &mut self.enemies,
                deck: &mut self.deck,
                rng: &mut self.rng,
                double_cast: &mut self.double_cast,
            };
            apply_cast(&mut ctx, &card, target, &mut events);
        }

        self.deck.play_card(&card.id, card.exhaust)?;
        if card.exhaust {
            events.push(CombatEvent::CardExhausted {
                card: card.id.clone(),
            });
        }

        self.settle_outcome(&mut events);
        debug_assert!(self.check_invariants().is_ok());
        Ok(events)
    }

    /// End the player phase: discard the hand, drop an unconsumed
    /// double-cast flag, tick the hero's damage-over-time statuses, then
    /// hand control to the enemy phase.
    pub fn end_turn(&mut self) -> Result<Vec<CombatEvent>, PlayRejection> {
        if self.is_over() {
            return Err(PlayRejection::CombatOver);
        }
        if self.phase != Phase::PlayerTurn {
            return Err(PlayRejection::WrongPhase);
        }

        let mut events = Vec::new();
        self.deck.end_turn();
        self.double_cast = false;

        let hero_name = self.hero.name.clone();
        for (kind, damage, expired) in tick_damage_over_time(&mut self.hero.statuses) {
            let hp_lost = apply_direct_damage(&mut self.hero.hp, damage);
            events.push(CombatEvent::StatusTick {
                target: hero_name.clone(),
                status: kind,
                damage: hp_lost,
            });
            if expired {
                events.push(CombatEvent::StatusExpired {
                    target: hero_name.clone(),
                    status: kind,
                });
            }
        }

        // Enemy block drops as their phase opens.
        for enemy in &mut self.enemies {
            enemy.block = 0;
        }
        self.phase = Phase::EnemyPhase { next: 0 };
        self.settle_outcome(&mut events);
        debug_assert!(self.check_invariants().is_ok());
        Ok(events)
    }

    /// Execute exactly one enemy action (or stun skip), in list order. Once
    /// the last enemy has acted the next call rolls over into the following
    /// round's player-turn setup. The caller owns any pacing between calls.
    pub fn advance_enemy(&mut self) -> Result<Vec<CombatEvent>, PlayRejection> {
        if self.is_over() {
            return Err(PlayRejection::CombatOver);
        }
        let Phase::EnemyPhase { next } = self.phase else {
            return Err(PlayRejection::WrongPhase);
        };

        let mut events = Vec::new();
        let Some(idx) = (next..self.enemies.len()).find(|&i| self.enemies[i].is_alive()) else {
            self.turn += 1;
            self.begin_player_turn(&mut events);
            return Ok(events);
        };
        self.phase = Phase::EnemyPhase { next: idx + 1 };

        if stacks(&self.enemies[idx].statuses, StatusKind::Stun) > 0 {
            let enemy = &mut self.enemies[idx];
            decay_one(&mut enemy.statuses, StatusKind::Stun);
            events.push(CombatEvent::EnemyStunned {
                enemy: enemy.name.clone(),
            });
        } else {
            self.execute_intent(idx, &mut events);
        }
        self.tick_enemy_statuses(idx, &mut events);

        self.settle_outcome(&mut events);
        debug_assert!(self.check_invariants().is_ok());
        Ok(events)
    }

    /// Convenience loop over `advance_enemy` until the phase changes.
    pub fn run_enemy_phase(&mut self) -> Result<Vec<CombatEvent>, PlayRejection> {
        if self.is_over() {
            return Err(PlayRejection::CombatOver);
        }
        if !matches!(self.phase, Phase::EnemyPhase { .. }) {
            return Err(PlayRejection::WrongPhase);
        }
        let mut events = Vec::new();
        while matches!(self.phase, Phase::EnemyPhase { .. }) {
            events.extend(self.advance_enemy()?);
        }
        Ok(events)
    }

    fn execute_intent(&mut self, idx: usize, events: &mut Vec<CombatEvent>) {
        let Some(intent) = self.enemies[idx].intent else {
            return;
        };
        match intent {
            Intent::Attack { damage } => {
                let amount = crate::status::modified_damage(
                    damage,
                    &self.enemies[idx].statuses,
                    &self.hero.statuses,
                );
                let applied = apply_damage(&mut self.hero.hp, &mut self.hero.block, amount);
                events.push(CombatEvent::DamageDealt {
                    source: self.enemies[idx].name.clone(),
                    target: self.hero.name.clone(),
                    amount,
                    blocked: applied.blocked,
                    hp_lost: applied.hp_lost,
                });
                if !self.hero.is_alive() {
                    events.push(CombatEvent::HeroDefeated);
                }
            }
            Intent::Defend { block } => {
                let enemy = &mut self.enemies[idx];
                enemy.block += block;
                events.push(CombatEvent::BlockGained {
                    target: enemy.name.clone(),
                    amount: block,
                });
            }
            Intent::Debuff { status, stacks } => {
                apply_stacks(&mut self.hero.statuses, status, stacks);
                events.push(CombatEvent::StatusApplied {
                    target: self.hero.name.clone(),
                    status,
                    stacks,
                });
            }
        }
    }

    /// DoT ticks land at the end of the owner's own turn, which for an
    /// enemy is its action slot in the phase.
    fn tick_enemy_statuses(&mut self, idx: usize, events: &mut Vec<CombatEvent>) {
        let enemy = &mut self.enemies[idx];
        let name = enemy.name.clone();
        let was_alive = enemy.is_alive();
        for (kind, damage, expired) in tick_damage_over_time(&mut enemy.statuses) {
            let hp_lost = apply_direct_damage(&mut enemy.hp, damage);
            events.push(CombatEvent::StatusTick {
                target: name.clone(),
                status: kind,
                damage: hp_lost,
            });
            if expired {
                events.push(CombatEvent::StatusExpired {
                    target: name.clone(),
                    status: kind,
                });
            }
        }
        if was_alive && !self.enemies[idx].is_alive() {
            events.push(CombatEvent::EnemyDefeated { enemy: name });
        }
    }

    fn begin_player_turn(&mut self, events: &mut Vec<CombatEvent>) {
        debug!(turn = self.turn, "player turn begins");
        events.push(CombatEvent::TurnStarted { turn: self.turn });

        // Block resets on the owner's turn; a preserving relic keeps a flat
        // amount of whatever was left.
        self.hero.block = self.hero.block.min(self.hero.retained_block());
        self.hero.energy = self.hero.max_energy;
        self.double_cast = false;
        self.phase = Phase::PlayerTurn;

        for enemy in &mut self.enemies {
            if enemy.is_alive() {
                enemy.intent = select_intent(&enemy.moves, self.turn, &mut self.rng);
                if let Some(intent) = enemy.intent {
                    events.push(CombatEvent::IntentAnnounced {
                        enemy: enemy.name.clone(),
                        intent,
                    });
                }
            } else {
                enemy.intent = None;
            }
        }

        let summary = self.deck.start_turn(&mut self.rng);
        events.push(CombatEvent::CardsDrawn {
            count: summary.drawn,
            reshuffled: summary.reshuffled,
        });
    }

    /// Run the outcome evaluator and latch a terminal phase. Defeat wins
    /// ties and halts any remaining enemy actions this round.
    fn settle_outcome(&mut self, events: &mut Vec<CombatEvent>) {
        if self.is_over() {
            return;
        }
        match evaluate(&self.hero, &self.enemies) {
            Outcome::Defeat => {
                self.phase = Phase::Defeat;
                events.push(CombatEvent::CombatEnded { victory: false });
            }
            Outcome::Victory { .. } => {
                self.phase = Phase::Victory {
                    recruit_candidate: recruit_candidate(&self.enemies),
                };
                events.push(CombatEvent::CombatEnded { victory: true });
            }
            Outcome::Ongoing => {}
        }
    }

    /// Detect states the rules can never produce. A violation here is an
    /// engine bug and must be treated as fatal by the caller.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let found = self.deck.total_cards();
        if found != self.initial_deck_size {
            return Err(InvariantViolation::CardCountMismatch {
                expected: self.initial_deck_size,
                found,
            });
        }
        if self.hero.hp < 0 || self.hero.hp > self.hero.max_hp {
            return Err(InvariantViolation::HpOutOfRange {
                name: self.hero.name.clone(),
                hp: self.hero.hp,
                max_hp: self.hero.max_hp,
            });
        }
        if self.hero.block < 0 {
            return Err(InvariantViolation::NegativeBlock {
                name: self.hero.name.clone(),
                block: self.hero.block,
            });
        }
        if self.hero.energy < 0 {
            return Err(InvariantViolation::NegativeEnergy {
                energy: self.hero.energy,
            });
        }
        for enemy in &self.enemies {
            if enemy.hp < 0 || enemy.hp > enemy.max_hp {
                return Err(InvariantViolation::HpOutOfRange {
                    name: enemy.name.clone(),
                    hp: enemy.hp,
                    max_hp: enemy.max_hp,
                });
            }
            if enemy.block < 0 {
                return Err(InvariantViolation::NegativeBlock {
                    name: enemy.name.clone(),
                    block: enemy.block,
                });
            }
        }
        Ok(())
    }
}
