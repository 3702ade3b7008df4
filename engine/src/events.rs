use std::fmt;

use serde::Serialize;

use crate::intent::Intent;
use crate::status::StatusKind;

/// Discrete record of one engine mutation, suitable for logging or animation
/// without re-entering the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum CombatEvent {
    TurnStarted {
        turn: u32,
    },
    CardsDrawn {
        count: usize,
        reshuffled: bool,
    },
    IntentAnnounced {
        enemy: String,
        intent: Intent,
    },
    CardPlayed {
        card: String,
        /// True for the second resolution of a double-cast Attack.
        cloned: bool,
    },
    DoubleCastArmed,
    DamageDealt {
        source: String,
        target: String,
        amount: i32,
        blocked: i32,
        hp_lost: i32,
    },
    BlockGained {
        target: String,
        amount: i32,
    },
    Healed {
        target: String,
        amount: i32,
    },
    StatusApplied {
        target: String,
        status: StatusKind,
        stacks: i32,
    },
    StatusTick {
        target: String,
        status: StatusKind,
        damage: i32,
    },
    StatusExpired {
        target: String,
        status: StatusKind,
    },
    CardExhausted {
        card: String,
    },
    EnemyStunned {
        enemy: String,
    },
    EnemyDefeated {
        enemy: String,
    },
    HeroDefeated,
    CombatEnded {
        victory: bool,
    },
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CombatEvent::*;
        match self {
            TurnStarted { turn } => write!(f, "[TURN] round {turn} begins"),
            CardsDrawn { count, reshuffled } => {
                if *reshuffled {
                    write!(f, "[DRAW] {count} cards (discard reshuffled)")
                } else {
                    write!(f, "[DRAW] {count} cards")
                }
            }
            IntentAnnounced { enemy, intent } => {
                write!(f, "[INTENT][{enemy}] telegraphs {intent}")
            }
            CardPlayed { card, cloned } => {
                if *cloned {
                    write!(f, "[CARD] {card} resolves again (clone)")
                } else {
                    write!(f, "[CARD] {card} played")
                }
            }
            DoubleCastArmed => write!(f, "[CARD] next attack will cast twice"),
            DamageDealt {
                source,
                target,
                amount,
                blocked,
                hp_lost,
            } => write!(
                f,
                "[DMG][{source}->{target}] {amount} dealt ({blocked} blocked, -{hp_lost} hp)"
            ),
            BlockGained { target, amount } => write!(f, "[BLOCK][{target}] +{amount}"),
            Healed { target, amount } => write!(f, "[HEAL][{target}] +{amount} hp"),
            StatusApplied {
                target,
                status,
                stacks,
            } => write!(f, "[STATUS][{target}] +{stacks} {status:?}"),
            StatusTick {
                target,
                status,
                damage,
            } => write!(f, "[TICK][{target}] {status:?} deals {damage}"),
            StatusExpired { target, status } => {
                write!(f, "[STATUS][{target}] {status:?} wears off")
            }
            CardExhausted { card } => write!(f, "[EXHAUST] {card} leaves the combat"),
            EnemyStunned { enemy } => write!(f, "[STUN][{enemy}] skips its action"),
            EnemyDefeated { enemy } => write!(f, "[KILL][{enemy}] is defeated"),
            HeroDefeated => write!(f, "[KILL] the hero falls"),
            CombatEnded { victory } => {
                write!(f, "[END] {}", if *victory { "victory" } else { "defeat" })
            }
        }
    }
}
