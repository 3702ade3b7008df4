use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CombatRng;
use crate::status::StatusKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Attack,
    Defend,
    Debuff,
}

/// One row of an enemy archetype's move table, as written in encounter
/// content. Attack damage scales with the round counter:
/// `base + scaling * turn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MoveSpec {
    pub kind: MoveKind,
    #[serde(default)]
    pub base: i32,
    #[serde(default)]
    pub scaling: i32,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub status: Option<StatusKind>,
    #[serde(default)]
    pub stacks: Option<i32>,
}

fn default_weight() -> u32 {
    1
}

/// An enemy's committed action for the upcoming resolution, with its
/// announced value already computed for telegraphing. The announced damage
/// is a selection-time snapshot before status modifiers; execution applies
/// the attacker's and target's statuses as they stand at that moment, so a
/// WEAK landed after the telegraph lowers the dealt number, not this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Intent {
    Attack { damage: i32 },
    Defend { block: i32 },
    Debuff { status: StatusKind, stacks: i32 },
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Attack { damage } => write!(f, "attack {damage}"),
            Intent::Defend { block } => write!(f, "defend {block}"),
            Intent::Debuff { status, stacks } => write!(f, "{stacks}x {status:?}"),
        }
    }
}

/// Pick an intent from a move table for the given round. A single-row table
/// is fully deterministic; weighted tables draw from the injected RNG.
/// Returns None for an empty table (the enemy simply does nothing).
pub fn select_intent(moves: &[MoveSpec], turn: u32, rng: &mut CombatRng) -> Option<Intent> {
    let spec = match moves {
        [] => return None,
        [only] => only,
        _ => {
            let total: u32 = moves.iter().map(|m| m.weight.max(1)).sum();
            let mut pick = rng.weighted_index(total);
            let mut chosen = &moves[0];
            for spec in moves {
                let w = spec.weight.max(1);
                if pick < w {
                    chosen = spec;
                    break;
                }
                pick -= w;
            }
            chosen
        }
    };

    Some(match spec.kind {
        MoveKind::Attack => Intent::Attack {
            damage: spec.base + spec.scaling * turn as i32,
        },
        MoveKind::Defend => Intent::Defend { block: spec.base },
        MoveKind::Debuff => Intent::Debuff {
            status: spec.status.unwrap_or(StatusKind::Weak),
            stacks: spec.stacks.unwrap_or(1),
        },
    })
}
