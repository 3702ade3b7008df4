use serde::{Deserialize, Serialize};

use crate::intent::{Intent, MoveSpec};
use crate::status::StatusMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relic {
    /// Preserves a flat amount of block across the hero's turn boundary.
    Cassock,
    /// Grants one STRENGTH stack when combat starts.
    GoldenHoop,
}

impl Relic {
    pub fn retained_block(self) -> i32 {
        match self {
            Relic::Cassock => 5,
            Relic::GoldenHoop => 0,
        }
    }

    pub fn combat_start_strength(self) -> i32 {
        match self {
            Relic::Cassock => 0,
            Relic::GoldenHoop => 1,
        }
    }
}

/// Caller-supplied hero definition; content files deserialize into this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HeroSpec {
    pub id: String,
    pub name: String,
    pub max_hp: i32,
    pub max_energy: i32,
    #[serde(default)]
    pub relics: Vec<Relic>,
    pub deck: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub id: String,
    pub name: String,
    pub max_hp: i32,
    pub hp: i32,
    pub block: i32,
    pub max_energy: i32,
    pub energy: i32,
    pub relics: Vec<Relic>,
    pub statuses: StatusMap,
}

impl Hero {
    pub fn from_spec(spec: &HeroSpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            max_hp: spec.max_hp,
            hp: spec.max_hp,
            block: 0,
            max_energy: spec.max_energy,
            energy: spec.max_energy,
            relics: spec.relics.clone(),
            statuses: StatusMap::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Block kept when the hero's turn begins (0 without a preserving relic).
    pub fn retained_block(&self) -> i32 {
        self.relics.iter().map(|r| r.retained_block()).max().unwrap_or(0)
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.max(0).min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }
}

/// Enemy archetype as written in encounter content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EnemySpec {
    pub id: String,
    pub name: String,
    pub max_hp: i32,
    #[serde(default)]
    pub elite: bool,
    #[serde(default)]
    pub boss: bool,
    #[serde(default)]
    pub recruit_card: Option<String>,
    pub moves: Vec<MoveSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub max_hp: i32,
    pub hp: i32,
    pub block: i32,
    pub statuses: StatusMap,
    /// Action committed for the upcoming resolution; telegraphed to the
    /// presentation layer as-is.
    pub intent: Option<Intent>,
    pub elite: bool,
    pub boss: bool,
    pub recruit_card: Option<String>,
    pub moves: Vec<MoveSpec>,
}

impl Enemy {
    pub fn from_spec(spec: &EnemySpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            max_hp: spec.max_hp,
            hp: spec.max_hp,
            block: 0,
            statuses: StatusMap::new(),
            intent: None,
            elite: spec.elite,
            boss: spec.boss,
            recruit_card: spec.recruit_card.clone(),
            moves: spec.moves.clone(),
        }
    }

    /// Defeated enemies stay in the list for display order but are excluded
    /// from targeting and intent execution.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageApplied {
    pub blocked: i32,
    pub hp_lost: i32,
}

/// Block-first damage absorption: block soaks what it can, the remainder
/// comes off hp, both floored at zero.
pub fn apply_damage(hp: &mut i32, block: &mut i32, amount: i32) -> DamageApplied {
    let amount = amount.max(0);
    let blocked = amount.min(*block);
    *block -= blocked;
    let hp_lost = (amount - blocked).min(*hp);
    *hp -= hp_lost;
    DamageApplied { blocked, hp_lost }
}

/// Damage that ignores block entirely (used by damage-over-time ticks).
pub fn apply_direct_damage(hp: &mut i32, amount: i32) -> i32 {
    let hp_lost = amount.max(0).min(*hp);
    *hp -= hp_lost;
    hp_lost
}
