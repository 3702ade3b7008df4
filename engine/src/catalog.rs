use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::status::StatusKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Attack,
    Skill,
    Power,
    Curse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetMode {
    /// One living enemy, chosen by index at play time.
    Single,
    /// Every living enemy.
    AllEnemies,
    /// The hero.
    Hero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
    Boss,
}

/// Closed set of special card mechanics. An unknown tag in content is a
/// deserialization error rather than a silently ignored string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialTag {
    /// Arms the one-shot double-cast flag: the next Attack card played this
    /// turn resolves twice.
    Clone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CardEffect {
    #[serde(default)]
    pub damage: Option<i32>,
    #[serde(default)]
    pub block: Option<i32>,
    #[serde(default)]
    pub heal: Option<i32>,
    #[serde(default)]
    pub draw: Option<usize>,
    #[serde(default)]
    pub status: Option<StatusKind>,
    /// Stacks applied with `status`; defaults to 1 when unspecified.
    #[serde(default)]
    pub status_value: Option<i32>,
    #[serde(default)]
    pub special: Option<SpecialTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub cost: i32,
    pub kind: CardType,
    pub target: TargetMode,
    pub rarity: Rarity,
    pub effects: CardEffect,
    /// Exhausted cards leave circulation for the rest of the combat.
    #[serde(default)]
    pub exhaust: bool,
}

/// Immutable id to card lookup. The engine only reads it.
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: IndexMap<String, Card>,
}

impl CardCatalog {
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(cards.len());
        for card in cards {
            if card.cost < 0 {
                bail!("card '{}' has negative cost", card.id);
            }
            if map.insert(card.id.clone(), card).is_some() {
                bail!("duplicate card id in catalog");
            }
        }
        Ok(Self { cards: map })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let cards: Vec<Card> =
            serde_json::from_str(text).context("failed to parse card catalog JSON")?;
        Self::from_cards(cards)
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
