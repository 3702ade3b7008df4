use rand::{Rng, SeedableRng};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod catalog;
pub mod content;
pub mod deck;
pub mod entity;
pub mod error;
pub mod events;
pub mod intent;
pub mod outcome;
mod resolve;
pub mod session;
pub mod status;

pub use catalog::{Card, CardCatalog, CardEffect, CardType, Rarity, SpecialTag, TargetMode};
pub use deck::{DeckManager, DrawSummary, HAND_SIZE};
pub use entity::{DamageApplied, Enemy, EnemySpec, Hero, HeroSpec, Relic, apply_damage};
pub use error::{InvariantViolation, PlayRejection};
pub use events::CombatEvent;
pub use intent::{Intent, MoveKind, MoveSpec};
pub use outcome::Outcome;
pub use session::{CombatSession, Phase};
pub use status::{StatusKind, StatusMap, modified_damage};

/// Seeded random source for everything the engine randomizes (pile shuffles,
/// weighted intent picks). Injecting the seed keeps whole combats
/// reproducible.
#[derive(Debug, Clone)]
pub struct CombatRng {
    rng: ChaCha8Rng,
}

impl CombatRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform Fisher-Yates permutation, not a comparator trick.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Uniform draw in `0..total_weight` for weighted-table selection.
    pub fn weighted_index(&mut self, total_weight: u32) -> u32 {
        self.rng.gen_range(0..total_weight.max(1))
    }
}

/// Install a global `tracing` subscriber honoring `RUST_LOG`. Safe to call
/// more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
