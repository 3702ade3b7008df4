use thiserror::Error;

/// Recoverable command rejections. The session is untouched when one of
/// these is returned; the caller reports it and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayRejection {
    #[error("not enough energy (cost {cost}, have {available})")]
    NotEnoughEnergy { cost: i32, available: i32 },
    #[error("card '{0}' is not in hand")]
    CardNotInHand(String),
    #[error("card '{0}' is not in the catalog")]
    UnknownCard(String),
    #[error("a single-target card needs a target")]
    MissingTarget,
    #[error("target {0} is invalid or already defeated")]
    InvalidTarget(usize),
    #[error("combat is over")]
    CombatOver,
    #[error("command not valid in the current phase")]
    WrongPhase,
}

/// Engine bugs, not player mistakes. These are fatal: the session is in a
/// state the rules should never produce, so callers must not continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("card conservation broken: deck started with {expected} cards, piles now hold {found}")]
    CardCountMismatch { expected: usize, found: usize },
    #[error("{name} has hp {hp} outside 0..={max_hp}")]
    HpOutOfRange { name: String, hp: i32, max_hp: i32 },
    #[error("{name} has negative block ({block})")]
    NegativeBlock { name: String, block: i32 },
    #[error("hero energy is negative ({energy})")]
    NegativeEnergy { energy: i32 },
}
