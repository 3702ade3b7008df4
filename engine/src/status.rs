use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Status stacks active on one entity. A kind that is absent counts as zero
/// stacks; entries are removed as soon as they reach zero.
pub type StatusMap = IndexMap<StatusKind, i32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Incoming damage x1.5 (truncated).
    Vulnerable,
    /// Outgoing damage x0.75 (truncated).
    Weak,
    /// The afflicted enemy skips its next action; one stack per skip.
    Stun,
    /// End-of-turn damage equal to current stacks, then decays by 1.
    Burn,
    /// End-of-turn damage equal to current stacks, then decays by 1.
    Poison,
    /// Flat bonus to outgoing damage, applied before the multipliers.
    Strength,
}

impl StatusKind {
    pub fn is_damage_over_time(self) -> bool {
        matches!(self, StatusKind::Burn | StatusKind::Poison)
    }
}

pub fn stacks(statuses: &StatusMap, kind: StatusKind) -> i32 {
    statuses.get(&kind).copied().unwrap_or(0)
}

/// Add `amount` stacks (additive across applications). Returns the new total.
/// A total at or below zero removes the entry.
pub fn apply_stacks(statuses: &mut StatusMap, kind: StatusKind, amount: i32) -> i32 {
    let total = stacks(statuses, kind) + amount;
    if total > 0 {
        statuses.insert(kind, total);
    } else {
        statuses.shift_remove(&kind);
    }
    total.max(0)
}

/// Remove exactly one stack. Returns true if the status expired.
pub fn decay_one(statuses: &mut StatusMap, kind: StatusKind) -> bool {
    apply_stacks(statuses, kind, -1) == 0
}

/// Damage pipeline: flat STRENGTH on the attacker, then the target's
/// VULNERABLE multiplier, then the attacker's WEAK multiplier. The order of
/// the two multipliers matters for truncation and is fixed to
/// target-then-attacker. Never returns a negative value.
pub fn modified_damage(base: i32, attacker: &StatusMap, target: &StatusMap) -> i32 {
    let mut dmg = base + stacks(attacker, StatusKind::Strength);
    if stacks(target, StatusKind::Vulnerable) > 0 {
        dmg = dmg * 3 / 2;
    }
    if stacks(attacker, StatusKind::Weak) > 0 {
        dmg = dmg * 3 / 4;
    }
    dmg.max(0)
}

/// One end-of-turn damage-over-time tick for `statuses`: each DoT kind deals
/// damage equal to its current stack count, then decays by one stack.
/// Returns `(kind, damage, expired)` per tick in map order.
pub fn tick_damage_over_time(statuses: &mut StatusMap) -> Vec<(StatusKind, i32, bool)> {
    let kinds: Vec<StatusKind> = statuses
        .keys()
        .copied()
        .filter(|k| k.is_damage_over_time())
        .collect();
    let mut ticks = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let damage = stacks(statuses, kind);
        let expired = decay_one(statuses, kind);
        ticks.push((kind, damage, expired));
    }
    ticks
}
